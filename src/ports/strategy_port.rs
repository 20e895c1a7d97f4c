//! Strategy (tentacle) setup port trait.

use crate::domain::bot_config::BotConfig;
use crate::domain::error::PlanLimitError;
use crate::domain::time_frame::TimeFrame;
use std::path::PathBuf;

/// Handle identifying the active tentacles setup. Opaque to the limiters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TentaclesSetup {
    pub config_path: PathBuf,
}

/// Port to the strategy registry: which strategies are activated and which
/// time frames each one needs.
pub trait StrategyPort {
    fn tentacles_setup(&self, config: &BotConfig) -> Result<TentaclesSetup, PlanLimitError>;

    fn activated_strategies(&self, setup: &TentaclesSetup) -> Result<Vec<String>, PlanLimitError>;

    fn strategy_time_frames(
        &self,
        strategy: &str,
        config: &BotConfig,
        setup: &TentaclesSetup,
    ) -> Result<Vec<TimeFrame>, PlanLimitError>;

    /// Replaces the time frames a strategy is configured with.
    fn update_time_frames(
        &mut self,
        strategy: &str,
        setup: &TentaclesSetup,
        time_frames: &[TimeFrame],
    ) -> Result<(), PlanLimitError>;
}
