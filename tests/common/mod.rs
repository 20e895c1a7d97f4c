#![allow(dead_code)]

use planlimits::domain::bot_config::{BotConfig, CurrencyEntry, ExchangeEntry};
use planlimits::domain::error::PlanLimitError;
use planlimits::domain::plan::{Ceiling, PlanLimits};
pub use planlimits::domain::time_frame::TimeFrame;
use planlimits::ports::strategy_port::{StrategyPort, TentaclesSetup};
use std::path::PathBuf;

pub struct MockStrategyPort {
    pub strategies: Vec<(String, Vec<TimeFrame>)>,
    pub updates: Vec<(String, Vec<TimeFrame>)>,
    pub setup_error: Option<String>,
    pub failing_strategy: Option<String>,
}

impl MockStrategyPort {
    pub fn new() -> Self {
        Self {
            strategies: Vec::new(),
            updates: Vec::new(),
            setup_error: None,
            failing_strategy: None,
        }
    }

    pub fn with_strategy(mut self, name: &str, time_frames: &[TimeFrame]) -> Self {
        self.strategies.push((name.to_string(), time_frames.to_vec()));
        self
    }

    pub fn with_setup_error(mut self, reason: &str) -> Self {
        self.setup_error = Some(reason.to_string());
        self
    }

    pub fn with_failing_strategy(mut self, name: &str) -> Self {
        self.failing_strategy = Some(name.to_string());
        self
    }

    pub fn time_frames(&self, name: &str) -> Vec<TimeFrame> {
        self.strategies
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, tfs)| tfs.clone())
            .unwrap_or_default()
    }
}

impl StrategyPort for MockStrategyPort {
    fn tentacles_setup(&self, _config: &BotConfig) -> Result<TentaclesSetup, PlanLimitError> {
        if let Some(reason) = &self.setup_error {
            return Err(PlanLimitError::TentaclesSetup {
                reason: reason.clone(),
            });
        }
        Ok(TentaclesSetup {
            config_path: PathBuf::from("mock-tentacles.ini"),
        })
    }

    fn activated_strategies(&self, _setup: &TentaclesSetup) -> Result<Vec<String>, PlanLimitError> {
        Ok(self.strategies.iter().map(|(n, _)| n.clone()).collect())
    }

    fn strategy_time_frames(
        &self,
        strategy: &str,
        _config: &BotConfig,
        _setup: &TentaclesSetup,
    ) -> Result<Vec<TimeFrame>, PlanLimitError> {
        if self.failing_strategy.as_deref() == Some(strategy) {
            return Err(PlanLimitError::Strategy {
                strategy: strategy.to_string(),
                reason: "broken strategy config".to_string(),
            });
        }
        Ok(self.time_frames(strategy))
    }

    fn update_time_frames(
        &mut self,
        strategy: &str,
        _setup: &TentaclesSetup,
        time_frames: &[TimeFrame],
    ) -> Result<(), PlanLimitError> {
        self.updates.push((strategy.to_string(), time_frames.to_vec()));
        if let Some((_, tfs)) = self.strategies.iter_mut().find(|(n, _)| n == strategy) {
            *tfs = time_frames.to_vec();
        }
        Ok(())
    }
}

pub fn exchanges(names: &[&str]) -> Vec<ExchangeEntry> {
    names.iter().map(|n| ExchangeEntry::new(*n)).collect()
}

pub fn currency(name: &str, pairs: &[&str]) -> CurrencyEntry {
    CurrencyEntry::new(name, pairs.iter().copied())
}

pub fn ceiling(n: i64) -> Ceiling {
    Ceiling::from_setting(n).unwrap()
}

pub fn plan(exchanges: i64, symbols: i64, time_frames: i64) -> PlanLimits {
    PlanLimits {
        exchanges: ceiling(exchanges),
        symbols: ceiling(symbols),
        time_frames: ceiling(time_frames),
    }
}

pub fn enabled_exchange_names(config: &BotConfig) -> Vec<String> {
    config.enabled_exchanges().map(|e| e.name.clone()).collect()
}
