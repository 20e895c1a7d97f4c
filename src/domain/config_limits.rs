//! Applies every plan ceiling to a bot configuration.
//!
//! Exchanges, then symbols, then time frames. Each dimension is enforced
//! independently: a failing dimension is reported in
//! [`LimitReport::failures`] and the remaining ones still run.

use crate::domain::bot_config::BotConfig;
use crate::domain::error::PlanLimitError;
use crate::domain::exchange_limits::apply_exchanges_limit;
use crate::domain::plan::PlanLimits;
use crate::domain::symbol_limits::apply_symbols_limit;
use crate::domain::time_frame_limits::apply_time_frames_limit;
use crate::ports::strategy_port::StrategyPort;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Exchanges,
    Symbols,
    TimeFrames,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Dimension::Exchanges => "exchanges",
            Dimension::Symbols => "symbols",
            Dimension::TimeFrames => "time frames",
        })
    }
}

#[derive(Debug)]
pub struct LimitFailure {
    pub dimension: Dimension,
    pub error: PlanLimitError,
}

#[derive(Debug, Default)]
pub struct LimitReport {
    /// One message per dimension that had to be trimmed, in enforcement order.
    pub warnings: Vec<String>,
    pub failures: Vec<LimitFailure>,
}

impl LimitReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty() && self.failures.is_empty()
    }

    fn record(&mut self, dimension: Dimension, outcome: Result<Option<String>, PlanLimitError>) {
        match outcome {
            Ok(Some(message)) => self.warnings.push(message),
            Ok(None) => {}
            Err(error) => {
                tracing::error!(
                    target: "planlimits::limits",
                    %dimension,
                    error = ?error,
                    "Error when applying limits: {error}"
                );
                self.failures.push(LimitFailure { dimension, error });
            }
        }
    }
}

pub fn apply_config_limits(
    config: &mut BotConfig,
    strategies: &mut dyn StrategyPort,
    limits: &PlanLimits,
) -> LimitReport {
    let mut report = LimitReport::default();

    if let Some(limit) = limits.exchanges.limit() {
        report.record(
            Dimension::Exchanges,
            Ok(apply_exchanges_limit(&mut config.exchanges, limit)),
        );
    }
    if let Some(limit) = limits.symbols.limit() {
        report.record(
            Dimension::Symbols,
            Ok(apply_symbols_limit(&mut config.crypto_currencies, limit)),
        );
    }
    if let Some(limit) = limits.time_frames.limit() {
        report.record(
            Dimension::TimeFrames,
            apply_time_frames_limit(config, strategies, limit),
        );
    }

    for message in &report.warnings {
        tracing::error!(target: "planlimits::limits", "{message}");
    }
    report
}
