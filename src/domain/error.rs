//! Domain error types.

use crate::domain::time_frame::ParseTimeFrameError;

/// Top-level error type for planlimits.
#[derive(Debug, thiserror::Error)]
pub enum PlanLimitError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("tentacles setup error: {reason}")]
    TentaclesSetup { reason: String },

    #[error("strategy {strategy}: {reason}")]
    Strategy { strategy: String, reason: String },

    #[error(transparent)]
    TimeFrame(#[from] ParseTimeFrameError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&PlanLimitError> for std::process::ExitCode {
    fn from(err: &PlanLimitError) -> Self {
        let code: u8 = match err {
            PlanLimitError::Io(_) => 1,
            PlanLimitError::ConfigParse { .. }
            | PlanLimitError::ConfigMissing { .. }
            | PlanLimitError::ConfigInvalid { .. } => 2,
            PlanLimitError::TentaclesSetup { .. } | PlanLimitError::Strategy { .. } => 3,
            PlanLimitError::TimeFrame(_) => 4,
        };
        std::process::ExitCode::from(code)
    }
}
