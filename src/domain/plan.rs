//! Plan ceilings.

use std::fmt;
use std::num::NonZeroUsize;

/// Setting value meaning "no ceiling".
pub const UNLIMITED_ALLOWED: i64 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("ceiling must be -1 (unlimited) or at least 1, got {0}")]
pub struct InvalidCeiling(pub i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ceiling {
    #[default]
    Unlimited,
    Max(NonZeroUsize),
}

impl Ceiling {
    /// Builds a ceiling from a raw setting. Zero and negative values other
    /// than the unlimited sentinel are rejected.
    pub fn from_setting(value: i64) -> Result<Self, InvalidCeiling> {
        if value == UNLIMITED_ALLOWED {
            return Ok(Ceiling::Unlimited);
        }
        usize::try_from(value)
            .ok()
            .and_then(NonZeroUsize::new)
            .map(Ceiling::Max)
            .ok_or(InvalidCeiling(value))
    }

    pub fn limit(&self) -> Option<usize> {
        match self {
            Ceiling::Unlimited => None,
            Ceiling::Max(n) => Some(n.get()),
        }
    }
}

impl fmt::Display for Ceiling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ceiling::Unlimited => f.write_str("unlimited"),
            Ceiling::Max(n) => write!(f, "{n}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlanLimits {
    pub exchanges: Ceiling,
    pub symbols: Ceiling,
    pub time_frames: Ceiling,
}

impl PlanLimits {
    pub fn unlimited() -> Self {
        Self::default()
    }
}
