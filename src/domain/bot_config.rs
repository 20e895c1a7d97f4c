//! In-memory bot configuration tree mutated by the limiters.
//!
//! Exchanges and currencies are kept in file order; limiters rely on that order
//! to decide which entries survive.

use crate::domain::time_frame::TimeFrame;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Pair token meaning "every pair of this currency".
pub const WILDCARD_SYMBOL: &str = "*";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarketType {
    #[default]
    Spot,
    Margin,
    Future,
}

impl MarketType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarketType::Spot => "spot",
            MarketType::Margin => "margin",
            MarketType::Future => "future",
        }
    }
}

impl fmt::Display for MarketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MarketType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "spot" => Ok(MarketType::Spot),
            "margin" => Ok(MarketType::Margin),
            "future" | "futures" => Ok(MarketType::Future),
            other => Err(format!("unknown market type: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeEntry {
    pub name: String,
    pub enabled: bool,
    pub market_type: MarketType,
}

impl ExchangeEntry {
    /// Enabled spot entry.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enabled: true,
            market_type: MarketType::Spot,
        }
    }

    pub fn with_market_type(mut self, market_type: MarketType) -> Self {
        self.market_type = market_type;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Counting key, e.g. `binance[spot]`.
    pub fn key(&self) -> String {
        format!("{}[{}]", self.name, self.market_type)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyEntry {
    pub name: String,
    pub enabled: bool,
    pub pairs: Vec<String>,
}

impl CurrencyEntry {
    pub fn new<I, S>(name: impl Into<String>, pairs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            enabled: true,
            pairs: pairs.into_iter().map(Into::into).collect(),
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BotConfig {
    pub exchanges: Vec<ExchangeEntry>,
    pub crypto_currencies: Vec<CurrencyEntry>,
    /// Bot-wide time frames, used by strategies that declare none.
    pub time_frames: Vec<TimeFrame>,
    pub tentacles_config: Option<PathBuf>,
}

impl BotConfig {
    pub fn enabled_exchanges(&self) -> impl Iterator<Item = &ExchangeEntry> {
        self.exchanges.iter().filter(|e| e.enabled)
    }

    pub fn enabled_currencies(&self) -> impl Iterator<Item = &CurrencyEntry> {
        self.crypto_currencies.iter().filter(|c| c.enabled)
    }

    /// Pairs of every enabled currency, in order.
    pub fn enabled_symbols(&self) -> Vec<&str> {
        self.enabled_currencies()
            .flat_map(|c| c.pairs.iter().map(String::as_str))
            .collect()
    }
}
