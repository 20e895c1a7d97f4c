//! INI file configuration adapter.
//!
//! Sections are kept in file order and names are case sensitive, so the
//! exchange and currency order seen by the limiters is the order written by
//! the operator.

use crate::domain::bot_config::BotConfig;
use crate::domain::config_validation::{
    parse_bool, CURRENCY_SECTION_PREFIX, EXCHANGE_SECTION_PREFIX,
};
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn empty() -> Self {
        Self {
            config: Ini::new_cs(),
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let mut config = Ini::new_cs();
        config.load(path).map_err(std::io::Error::other)?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new_cs();
        config.read(content.to_string())?;
        Ok(Self { config })
    }

    pub fn set_string(&mut self, section: &str, key: &str, value: impl Into<String>) {
        self.config.set(section, key, Some(value.into()));
    }

    /// Copies enabled flags and pair lists from `bot` back into the document.
    pub fn store_bot_config(&mut self, bot: &BotConfig) {
        for exchange in &bot.exchanges {
            let section = format!("{EXCHANGE_SECTION_PREFIX}{}", exchange.name);
            self.set_string(&section, "enabled", exchange.enabled.to_string());
        }
        for currency in &bot.crypto_currencies {
            let section = format!("{CURRENCY_SECTION_PREFIX}{}", currency.name);
            self.set_string(&section, "enabled", currency.enabled.to_string());
            self.set_string(&section, "pairs", currency.pairs.join(", "));
        }
    }

    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        self.config.write(path)
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.config
            .get(section, key)
            .as_deref()
            .and_then(parse_bool)
            .unwrap_or(default)
    }

    fn sections(&self) -> Vec<String> {
        self.config.sections()
    }
}
