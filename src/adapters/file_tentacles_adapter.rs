//! INI-backed strategy registry.
//!
//! Each `[strategy:<Name>]` section carries `activated` and an optional
//! `time_frames` list. Strategies without their own list use the bot-wide
//! time frames. Updates stay in memory until [`FileTentaclesAdapter::save`].

use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::bot_config::BotConfig;
use crate::domain::config_validation::{section_name, STRATEGY_SECTION_PREFIX};
use crate::domain::error::PlanLimitError;
use crate::domain::time_frame::{join_time_frames, parse_time_frames, TimeFrame};
use crate::ports::config_port::ConfigPort;
use crate::ports::strategy_port::{StrategyPort, TentaclesSetup};
use std::path::{Path, PathBuf};

pub struct FileTentaclesAdapter {
    path: PathBuf,
    config: FileConfigAdapter,
    dirty: bool,
}

impl FileTentaclesAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PlanLimitError> {
        let path = path.as_ref().to_path_buf();
        let config =
            FileConfigAdapter::from_file(&path).map_err(|e| PlanLimitError::ConfigParse {
                file: path.display().to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self::new(path, config))
    }

    pub fn new(path: PathBuf, config: FileConfigAdapter) -> Self {
        Self {
            path,
            config,
            dirty: false,
        }
    }

    /// Registry with no strategies and no backing file; every setup lookup fails.
    pub fn empty() -> Self {
        Self::new(PathBuf::new(), FileConfigAdapter::empty())
    }

    pub fn config(&self) -> &FileConfigAdapter {
        &self.config
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Writes pending time frame updates back to the tentacles file.
    pub fn save(&mut self) -> Result<(), PlanLimitError> {
        if self.dirty {
            self.config.write_to(&self.path)?;
            tracing::info!(path = %self.path.display(), "saved tentacles config");
            self.dirty = false;
        }
        Ok(())
    }

    fn check_setup(&self, setup: &TentaclesSetup) -> Result<(), PlanLimitError> {
        if setup.config_path != self.path {
            return Err(PlanLimitError::TentaclesSetup {
                reason: format!(
                    "setup {} does not match loaded {}",
                    setup.config_path.display(),
                    self.path.display()
                ),
            });
        }
        Ok(())
    }

    fn section(strategy: &str) -> String {
        format!("{STRATEGY_SECTION_PREFIX}{strategy}")
    }
}

impl StrategyPort for FileTentaclesAdapter {
    fn tentacles_setup(&self, config: &BotConfig) -> Result<TentaclesSetup, PlanLimitError> {
        let config_path = config
            .tentacles_config
            .clone()
            .ok_or_else(|| PlanLimitError::TentaclesSetup {
                reason: "no tentacles configuration set".to_string(),
            })?;
        let setup = TentaclesSetup { config_path };
        self.check_setup(&setup)?;
        Ok(setup)
    }

    fn activated_strategies(&self, setup: &TentaclesSetup) -> Result<Vec<String>, PlanLimitError> {
        self.check_setup(setup)?;
        Ok(self
            .config
            .sections()
            .iter()
            .filter(|section| self.config.get_bool(section, "activated", false))
            .filter_map(|section| section_name(section, STRATEGY_SECTION_PREFIX))
            .map(str::to_string)
            .collect())
    }

    fn strategy_time_frames(
        &self,
        strategy: &str,
        config: &BotConfig,
        setup: &TentaclesSetup,
    ) -> Result<Vec<TimeFrame>, PlanLimitError> {
        self.check_setup(setup)?;
        match self.config.get_string(&Self::section(strategy), "time_frames") {
            Some(raw) => parse_time_frames(&raw).map_err(|e| PlanLimitError::Strategy {
                strategy: strategy.to_string(),
                reason: e.to_string(),
            }),
            None => Ok(config.time_frames.clone()),
        }
    }

    fn update_time_frames(
        &mut self,
        strategy: &str,
        setup: &TentaclesSetup,
        time_frames: &[TimeFrame],
    ) -> Result<(), PlanLimitError> {
        self.check_setup(setup)?;
        let section = Self::section(strategy);
        if self.config.get_string(&section, "activated").is_none() {
            return Err(PlanLimitError::Strategy {
                strategy: strategy.to_string(),
                reason: "unknown strategy".to_string(),
            });
        }
        self.config
            .set_string(&section, "time_frames", join_time_frames(time_frames));
        self.dirty = true;
        tracing::debug!(strategy, time_frames = %join_time_frames(time_frames), "updated strategy time frames");
        Ok(())
    }
}
