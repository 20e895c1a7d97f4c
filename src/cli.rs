//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::file_tentacles_adapter::FileTentaclesAdapter;
use crate::domain::bot_config::{BotConfig, CurrencyEntry, ExchangeEntry, MarketType};
use crate::domain::config_limits::{apply_config_limits, LimitReport};
use crate::domain::config_validation::{
    read_ceiling, section_name, validate_bot_config, validate_tentacles_config, BOT_SECTION,
    CURRENCY_SECTION_PREFIX, EXCHANGE_SECTION_PREFIX,
};
use crate::domain::error::PlanLimitError;
use crate::domain::plan::{Ceiling, PlanLimits};
use crate::domain::time_frame::parse_time_frames;
use crate::ports::config_port::ConfigPort;

#[derive(Parser, Debug)]
#[command(name = "planlimits", about = "Trim a bot configuration down to its plan limits")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Enforce plan ceilings and write the trimmed configuration back
    Apply {
        #[arg(short, long)]
        config: PathBuf,
        /// Tentacles config, overrides [bot] tentacles_config
        #[arg(short, long)]
        tentacles: Option<PathBuf>,
        #[arg(long, allow_negative_numbers = true)]
        max_exchanges: Option<i64>,
        #[arg(long, allow_negative_numbers = true)]
        max_symbols: Option<i64>,
        #[arg(long, allow_negative_numbers = true)]
        max_time_frames: Option<i64>,
        /// Report what would be disabled without writing any file
        #[arg(long)]
        dry_run: bool,
    },
    /// Validate bot and tentacles configuration files
    Validate {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        tentacles: Option<PathBuf>,
    },
}

/// Ceiling overrides given on the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanOverrides {
    pub max_exchanges: Option<i64>,
    pub max_symbols: Option<i64>,
    pub max_time_frames: Option<i64>,
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Apply {
            config,
            tentacles,
            max_exchanges,
            max_symbols,
            max_time_frames,
            dry_run,
        } => {
            let overrides = PlanOverrides {
                max_exchanges,
                max_symbols,
                max_time_frames,
            };
            run_apply(&config, tentacles.as_deref(), overrides, dry_run)
        }
        Command::Validate { config, tentacles } => run_validate(&config, tentacles.as_deref()),
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, PlanLimitError> {
    FileConfigAdapter::from_file(path).map_err(|e| PlanLimitError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Reads the `[plan]` section. Missing keys are unlimited.
pub fn build_plan_limits(adapter: &dyn ConfigPort) -> Result<PlanLimits, PlanLimitError> {
    Ok(PlanLimits {
        exchanges: read_ceiling(adapter, "max_exchanges")?,
        symbols: read_ceiling(adapter, "max_symbols")?,
        time_frames: read_ceiling(adapter, "max_time_frames")?,
    })
}

pub fn apply_overrides(
    limits: PlanLimits,
    overrides: PlanOverrides,
) -> Result<PlanLimits, PlanLimitError> {
    let pick = |current: Ceiling, value: Option<i64>, flag: &str| match value {
        None => Ok(current),
        Some(v) => Ceiling::from_setting(v).map_err(|e| PlanLimitError::ConfigInvalid {
            section: "cli".to_string(),
            key: flag.to_string(),
            reason: e.to_string(),
        }),
    };
    Ok(PlanLimits {
        exchanges: pick(limits.exchanges, overrides.max_exchanges, "max-exchanges")?,
        symbols: pick(limits.symbols, overrides.max_symbols, "max-symbols")?,
        time_frames: pick(limits.time_frames, overrides.max_time_frames, "max-time-frames")?,
    })
}

/// Builds the configuration tree. A relative `[bot] tentacles_config` is
/// resolved against `base_dir`.
pub fn build_bot_config(
    adapter: &dyn ConfigPort,
    base_dir: &Path,
) -> Result<BotConfig, PlanLimitError> {
    let mut bot = BotConfig::default();

    for section in adapter.sections() {
        if let Some(name) = section_name(&section, EXCHANGE_SECTION_PREFIX) {
            let market_type = match adapter.get_string(&section, "market_type") {
                Some(raw) => {
                    raw.parse::<MarketType>()
                        .map_err(|reason| PlanLimitError::ConfigInvalid {
                            section: section.clone(),
                            key: "market_type".to_string(),
                            reason,
                        })?
                }
                None => MarketType::default(),
            };
            let mut entry = ExchangeEntry::new(name).with_market_type(market_type);
            entry.enabled = adapter.get_bool(&section, "enabled", true);
            bot.exchanges.push(entry);
        } else if let Some(name) = section_name(&section, CURRENCY_SECTION_PREFIX) {
            let pairs = adapter.get_string(&section, "pairs").unwrap_or_default();
            let mut entry = CurrencyEntry::new(name, split_list(&pairs));
            entry.enabled = adapter.get_bool(&section, "enabled", true);
            bot.crypto_currencies.push(entry);
        }
    }

    if let Some(raw) = adapter.get_string(BOT_SECTION, "time_frames") {
        bot.time_frames = parse_time_frames(&raw)?;
    }
    bot.tentacles_config = adapter
        .get_string(BOT_SECTION, "tentacles_config")
        .filter(|s| !s.trim().is_empty())
        .map(|s| base_dir.join(s.trim()));

    Ok(bot)
}

fn split_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Loads and validates everything `apply` and `validate` need.
pub fn load_setup(
    config_path: &Path,
    tentacles_override: Option<&Path>,
) -> Result<(FileConfigAdapter, BotConfig, FileTentaclesAdapter), PlanLimitError> {
    tracing::info!(path = %config_path.display(), "loading bot config");
    let adapter = load_config(config_path)?;
    validate_bot_config(&adapter)?;

    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));
    let mut bot = build_bot_config(&adapter, base_dir)?;
    if let Some(path) = tentacles_override {
        bot.tentacles_config = Some(path.to_path_buf());
    }

    let tentacles = match &bot.tentacles_config {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading tentacles config");
            let tentacles = FileTentaclesAdapter::from_file(path)?;
            validate_tentacles_config(tentacles.config())?;
            tentacles
        }
        None => FileTentaclesAdapter::empty(),
    };
    Ok((adapter, bot, tentacles))
}

fn run_apply(
    config_path: &Path,
    tentacles_override: Option<&Path>,
    overrides: PlanOverrides,
    dry_run: bool,
) -> ExitCode {
    let (mut adapter, mut bot, mut tentacles) = match load_setup(config_path, tentacles_override) {
        Ok(setup) => setup,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let limits = match build_plan_limits(&adapter).and_then(|l| apply_overrides(l, overrides)) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let report = enforce(&mut bot, &mut tentacles, &limits);
    for message in &report.warnings {
        println!("{message}");
    }

    if dry_run {
        eprintln!("Dry run: no file written");
    } else {
        adapter.store_bot_config(&bot);
        if let Err(e) = adapter
            .write_to(config_path)
            .map_err(PlanLimitError::from)
            .and_then(|()| tentacles.save())
        {
            eprintln!("error: {e}");
            return (&e).into();
        }
    }

    match report.failures.first() {
        Some(failure) => {
            eprintln!("error: {} limit not applied: {}", failure.dimension, failure.error);
            (&failure.error).into()
        }
        None => ExitCode::SUCCESS,
    }
}

/// Runs one enforcement pass against loaded configuration.
pub fn enforce(
    bot: &mut BotConfig,
    tentacles: &mut FileTentaclesAdapter,
    limits: &PlanLimits,
) -> LimitReport {
    tracing::info!(
        exchanges = %limits.exchanges,
        symbols = %limits.symbols,
        time_frames = %limits.time_frames,
        "applying plan limits"
    );
    apply_config_limits(bot, tentacles, limits)
}

fn run_validate(config_path: &Path, tentacles_override: Option<&Path>) -> ExitCode {
    let result = load_setup(config_path, tentacles_override).and_then(|(adapter, bot, _)| {
        build_plan_limits(&adapter).map(|limits| (limits, bot))
    });
    match result {
        Ok((limits, bot)) => {
            println!(
                "Config OK: {} exchanges, {} currencies, {} time frames",
                bot.exchanges.len(),
                bot.crypto_currencies.len(),
                bot.time_frames.len()
            );
            println!(
                "Plan: exchanges={} symbols={} time_frames={}",
                limits.exchanges, limits.symbols, limits.time_frames
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}
