//! End-to-end enforcement tests for the limit orchestrator.
//!
//! Tests cover:
//! - The reference scenarios for each dimension
//! - Best-effort behaviour when one dimension fails
//! - Ceiling, eviction-order and idempotence properties (proptest)

mod common;

use common::*;
use planlimits::domain::bot_config::{BotConfig, CurrencyEntry, ExchangeEntry};
use planlimits::domain::config_limits::{apply_config_limits, Dimension};
use planlimits::domain::plan::{Ceiling, PlanLimits};
use planlimits::domain::time_frame::sort_time_frames;
use planlimits::domain::time_frame::TimeFrame::*;
use proptest::prelude::*;
use std::collections::BTreeSet;

mod scenarios {
    use super::*;

    #[test]
    fn third_exchange_is_disabled() {
        let mut config = BotConfig {
            exchanges: exchanges(&["A", "B", "C"]),
            ..Default::default()
        };
        let limits = PlanLimits {
            exchanges: ceiling(2),
            ..PlanLimits::unlimited()
        };
        let report = apply_config_limits(&mut config, &mut MockStrategyPort::new(), &limits);

        assert_eq!(enabled_exchange_names(&config), vec!["A", "B"]);
        assert!(!config.exchanges[2].enabled);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("maximum is 2"));
        assert!(report.warnings[0].contains("A, B"));
    }

    #[test]
    fn currency_pairs_are_trimmed() {
        let mut config = BotConfig {
            crypto_currencies: vec![currency("BTC", &["BTC/USD", "BTC/EUR", "BTC/JPY"])],
            ..Default::default()
        };
        let limits = PlanLimits {
            symbols: ceiling(2),
            ..PlanLimits::unlimited()
        };
        let report = apply_config_limits(&mut config, &mut MockStrategyPort::new(), &limits);

        assert!(config.crypto_currencies[0].enabled);
        assert_eq!(config.crypto_currencies[0].pairs, vec!["BTC/USD", "BTC/EUR"]);
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn wildcard_currency_is_disabled() {
        let mut config = BotConfig {
            crypto_currencies: vec![currency("ETH", &["*"])],
            ..Default::default()
        };
        let limits = PlanLimits {
            symbols: ceiling(50),
            ..PlanLimits::unlimited()
        };
        let report = apply_config_limits(&mut config, &mut MockStrategyPort::new(), &limits);

        assert!(!config.crypto_currencies[0].enabled);
        assert!(report.warnings[0].contains("Disabled wildcard symbol for ETH."));
    }

    #[test]
    fn shortest_missing_time_frames_are_evicted() {
        let mut strategies = MockStrategyPort::new()
            .with_strategy("S1", &[OneMinute, OneHour])
            .with_strategy("S2", &[OneHour, OneDay, OneWeek]);
        let limits = PlanLimits {
            time_frames: ceiling(3),
            ..PlanLimits::unlimited()
        };
        let report = apply_config_limits(&mut BotConfig::default(), &mut strategies, &limits);

        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].ends_with("time frames: 1m, 1h, 1w."));
        assert_eq!(strategies.time_frames("S1"), vec![OneMinute, OneHour]);
        assert_eq!(strategies.time_frames("S2"), vec![OneHour, OneWeek]);
        assert_eq!(
            strategies.updates,
            vec![("S2".to_string(), vec![OneHour, OneWeek])]
        );
    }

    #[test]
    fn all_dimensions_report_in_order() {
        let mut config = BotConfig {
            exchanges: exchanges(&["binance", "kraken"]),
            crypto_currencies: vec![
                currency("Bitcoin", &["BTC/USDT"]),
                currency("Ethereum", &["ETH/USDT"]),
            ],
            ..Default::default()
        };
        let mut strategies =
            MockStrategyPort::new().with_strategy("Mixed", &[OneHour, FourHours]);
        let report = apply_config_limits(&mut config, &mut strategies, &plan(1, 1, 1));

        assert_eq!(report.warnings.len(), 3);
        assert!(report.warnings[0].contains("exchanges"));
        assert!(report.warnings[1].contains("trading pairs"));
        assert!(report.warnings[2].contains("time frames"));
        assert!(report.failures.is_empty());
        assert_eq!(strategies.time_frames("Mixed"), vec![FourHours]);
    }
}

mod failures {
    use super::*;

    #[test]
    fn tentacles_failure_keeps_other_dimensions() {
        let mut config = BotConfig {
            exchanges: exchanges(&["A", "B"]),
            crypto_currencies: vec![currency("BTC", &["BTC/USD", "BTC/EUR"])],
            ..Default::default()
        };
        let mut strategies = MockStrategyPort::new().with_setup_error("tentacles missing");
        let report = apply_config_limits(&mut config, &mut strategies, &plan(1, 1, 2));

        assert_eq!(report.warnings.len(), 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].dimension, Dimension::TimeFrames);
        assert_eq!(enabled_exchange_names(&config), vec!["A"]);
        assert_eq!(config.crypto_currencies[0].pairs, vec!["BTC/USD"]);
    }

    #[test]
    fn failing_strategy_keeps_earlier_updates() {
        let mut strategies = MockStrategyPort::new()
            .with_strategy("S1", &[OneMinute, OneHour, OneDay])
            .with_strategy("S2", &[OneHour])
            .with_failing_strategy("S2");
        let limits = PlanLimits {
            time_frames: ceiling(2),
            ..PlanLimits::unlimited()
        };
        let report = apply_config_limits(&mut BotConfig::default(), &mut strategies, &limits);

        assert!(report.warnings.is_empty());
        assert_eq!(report.failures.len(), 1);
        assert_eq!(strategies.time_frames("S1"), vec![OneHour, OneDay]);
    }

    #[test]
    fn unlimited_time_frames_never_touch_tentacles() {
        let mut strategies = MockStrategyPort::new().with_setup_error("tentacles missing");
        let limits = PlanLimits {
            exchanges: ceiling(5),
            symbols: ceiling(5),
            time_frames: Ceiling::Unlimited,
        };
        let report = apply_config_limits(&mut BotConfig::default(), &mut strategies, &limits);
        assert!(report.is_clean());
    }
}

mod properties {
    use super::*;

    fn time_frame_sets() -> impl Strategy<Value = Vec<Vec<TimeFrame>>> {
        prop::collection::vec(
            prop::sample::subsequence(TimeFrame::ALL.to_vec(), 0..7),
            1..5,
        )
    }

    fn build_exchanges(flags: &[bool]) -> Vec<ExchangeEntry> {
        flags
            .iter()
            .enumerate()
            .map(|(i, enabled)| {
                let entry = ExchangeEntry::new(format!("EX{i}"));
                if *enabled { entry } else { entry.disabled() }
            })
            .collect()
    }

    fn build_currencies(shapes: &[(bool, Vec<bool>)]) -> Vec<CurrencyEntry> {
        shapes
            .iter()
            .enumerate()
            .map(|(i, (enabled, pairs))| {
                let pairs: Vec<String> = pairs
                    .iter()
                    .enumerate()
                    .map(|(j, wildcard)| {
                        if *wildcard {
                            "*".to_string()
                        } else {
                            format!("C{i}/Q{j}")
                        }
                    })
                    .collect();
                let entry = CurrencyEntry::new(format!("C{i}"), pairs);
                if *enabled { entry } else { entry.disabled() }
            })
            .collect()
    }

    fn registry(sets: &[Vec<TimeFrame>]) -> MockStrategyPort {
        sets.iter()
            .enumerate()
            .fold(MockStrategyPort::new(), |port, (i, tfs)| {
                port.with_strategy(&format!("S{i}"), tfs)
            })
    }

    proptest! {
        #[test]
        fn exchanges_keep_first_enabled_entries(
            flags in prop::collection::vec(any::<bool>(), 0..10),
            limit in 1i64..6,
        ) {
            let mut config = BotConfig { exchanges: build_exchanges(&flags), ..Default::default() };
            let originally_enabled = enabled_exchange_names(&config);
            let limits = PlanLimits { exchanges: ceiling(limit), ..PlanLimits::unlimited() };
            apply_config_limits(&mut config, &mut MockStrategyPort::new(), &limits);

            let expected: Vec<String> =
                originally_enabled.into_iter().take(limit as usize).collect();
            prop_assert_eq!(enabled_exchange_names(&config), expected);
        }

        #[test]
        fn symbols_stay_under_ceiling(
            shapes in prop::collection::vec(
                (any::<bool>(), prop::collection::vec(prop::bool::weighted(0.15), 0..5)),
                0..6,
            ),
            limit in 1i64..8,
        ) {
            let mut config = BotConfig {
                crypto_currencies: build_currencies(&shapes),
                ..Default::default()
            };
            let limits = PlanLimits { symbols: ceiling(limit), ..PlanLimits::unlimited() };
            apply_config_limits(&mut config, &mut MockStrategyPort::new(), &limits);

            prop_assert!(config.enabled_symbols().len() <= limit as usize);
            for (currency, (_, pairs)) in config.crypto_currencies.iter().zip(&shapes) {
                if pairs.iter().any(|w| *w) {
                    prop_assert!(!currency.enabled);
                }
            }
        }

        #[test]
        fn time_frames_stay_under_ceiling(sets in time_frame_sets(), limit in 1i64..6) {
            let mut strategies = registry(&sets);
            let limits = PlanLimits { time_frames: ceiling(limit), ..PlanLimits::unlimited() };
            let report = apply_config_limits(&mut BotConfig::default(), &mut strategies, &limits);
            prop_assert!(report.failures.is_empty());

            let union: BTreeSet<TimeFrame> = strategies
                .strategies
                .iter()
                .flat_map(|(_, tfs)| tfs.iter().copied())
                .collect();
            prop_assert!(union.len() <= limit as usize);
            for ((_, retained), requested) in strategies.strategies.iter().zip(&sets) {
                prop_assert!(retained.iter().all(|tf| requested.contains(tf)));
            }
        }

        #[test]
        fn single_strategy_keeps_longest_time_frames(
            requested in prop::sample::subsequence(TimeFrame::ALL.to_vec(), 1..10),
            limit in 1i64..6,
        ) {
            let mut strategies = registry(&[requested.clone()]);
            let limits = PlanLimits { time_frames: ceiling(limit), ..PlanLimits::unlimited() };
            apply_config_limits(&mut BotConfig::default(), &mut strategies, &limits);

            let sorted = sort_time_frames(requested.iter().copied());
            let keep = sorted.len().min(limit as usize);
            prop_assert_eq!(strategies.time_frames("S0"), sorted[sorted.len() - keep..].to_vec());
        }

        #[test]
        fn second_pass_changes_nothing(
            flags in prop::collection::vec(any::<bool>(), 0..6),
            shapes in prop::collection::vec(
                (any::<bool>(), prop::collection::vec(prop::bool::weighted(0.15), 0..4)),
                0..5,
            ),
            sets in time_frame_sets(),
            limits in (1i64..4, 1i64..6, 1i64..5),
        ) {
            let mut config = BotConfig {
                exchanges: build_exchanges(&flags),
                crypto_currencies: build_currencies(&shapes),
                ..Default::default()
            };
            let mut strategies = registry(&sets);
            let limits = plan(limits.0, limits.1, limits.2);

            apply_config_limits(&mut config, &mut strategies, &limits);
            let config_after_first = config.clone();
            let strategies_after_first = strategies.strategies.clone();
            let updates_after_first = strategies.updates.len();

            let report = apply_config_limits(&mut config, &mut strategies, &limits);
            prop_assert!(report.is_clean());
            prop_assert_eq!(config, config_after_first);
            prop_assert_eq!(&strategies.strategies, &strategies_after_first);
            prop_assert_eq!(strategies.updates.len(), updates_after_first);
        }
    }
}
