//! Ceiling on distinct time frames across activated strategies.
//!
//! Strategies are merged in activation order into a running aggregate. Once a
//! strategy's requirement no longer fits, only its longest missing time frames
//! are admitted into the remaining capacity, and from then on every strategy
//! is trimmed down to the aggregate and its updated selection persisted.

use crate::domain::bot_config::BotConfig;
use crate::domain::error::PlanLimitError;
use crate::domain::limit_messages::time_frames_message;
use crate::domain::time_frame::{sort_time_frames, TimeFrame};
use crate::ports::strategy_port::StrategyPort;
use std::cmp::Ordering;
use std::collections::BTreeSet;

pub fn apply_time_frames_limit(
    config: &BotConfig,
    strategies: &mut dyn StrategyPort,
    limit: usize,
) -> Result<Option<String>, PlanLimitError> {
    let setup = strategies.tentacles_setup(config)?;
    let mut aggregate: BTreeSet<TimeFrame> = BTreeSet::new();
    let mut has_disabled_time_frames = false;

    for strategy in strategies.activated_strategies(&setup)? {
        let requested = unique(strategies.strategy_time_frames(&strategy, config, &setup)?);
        let combined: BTreeSet<TimeFrame> =
            aggregate.iter().chain(requested.iter()).copied().collect();

        match combined.len().cmp(&limit) {
            Ordering::Less | Ordering::Equal => aggregate = combined,
            Ordering::Greater => {
                has_disabled_time_frames = true;
                let capacity = limit.saturating_sub(aggregate.len());
                if capacity > 0 {
                    // shortest time frames are evicted first
                    let missing = sort_time_frames(
                        requested
                            .iter()
                            .filter(|tf| !aggregate.contains(*tf))
                            .copied(),
                    );
                    let admitted = &missing[missing.len().saturating_sub(capacity)..];
                    aggregate.extend(admitted.iter().copied());
                }
            }
        }

        if has_disabled_time_frames {
            let retained = sort_time_frames(
                requested
                    .iter()
                    .filter(|tf| aggregate.contains(*tf))
                    .copied(),
            );
            let mut should_update_config = false;
            for time_frame in requested.iter().filter(|tf| !aggregate.contains(*tf)) {
                should_update_config = true;
                tracing::error!(
                    target: "planlimits::limits",
                    "Disabled {} time frame for {}",
                    time_frame,
                    strategy
                );
            }
            if should_update_config {
                strategies.update_time_frames(&strategy, &setup, &retained)?;
            }
        }
    }

    if has_disabled_time_frames {
        let aggregate: Vec<TimeFrame> = aggregate.into_iter().collect();
        Ok(Some(time_frames_message(limit, &aggregate)))
    } else {
        Ok(None)
    }
}

fn unique(time_frames: Vec<TimeFrame>) -> Vec<TimeFrame> {
    let mut seen = BTreeSet::new();
    time_frames.into_iter().filter(|tf| seen.insert(*tf)).collect()
}
