//! Operator-facing warning texts produced when a plan ceiling is applied.

use crate::domain::time_frame::{join_time_frames, TimeFrame};

pub fn exchanges_message(limit: usize, retained: &[String]) -> String {
    format!(
        "Reached maximum allowed simultaneous exchanges for this plan, maximum is {limit}. \
         Your bot will trade on the following exchanges: {}",
        retained.join(", ")
    )
}

pub fn wildcard_note(currency: &str) -> String {
    format!("Disabled wildcard symbol for {currency}. ")
}

/// `wildcard_note` is prepended as-is; pass an empty string when no wildcard was dropped.
pub fn symbols_message(wildcard_note: &str, limit: usize, accepted: &[String]) -> String {
    format!(
        "{wildcard_note}Reached maximum allowed simultaneous trading pairs for this plan, \
         maximum is {limit}. Your bot will trade following pairs: {}.",
        accepted.join(", ")
    )
}

pub fn time_frames_message(limit: usize, aggregate: &[TimeFrame]) -> String {
    format!(
        "Reached maximum allowed simultaneous time frames for this plan, maximum is {limit}. \
         Your bot will trade using following time frames: {}.",
        join_time_frames(aggregate)
    )
}
