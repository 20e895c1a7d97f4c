//! Ceiling on simultaneously enabled exchanges.

use crate::domain::bot_config::ExchangeEntry;
use crate::domain::limit_messages::exchanges_message;

/// Keeps the first `limit` enabled exchanges, in order, and disables the rest.
///
/// Returns `None` when the configuration already fits. Disabled entries are
/// never re-enabled.
pub fn apply_exchanges_limit(exchanges: &mut [ExchangeEntry], limit: usize) -> Option<String> {
    let enabled_keys: Vec<String> = exchanges
        .iter()
        .filter(|e| e.enabled)
        .map(ExchangeEntry::key)
        .collect();
    if enabled_keys.len() <= limit {
        return None;
    }
    tracing::debug!(
        target: "planlimits::limits",
        enabled = %enabled_keys.join(", "),
        limit,
        "too many enabled exchanges"
    );

    let mut retained: Vec<String> = Vec::with_capacity(limit);
    for exchange in exchanges.iter_mut().filter(|e| e.enabled) {
        if retained.len() < limit {
            retained.push(exchange.name.clone());
        } else {
            exchange.enabled = false;
            tracing::error!(target: "planlimits::limits", "Disabled {}", exchange.name);
        }
    }
    Some(exchanges_message(limit, &retained))
}
