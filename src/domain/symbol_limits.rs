//! Ceiling on simultaneously traded pairs.

use crate::domain::bot_config::{CurrencyEntry, WILDCARD_SYMBOL};
use crate::domain::limit_messages::{symbols_message, wildcard_note};

/// Admits pairs first-seen-first across enabled currencies until `limit` is
/// reached.
///
/// A currency listing the wildcard pair is disabled as a whole: wildcard
/// expansion is never allowed while a ceiling applies. Currencies met once
/// the ceiling is full are disabled. A currency whose pairs were all rejected
/// stays enabled with an empty pair list.
pub fn apply_symbols_limit(currencies: &mut [CurrencyEntry], limit: usize) -> Option<String> {
    let mut accepted: Vec<String> = Vec::new();
    let mut has_disabled_symbols = false;
    let mut note = String::new();

    for currency in currencies.iter_mut().filter(|c| c.enabled) {
        if accepted.len() >= limit {
            currency.enabled = false;
            has_disabled_symbols = true;
            tracing::error!(
                target: "planlimits::limits",
                "Disabled all {} trading pairs",
                currency.name
            );
            continue;
        }

        let mut retained = Vec::with_capacity(currency.pairs.len());
        for symbol in &currency.pairs {
            if symbol == WILDCARD_SYMBOL {
                currency.enabled = false;
                has_disabled_symbols = true;
                note = wildcard_note(&currency.name);
                tracing::error!(
                    target: "planlimits::limits",
                    "Disabled wildcard symbol for {}",
                    currency.name
                );
                break;
            }
            if accepted.len() < limit {
                accepted.push(symbol.clone());
                retained.push(symbol.clone());
            } else {
                has_disabled_symbols = true;
                tracing::error!(
                    target: "planlimits::limits",
                    "Disabled {} trading pair from {}",
                    symbol,
                    currency.name
                );
            }
        }
        currency.pairs = retained;
    }

    if has_disabled_symbols {
        Some(symbols_message(&note, limit, &accepted))
    } else {
        None
    }
}
