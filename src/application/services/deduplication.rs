//! # Deduplication
//!
//! Collapses records for the same physical flight offered by several
//! providers.
//!
//! Two records describe the same flight when their [`dedup_key`] matches.
//! The cheapest record wins; on equal price the record from the
//! lexicographically smallest provider name wins. Output order follows the
//! first appearance of each key.

use crate::domain::entities::Flight;
use chrono::{DateTime, FixedOffset, SecondsFormat};
use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// Builds the identity key of a record.
///
/// Lowercase `|`-join of airline code, flight number, departure airport,
/// arrival airport and both timestamps in RFC 3339. Cabin class and currency
/// are not part of the key.
#[must_use]
pub fn dedup_key(flight: &Flight) -> String {
    [
        flight.airline().code.as_str(),
        flight.flight_number(),
        flight.departure().airport.as_str(),
        flight.arrival().airport.as_str(),
        &rfc3339(flight.departs_at()),
        &rfc3339(flight.arrives_at()),
    ]
    .join("|")
    .to_lowercase()
}

/// Returns true if `candidate` should replace `current`.
#[must_use]
pub fn is_preferred(candidate: &Flight, current: &Flight) -> bool {
    let (candidate_price, current_price) = (candidate.price().amount, current.price().amount);
    candidate_price < current_price
        || (candidate_price == current_price && candidate.provider() < current.provider())
}

/// Keeps one record per [`dedup_key`].
#[must_use]
pub fn deduplicate(flights: Vec<Flight>) -> Vec<Flight> {
    let mut slots: HashMap<String, usize> = HashMap::with_capacity(flights.len());
    let mut unique: Vec<Flight> = Vec::with_capacity(flights.len());

    for flight in flights {
        match slots.entry(dedup_key(&flight)) {
            Entry::Vacant(entry) => {
                entry.insert(unique.len());
                unique.push(flight);
            }
            Entry::Occupied(entry) => {
                if let Some(current) = unique.get_mut(*entry.get()) {
                    if is_preferred(&flight, current) {
                        *current = flight;
                    }
                }
            }
        }
    }

    unique
}

fn rfc3339(value: Option<DateTime<FixedOffset>>) -> String {
    value
        .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, false))
        .unwrap_or_default()
}
