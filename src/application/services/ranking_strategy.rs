//! # Ranking Strategy
//!
//! Scoring and ordering of flight records.
//!
//! A [`RankingStrategy`] assigns every record of a leg a best-value score
//! (lower is better). [`sort_flights`] then orders the leg by the field the
//! caller asked for.

use crate::domain::entities::Flight;
use crate::domain::value_objects::{SortField, SortOrder, SortSpec};
use rust_decimal::prelude::ToPrimitive;
use std::cmp::Ordering;
use std::fmt;

/// Trait for scoring strategies.
pub trait RankingStrategy: Send + Sync + fmt::Debug {
    /// Writes a best-value score onto every record of one leg.
    fn score(&self, flights: &mut [Flight]);

    /// Returns the name of this strategy.
    fn name(&self) -> &'static str;
}

/// Weighted price and duration score.
///
/// Both factors are min/max normalized over the leg, a zero range counting
/// as one:
///
/// ```text
/// score = price_weight * (price - min_price) / price_range
///       + duration_weight * (duration - min_duration) / duration_range
/// ```
///
/// The cheapest and shortest record scores 0.
#[derive(Debug, Clone)]
pub struct BestValueStrategy {
    /// Weight for the price factor.
    pub price_weight: f64,
    /// Weight for the duration factor.
    pub duration_weight: f64,
}

impl Default for BestValueStrategy {
    fn default() -> Self {
        Self {
            price_weight: 0.6,
            duration_weight: 0.4,
        }
    }
}

impl BestValueStrategy {
    /// Creates a strategy with custom weights.
    #[must_use]
    pub fn new(price_weight: f64, duration_weight: f64) -> Self {
        Self {
            price_weight,
            duration_weight,
        }
    }
}

impl RankingStrategy for BestValueStrategy {
    fn score(&self, flights: &mut [Flight]) {
        if flights.is_empty() {
            return;
        }

        let (min_price, max_price) = bounds(flights.iter().map(price_of));
        let (min_duration, max_duration) = bounds(flights.iter().map(duration_of));
        let price_range = non_zero(max_price - min_price);
        let duration_range = non_zero(max_duration - min_duration);

        for flight in flights.iter_mut() {
            let price_score = (price_of(flight) - min_price) / price_range;
            let duration_score = (duration_of(flight) - min_duration) / duration_range;
            flight.set_best_value_score(
                self.price_weight * price_score + self.duration_weight * duration_score,
            );
        }
    }

    fn name(&self) -> &'static str {
        "BestValue"
    }
}

fn price_of(flight: &Flight) -> f64 {
    flight.price().amount.to_f64().unwrap_or(0.0)
}

fn duration_of(flight: &Flight) -> f64 {
    flight.duration_minutes() as f64
}

fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

fn non_zero(range: f64) -> f64 {
    if range > 0.0 { range } else { 1.0 }
}

/// Stable sort of one leg by `sort`.
///
/// Descending order reverses the comparison, so records that compare equal
/// keep their relative order either way.
pub fn sort_flights(flights: &mut [Flight], sort: SortSpec) {
    let field = sort.field();
    match sort.order() {
        SortOrder::Asc => flights.sort_by(|a, b| compare(field, a, b)),
        SortOrder::Desc => flights.sort_by(|a, b| compare(field, a, b).reverse()),
    }
}

fn compare(field: SortField, a: &Flight, b: &Flight) -> Ordering {
    match field {
        SortField::Price => a.price().amount.cmp(&b.price().amount),
        SortField::Duration => a.duration_minutes().cmp(&b.duration_minutes()),
        SortField::Departure => a.departs_at().cmp(&b.departs_at()),
        SortField::Arrival => a.arrives_at().cmp(&b.arrives_at()),
        SortField::BestValue => a.best_value_score().total_cmp(&b.best_value_score()),
    }
}
