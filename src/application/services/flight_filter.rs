//! # Flight Filter
//!
//! Duration normalization and per-leg filtering.
//!
//! A record survives when it belongs to the leg (route, date, cabin) and
//! satisfies every populated [`FilterSet`] bound. String comparisons ignore
//! case.

use crate::domain::entities::Flight;
use crate::domain::value_objects::FilterSet;
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Route, date and cabin a record must match to belong to a leg.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegContext {
    /// Expected departure airport.
    pub origin: String,
    /// Expected arrival airport.
    pub destination: String,
    /// Expected departure calendar day.
    pub date: NaiveDate,
    /// Requested cabin class; empty matches any.
    pub cabin_class: String,
}

impl LegContext {
    /// Creates a leg context.
    #[must_use]
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        date: NaiveDate,
        cabin_class: impl Into<String>,
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            date,
            cabin_class: cabin_class.into(),
        }
    }

    /// Returns true if `flight` flies this leg.
    #[must_use]
    pub fn matches(&self, flight: &Flight) -> bool {
        if !flight.departure().airport.eq_ignore_ascii_case(&self.origin)
            || !flight.arrival().airport.eq_ignore_ascii_case(&self.destination)
        {
            return false;
        }
        let Some(departs_at) = flight.departs_at() else {
            return false;
        };
        if !flight.has_valid_schedule() {
            return false;
        }
        // Calendar day in the record's own offset.
        if departs_at.date_naive() != self.date {
            return false;
        }
        self.cabin_class.is_empty() || flight.cabin_class().eq_ignore_ascii_case(&self.cabin_class)
    }
}

/// Recomputes every record's duration from its timestamps where possible.
pub fn normalize_durations(flights: &mut [Flight]) {
    for flight in flights.iter_mut() {
        flight.normalize_duration();
    }
}

/// Keeps records that fly `leg` and satisfy `filters`.
#[must_use]
pub fn filter_flights(flights: Vec<Flight>, leg: &LegContext, filters: &FilterSet) -> Vec<Flight> {
    let airlines = filters.normalized_airlines();
    flights
        .into_iter()
        .filter(|flight| leg.matches(flight) && matches_filters(flight, filters, &airlines))
        .collect()
}

/// Returns true if `flight` satisfies every populated bound of `filters`.
///
/// `airlines` is the result of [`FilterSet::normalized_airlines`].
#[must_use]
pub fn matches_filters(flight: &Flight, filters: &FilterSet, airlines: &BTreeSet<String>) -> bool {
    matches_price(flight, filters)
        && matches_stops(flight, filters)
        && matches_duration(flight, filters)
        && matches_airline(flight, airlines)
        && matches_time(flight, filters)
}

fn matches_price(flight: &Flight, filters: &FilterSet) -> bool {
    let amount = flight.price().amount;
    filters.min_price.is_none_or(|min| amount >= min)
        && filters.max_price.is_none_or(|max| amount <= max)
}

fn matches_stops(flight: &Flight, filters: &FilterSet) -> bool {
    let stops = flight.stops();
    filters.stops.is_none_or(|exact| stops == exact)
        && filters.max_stops.is_none_or(|max| stops <= max)
}

fn matches_duration(flight: &Flight, filters: &FilterSet) -> bool {
    let minutes = flight.duration_minutes();
    filters.min_duration.is_none_or(|min| minutes >= min)
        && filters.max_duration.is_none_or(|max| minutes <= max)
}

fn matches_airline(flight: &Flight, airlines: &BTreeSet<String>) -> bool {
    if airlines.is_empty() {
        return true;
    }
    let airline = flight.airline();
    airlines.contains(&airline.name.to_lowercase()) || airlines.contains(&airline.code.to_lowercase())
}

fn matches_time(flight: &Flight, filters: &FilterSet) -> bool {
    let (Some(departs_at), Some(arrives_at)) = (flight.departs_at(), flight.arrives_at()) else {
        return false;
    };
    filters.depart_after.is_none_or(|bound| departs_at >= bound)
        && filters.depart_before.is_none_or(|bound| departs_at <= bound)
        && filters.arrive_after.is_none_or(|bound| arrives_at >= bound)
        && filters.arrive_before.is_none_or(|bound| arrives_at <= bound)
}
