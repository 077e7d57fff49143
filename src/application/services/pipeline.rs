//! # Leg Pipeline
//!
//! Normalize, filter, deduplicate, score and sort the records of one leg.

use crate::application::services::deduplication::deduplicate;
use crate::application::services::flight_filter::{LegContext, filter_flights, normalize_durations};
use crate::application::services::ranking_strategy::{RankingStrategy, sort_flights};
use crate::domain::entities::Flight;
use crate::domain::value_objects::{FilterSet, SortSpec};

/// Turns raw provider records into the ranked result of one leg.
#[must_use]
pub fn process_leg(
    mut flights: Vec<Flight>,
    leg: &LegContext,
    filters: &FilterSet,
    ranking: &dyn RankingStrategy,
    sort: SortSpec,
) -> Vec<Flight> {
    normalize_durations(&mut flights);
    let mut flights = deduplicate(filter_flights(flights, leg, filters));
    ranking.score(&mut flights);
    sort_flights(&mut flights, sort);
    flights
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::application::services::ranking_strategy::BestValueStrategy;
    use crate::domain::entities::{Airline, Fare, FlightBuilder, FlightPoint};
    use crate::domain::value_objects::{SortField, SortOrder};
    use chrono::{DateTime, NaiveDate};
    use rust_decimal::Decimal;

    fn offer(provider: &str, number: &str, dep: &str, arr: &str, price: i64) -> Flight {
        FlightBuilder::new(
            provider,
            Airline::new("Garuda Indonesia", "GA"),
            number,
            FlightPoint::new("CGK", "Jakarta", Some(DateTime::parse_from_rfc3339(dep).unwrap())),
            FlightPoint::new("DPS", "Denpasar", Some(DateTime::parse_from_rfc3339(arr).unwrap())),
            Fare::idr(Decimal::from(price)),
        )
        .declared_duration(999)
        .cabin_class("economy")
        .build()
    }

    fn leg() -> LegContext {
        LegContext::new("CGK", "DPS", NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(), "economy")
    }

    #[test]
    fn duplicates_collapse_to_cheapest() {
        let flights = vec![
            offer("Garuda Indonesia", "GA400", "2024-06-01T06:00:00+07:00", "2024-06-01T08:50:00+08:00", 500_000),
            offer("Batik Air", "GA400", "2024-06-01T06:00:00+07:00", "2024-06-01T08:50:00+08:00", 450_000),
        ];

        let ranked = process_leg(flights, &leg(), &FilterSet::default(), &BestValueStrategy::default(), SortSpec::default());

        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].price().amount, Decimal::from(450_000));
        assert_eq!(ranked[0].duration_minutes(), 110);
        assert!(ranked[0].best_value_score().abs() < f64::EPSILON);
    }

    #[test]
    fn filters_run_before_scoring() {
        let flights = vec![
            offer("Garuda Indonesia", "GA400", "2024-06-01T06:00:00+07:00", "2024-06-01T08:50:00+08:00", 500_000),
            offer("Garuda Indonesia", "GA410", "2024-06-01T09:00:00+07:00", "2024-06-01T11:50:00+08:00", 2_000_000),
        ];
        let filters = FilterSet::default().with_max_price(Decimal::from(1_000_000));

        let ranked = process_leg(flights, &leg(), &filters, &BestValueStrategy::default(), SortSpec::default());

        // The excluded fare does not stretch the price range.
        assert_eq!(ranked.len(), 1);
        assert!(ranked[0].best_value_score().abs() < f64::EPSILON);
    }

    #[test]
    fn output_follows_requested_sort() {
        let flights = vec![
            offer("Garuda Indonesia", "GA400", "2024-06-01T06:00:00+07:00", "2024-06-01T08:50:00+08:00", 500_000),
            offer("Garuda Indonesia", "GA410", "2024-06-01T09:00:00+07:00", "2024-06-01T11:50:00+08:00", 700_000),
            offer("Garuda Indonesia", "GA420", "2024-06-01T12:00:00+07:00", "2024-06-01T14:50:00+08:00", 600_000),
        ];

        let ranked = process_leg(
            flights,
            &leg(),
            &FilterSet::default(),
            &BestValueStrategy::default(),
            SortSpec::new(SortField::Price, SortOrder::Desc),
        );

        let numbers: Vec<&str> = ranked.iter().map(Flight::flight_number).collect();
        assert_eq!(numbers, ["GA410", "GA420", "GA400"]);
    }
}
