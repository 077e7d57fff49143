//! End-to-end searches through simulated, rate-limited providers.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use chrono::{DateTime, NaiveDate};
use flight_aggregator::application::services::BestValueStrategy;
use flight_aggregator::infrastructure::providers::{SeededRandom, SimulatedProvider};
use flight_aggregator::prelude::*;
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures").join(name)
}

fn rng(seed: u64) -> Arc<SeededRandom> {
    Arc::new(SeededRandom::new(seed))
}

fn limited(provider: SimulatedProvider) -> Arc<dyn FlightProvider> {
    Arc::new(RateLimitedProvider::new(
        Arc::new(provider),
        Duration::from_millis(100),
    ))
}

fn ga400(provider: &str, price: i64) -> Flight {
    FlightBuilder::new(
        provider,
        Airline::new("Garuda Indonesia", "GA"),
        "GA400",
        FlightPoint::new(
            "CGK",
            "Jakarta",
            Some(DateTime::parse_from_rfc3339("2024-06-01T06:00:00+07:00").unwrap()),
        ),
        FlightPoint::new(
            "DPS",
            "Denpasar",
            Some(DateTime::parse_from_rfc3339("2024-06-01T08:50:00+08:00").unwrap()),
        ),
        Fare::idr(Decimal::from(price)),
    )
    .declared_duration(110)
    .cabin_class("economy")
    .build()
}

fn fixture_providers() -> Vec<Arc<dyn FlightProvider>> {
    [
        ("garuda_indonesia.json", "Garuda Indonesia"),
        ("lion_air.json", "Lion Air"),
        ("batik_air.json", "Batik Air"),
        ("airasia.json", "AirAsia"),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (file, name))| {
        let provider = SimulatedProvider::from_json_file(name, fixture(file), rng(i as u64))
            .unwrap()
            .with_latency_ms(50, 150);
        limited(provider)
    })
    .collect()
}

fn december(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 12, day).unwrap()
}

#[tokio::test(start_paused = true)]
async fn same_flight_from_two_providers_keeps_cheapest() {
    let garuda = SimulatedProvider::new("Garuda Indonesia", vec![ga400("Garuda Indonesia", 500_000)], rng(1));
    let batik = SimulatedProvider::new("Batik Air", vec![ga400("Batik Air", 450_000)], rng(2));
    let use_case = SearchFlights::with_defaults(vec![limited(garuda), limited(batik)]);
    let criteria = SearchCriteria::builder("CGK", "DPS", NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
        .build()
        .unwrap();

    let outcome = use_case.search(&criteria).await.unwrap();

    assert_eq!(outcome.flights.len(), 1);
    assert_eq!(outcome.flights[0].price().amount, Decimal::from(450_000));
    assert_eq!(outcome.flights[0].provider().as_str(), "Batik Air");
    assert_eq!(outcome.metadata.total_results, 1);
    assert_eq!(outcome.metadata.providers_queried, 2);
    assert_eq!(outcome.metadata.providers_succeeded, 2);
    assert_eq!(outcome.metadata.providers_failed, 0);
    assert!(!outcome.metadata.cache_hit);
}

#[tokio::test(start_paused = true)]
async fn fixtures_round_trip_search() {
    let use_case = SearchFlights::with_defaults(fixture_providers());
    let criteria = SearchCriteria::builder("CGK", "DPS", december(15))
        .return_date(december(20))
        .build()
        .unwrap();

    let outcome = use_case.search(&criteria).await.unwrap();

    assert_eq!(outcome.metadata.providers_succeeded, 4);
    // The CGK-SUB record, the business fare and the duplicate GA400 drop out.
    assert_eq!(outcome.flights.len(), 9);
    assert_eq!(outcome.return_flights.len(), 4);
    assert_eq!(outcome.metadata.total_results, 13);

    let ga400 = outcome
        .flights
        .iter()
        .find(|f| f.flight_number() == "GA400")
        .unwrap();
    assert_eq!(ga400.provider().as_str(), "Batik Air");
    assert_eq!(ga400.price().amount, Decimal::from(1_190_000));

    let scores: Vec<f64> = outcome.flights.iter().map(Flight::best_value_score).collect();
    assert!(scores.windows(2).all(|w| w[0] <= w[1]));
    assert!(scores.iter().all(|s| (0.0..=1.0).contains(s)));
}

#[tokio::test(start_paused = true)]
async fn fixture_durations_are_recomputed_from_timestamps() {
    let use_case = SearchFlights::with_defaults(fixture_providers());
    let criteria = SearchCriteria::builder("CGK", "DPS", december(15))
        .sort(SortSpec::parse("duration", "desc"))
        .build()
        .unwrap();

    let outcome = use_case.search(&criteria).await.unwrap();

    // JT742 declares 0 minutes; its timestamps span 4h 35m.
    let jt742 = outcome
        .flights
        .iter()
        .find(|f| f.flight_number() == "JT742")
        .unwrap();
    assert_eq!(jt742.duration_minutes(), 275);
    assert_eq!(outcome.flights[0].flight_number(), "QZ7520");
}

#[tokio::test(start_paused = true)]
async fn filters_narrow_fixture_results() {
    let use_case = SearchFlights::with_defaults(fixture_providers());
    let filters = FilterSet::default()
        .with_max_stops(0)
        .with_max_price(Decimal::from(1_100_000))
        .with_airlines(["lion air", "ID"]);
    let criteria = SearchCriteria::builder("CGK", "DPS", december(15))
        .filters(filters)
        .sort(SortSpec::parse("price", "asc"))
        .build()
        .unwrap();

    let outcome = use_case.search(&criteria).await.unwrap();

    let numbers: Vec<&str> = outcome.flights.iter().map(Flight::flight_number).collect();
    assert_eq!(numbers, ["JT740", "ID6520", "ID6514"]);
}

#[tokio::test(start_paused = true)]
async fn repeated_search_is_served_from_cache() {
    let use_case = SearchFlights::with_defaults(fixture_providers());
    let criteria = SearchCriteria::builder("cgk", "dps", december(15)).build().unwrap();

    let first = use_case.search(&criteria).await.unwrap();
    let second = use_case.search(&criteria).await.unwrap();

    assert!(!first.metadata.cache_hit);
    assert!(second.metadata.cache_hit);
    assert!(first.metadata.search_time_ms >= 50);
    assert!(second.metadata.search_time_ms < first.metadata.search_time_ms);
    assert_eq!(second.flights, first.flights);
    assert_eq!(second.criteria, first.criteria);

    let replayed = SearchMetadata {
        cache_hit: false,
        search_time_ms: first.metadata.search_time_ms,
        ..second.metadata.clone()
    };
    assert_eq!(replayed, first.metadata);
}

#[tokio::test(start_paused = true)]
async fn always_failing_provider_is_reported() {
    let broken = SimulatedProvider::new("Lion Air", vec![ga400("Lion Air", 400_000)], rng(3))
        .with_failure_rate(1.0);
    let healthy = SimulatedProvider::new("Garuda Indonesia", vec![ga400("Garuda Indonesia", 500_000)], rng(4));
    let use_case = SearchFlights::with_defaults(vec![limited(broken), limited(healthy)]);
    let criteria = SearchCriteria::builder("CGK", "DPS", NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
        .build()
        .unwrap();

    let outcome = use_case.search(&criteria).await.unwrap();

    assert_eq!(outcome.metadata.failed_providers, ["Lion Air"]);
    assert_eq!(outcome.metadata.providers_failed, 1);
    assert_eq!(outcome.flights.len(), 1);
    assert_eq!(outcome.flights[0].price().amount, Decimal::from(500_000));
}

#[tokio::test(start_paused = true)]
async fn slow_provider_is_cut_off_by_its_deadline() {
    let slow = SimulatedProvider::new("Batik Air", vec![ga400("Batik Air", 450_000)], rng(5))
        .with_latency_ms(3_000, 3_000);
    let fast = SimulatedProvider::new("Garuda Indonesia", vec![ga400("Garuda Indonesia", 500_000)], rng(6));
    let use_case = SearchFlights::with_defaults(vec![limited(slow), limited(fast)]);
    let criteria = SearchCriteria::builder("CGK", "DPS", NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
        .build()
        .unwrap();

    let outcome = use_case.search(&criteria).await.unwrap();

    assert_eq!(outcome.metadata.failed_providers, ["Batik Air"]);
    assert_eq!(outcome.flights[0].price().amount, Decimal::from(500_000));
}
