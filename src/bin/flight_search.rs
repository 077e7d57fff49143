//! `flight-search`: runs one aggregated search against the simulated
//! providers and prints the outcome.
//!
//! Providers are loaded from JSON fixtures in `--fixtures` (one file per
//! airline), each behind its own rate limiter.

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, NaiveDate};
use clap::{Parser, ValueEnum};
use flight_aggregator::api::{OutcomeView, format_duration, format_idr};
use flight_aggregator::application::services::BestValueStrategy;
use flight_aggregator::infrastructure::config::AggregatorSettings;
use flight_aggregator::infrastructure::providers::{SimulatedProvider, ThreadRandom};
use flight_aggregator::infrastructure::telemetry::{LogFormat, init_tracing};
use flight_aggregator::prelude::*;
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::signal;

/// Fixture file, provider name, latency range in ms and transient failure rate.
const PROVIDERS: [(&str, &str, u64, u64, f64); 4] = [
    ("garuda_indonesia.json", "Garuda Indonesia", 50, 100, 0.0),
    ("lion_air.json", "Lion Air", 100, 200, 0.0),
    ("batik_air.json", "Batik Air", 200, 400, 0.0),
    ("airasia.json", "AirAsia", 50, 150, 0.1),
];

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Output {
    Json,
    Table,
}

#[derive(Parser, Debug)]
#[command(name = "flight-search", about = "Aggregated flight search over simulated providers")]
struct Cli {
    /// Origin airport code.
    #[arg(long)]
    origin: String,

    /// Destination airport code.
    #[arg(long)]
    destination: String,

    /// Departure date (YYYY-MM-DD).
    #[arg(long)]
    date: NaiveDate,

    /// Return date (YYYY-MM-DD) for a round trip.
    #[arg(long)]
    return_date: Option<NaiveDate>,

    /// Passenger count.
    #[arg(long, default_value_t = 1)]
    passengers: u32,

    /// Cabin class.
    #[arg(long, default_value = "economy")]
    cabin_class: String,

    /// Minimum fare.
    #[arg(long)]
    min_price: Option<Decimal>,

    /// Maximum fare.
    #[arg(long)]
    max_price: Option<Decimal>,

    /// Exact number of stops.
    #[arg(long)]
    stops: Option<u32>,

    /// Maximum number of stops.
    #[arg(long)]
    max_stops: Option<u32>,

    /// Minimum duration in minutes.
    #[arg(long)]
    min_duration: Option<i64>,

    /// Maximum duration in minutes.
    #[arg(long)]
    max_duration: Option<i64>,

    /// Allowed airlines by name or code, comma separated.
    #[arg(long, value_delimiter = ',')]
    airlines: Vec<String>,

    /// Earliest departure, `HH:MM` on the departure date or RFC 3339.
    #[arg(long)]
    depart_after: Option<String>,

    /// Latest departure, `HH:MM` on the departure date or RFC 3339.
    #[arg(long)]
    depart_before: Option<String>,

    /// Earliest arrival, `HH:MM` on the departure date or RFC 3339.
    #[arg(long)]
    arrive_after: Option<String>,

    /// Latest arrival, `HH:MM` on the departure date or RFC 3339.
    #[arg(long)]
    arrive_before: Option<String>,

    /// UTC offset applied to `HH:MM` time filters.
    #[arg(long, default_value = "+07:00")]
    utc_offset: FixedOffset,

    /// Sort field: price, duration, departure, arrival or best_value.
    #[arg(long, default_value = "best_value")]
    sort: String,

    /// Sort order: asc or desc.
    #[arg(long, default_value = "asc")]
    order: String,

    /// Directory holding the provider fixtures.
    #[arg(long, default_value = "fixtures")]
    fixtures: PathBuf,

    /// Optional settings file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = Output::Json)]
    output: Output,

    /// Emit logs as JSON lines.
    #[arg(long, default_value_t = false)]
    json_logs: bool,

    /// Run the same search this many times to exercise the cache.
    #[arg(long, default_value_t = 1)]
    repeat: u32,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(if cli.json_logs { LogFormat::Json } else { LogFormat::Pretty })?;
    let settings = AggregatorSettings::load(cli.config.as_deref())?;

    let providers = load_providers(&cli.fixtures, &settings)?;
    let use_case = SearchFlights::new(
        providers,
        Arc::new(TtlCache::new(SearchOutcome::clone)),
        Arc::new(BestValueStrategy::default()),
        settings.aggregation_config(),
    );

    let criteria = build_criteria(&cli)?;

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            on_signal.cancel();
        }
    });

    for _ in 0..cli.repeat.max(1) {
        let outcome = use_case.search_with_cancellation(&criteria, &cancel).await?;
        match cli.output {
            Output::Json => {
                let view = OutcomeView::from(&outcome);
                println!("{}", serde_json::to_string_pretty(&view)?);
            }
            Output::Table => print_table(&outcome),
        }
    }

    Ok(())
}

fn load_providers(dir: &Path, settings: &AggregatorSettings) -> Result<Vec<Arc<dyn FlightProvider>>> {
    let rng = Arc::new(ThreadRandom);
    PROVIDERS
        .iter()
        .map(|&(file, name, min_ms, max_ms, failure_rate)| {
            let path = dir.join(file);
            let provider = SimulatedProvider::from_json_file(name, &path, rng.clone())
                .with_context(|| format!("loading {}", path.display()))?
                .with_latency_ms(min_ms, max_ms)
                .with_failure_rate(failure_rate);
            let limited = RateLimitedProvider::new(Arc::new(provider), settings.rate_limit());
            Ok(Arc::new(limited) as Arc<dyn FlightProvider>)
        })
        .collect()
}

fn build_criteria(cli: &Cli) -> Result<SearchCriteria> {
    let time = |value: &Option<String>| -> Result<Option<DateTime<FixedOffset>>> {
        value
            .as_deref()
            .map(|v| parse_time_filter(v, cli.date, cli.utc_offset))
            .transpose()
    };

    let filters = FilterSet {
        min_price: cli.min_price,
        max_price: cli.max_price,
        stops: cli.stops,
        max_stops: cli.max_stops,
        min_duration: cli.min_duration,
        max_duration: cli.max_duration,
        airlines: cli.airlines.clone(),
        depart_after: time(&cli.depart_after)?,
        depart_before: time(&cli.depart_before)?,
        arrive_after: time(&cli.arrive_after)?,
        arrive_before: time(&cli.arrive_before)?,
    };

    let mut builder = SearchCriteria::builder(&cli.origin, &cli.destination, cli.date)
        .passengers(cli.passengers)
        .cabin_class(&cli.cabin_class)
        .filters(filters)
        .sort(SortSpec::parse(&cli.sort, &cli.order));
    if let Some(return_date) = cli.return_date {
        builder = builder.return_date(return_date);
    }
    Ok(builder.build()?)
}

fn parse_time_filter(value: &str, date: NaiveDate, offset: FixedOffset) -> Result<DateTime<FixedOffset>> {
    if value.len() == 5 && value.contains(':') {
        return Ok(FilterSet::anchor_time_of_day(date, value, offset)?);
    }
    DateTime::parse_from_rfc3339(value).with_context(|| format!("invalid time filter {value:?}"))
}

fn print_table(outcome: &SearchOutcome) {
    let meta = &outcome.metadata;
    println!(
        "{} -> {} on {}: {} results, {}/{} providers, {} ms{}",
        outcome.criteria.origin,
        outcome.criteria.destination,
        outcome.criteria.departure_date,
        meta.total_results,
        meta.providers_succeeded,
        meta.providers_queried,
        meta.search_time_ms,
        if meta.cache_hit { " (cached)" } else { "" },
    );
    if !meta.failed_providers.is_empty() {
        println!("failed: {}", meta.failed_providers.join(", "));
    }
    print_leg("Outbound", &outcome.flights);
    if !outcome.return_flights.is_empty() {
        print_leg("Return", &outcome.return_flights);
    }
}

fn print_leg(title: &str, flights: &[Flight]) {
    println!("\n{title}");
    println!(
        "{:<18} {:<8} {:<6} {:<6} {:>8} {:>5} {:>16} {:>6}",
        "Airline", "Flight", "From", "To", "Duration", "Stops", "Price", "Score"
    );
    for flight in flights {
        println!(
            "{:<18} {:<8} {:<6} {:<6} {:>8} {:>5} {:>16} {:>6.3}",
            flight.airline().name,
            flight.flight_number(),
            flight.departure().airport,
            flight.arrival().airport,
            format_duration(flight.duration_minutes()),
            flight.stops(),
            format_idr(flight.price().amount),
            flight.best_value_score(),
        );
    }
}
