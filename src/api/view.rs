//! # Presentation Views
//!
//! Serializable views of a [`SearchOutcome`] for display: durations and
//! fares are formatted, timestamps carry both RFC 3339 and Unix forms.

use crate::api::format::{format_duration, format_idr};
use crate::application::dto::{CriteriaEcho, SearchMetadata, SearchOutcome};
use crate::domain::entities::{Airline, Baggage, Flight, FlightPoint};
use rust_decimal::Decimal;
use serde::Serialize;

/// Display view of a search outcome.
#[derive(Debug, Clone, Serialize)]
pub struct OutcomeView {
    /// Criteria echo.
    pub search_criteria: CriteriaEcho,
    /// Call statistics.
    pub metadata: SearchMetadata,
    /// Outbound records.
    pub flights: Vec<FlightView>,
    /// Return records, omitted for one-way searches.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub return_flights: Vec<FlightView>,
}

impl From<&SearchOutcome> for OutcomeView {
    fn from(outcome: &SearchOutcome) -> Self {
        Self {
            search_criteria: outcome.criteria.clone(),
            metadata: outcome.metadata.clone(),
            flights: outcome.flights.iter().map(FlightView::from).collect(),
            return_flights: outcome.return_flights.iter().map(FlightView::from).collect(),
        }
    }
}

/// Display view of one record.
#[derive(Debug, Clone, Serialize)]
pub struct FlightView {
    /// Provider-qualified identifier.
    pub id: String,
    /// Provider name.
    pub provider: String,
    /// Operating airline.
    pub airline: Airline,
    /// Flight number.
    pub flight_number: String,
    /// Departure point.
    pub departure: PointView,
    /// Arrival point.
    pub arrival: PointView,
    /// Duration.
    pub duration: DurationView,
    /// Number of stops.
    pub stops: u32,
    /// Fare.
    pub price: PriceView,
    /// Remaining seats.
    pub available_seats: u32,
    /// Cabin class.
    pub cabin_class: String,
    /// Aircraft type.
    pub aircraft: Option<String>,
    /// On-board amenities.
    pub amenities: Vec<String>,
    /// Baggage allowance.
    pub baggage: Baggage,
}

impl From<&Flight> for FlightView {
    fn from(flight: &Flight) -> Self {
        Self {
            id: flight.id().to_string(),
            provider: flight.provider().to_string(),
            airline: flight.airline().clone(),
            flight_number: flight.flight_number().to_string(),
            departure: PointView::from(flight.departure()),
            arrival: PointView::from(flight.arrival()),
            duration: DurationView {
                total_minutes: flight.duration_minutes(),
                formatted: format_duration(flight.duration_minutes()),
            },
            stops: flight.stops(),
            price: PriceView {
                amount: flight.price().amount,
                currency: flight.price().currency.clone(),
                formatted: format_idr(flight.price().amount),
            },
            available_seats: flight.available_seats(),
            cabin_class: flight.cabin_class().to_string(),
            aircraft: flight.aircraft().map(str::to_string),
            amenities: flight.amenities().to_vec(),
            baggage: flight.baggage().clone(),
        }
    }
}

/// Display view of a departure or arrival point.
#[derive(Debug, Clone, Serialize)]
pub struct PointView {
    /// Airport code.
    pub airport: String,
    /// City name.
    pub city: String,
    /// RFC 3339 timestamp; empty if unknown.
    pub datetime: String,
    /// Unix timestamp in seconds; 0 if unknown.
    pub timestamp: i64,
}

impl From<&FlightPoint> for PointView {
    fn from(point: &FlightPoint) -> Self {
        Self {
            airport: point.airport.clone(),
            city: point.city.clone(),
            datetime: point.time.map(|t| t.to_rfc3339()).unwrap_or_default(),
            timestamp: point.time.map_or(0, |t| t.timestamp()),
        }
    }
}

/// Display view of a duration.
#[derive(Debug, Clone, Serialize)]
pub struct DurationView {
    /// Minutes.
    pub total_minutes: i64,
    /// `2h 30m` style text.
    pub formatted: String,
}

/// Display view of a fare.
#[derive(Debug, Clone, Serialize)]
pub struct PriceView {
    /// Amount.
    pub amount: Decimal,
    /// Currency code.
    pub currency: String,
    /// `Rp. 1.250.000` style text.
    pub formatted: String,
}
