//! # Flight Entity
//!
//! The canonical flight record.
//!
//! Providers translate their own response format into [`Flight`]; the
//! aggregation pipeline then normalizes the duration and assigns the
//! best-value score. Everything else is provider-declared.
//!
//! # Examples
//!
//! ```
//! use chrono::DateTime;
//! use flight_aggregator::domain::entities::{Airline, Fare, FlightBuilder, FlightPoint};
//! use rust_decimal::Decimal;
//!
//! let departure = FlightPoint::new(
//!     "CGK",
//!     "Jakarta",
//!     DateTime::parse_from_rfc3339("2024-06-01T06:00:00+07:00").ok(),
//! );
//! let arrival = FlightPoint::new(
//!     "DPS",
//!     "Denpasar",
//!     DateTime::parse_from_rfc3339("2024-06-01T08:50:00+08:00").ok(),
//! );
//!
//! let flight = FlightBuilder::new(
//!     "Garuda Indonesia",
//!     Airline::new("Garuda Indonesia", "GA"),
//!     "GA400",
//!     departure,
//!     arrival,
//!     Fare::idr(Decimal::from(1_250_000)),
//! )
//! .build();
//!
//! assert_eq!(flight.id().as_str(), "GA400_Garuda Indonesia");
//! assert_eq!(flight.duration_minutes(), 110);
//! ```

use crate::domain::value_objects::ids::{FlightId, ProviderName};
use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Operating airline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Airline {
    /// Display name, e.g. `Lion Air`.
    pub name: String,
    /// IATA code, e.g. `JT`.
    pub code: String,
}

impl Airline {
    /// Creates an airline.
    #[must_use]
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
        }
    }
}

/// Departure or arrival point.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlightPoint {
    /// Airport code.
    pub airport: String,
    /// City name, may be empty.
    #[serde(default)]
    pub city: String,
    /// Local timestamp with offset. `None` when the provider sent none.
    pub time: Option<DateTime<FixedOffset>>,
}

impl FlightPoint {
    /// Creates a flight point.
    #[must_use]
    pub fn new(
        airport: impl Into<String>,
        city: impl Into<String>,
        time: Option<DateTime<FixedOffset>>,
    ) -> Self {
        Self {
            airport: airport.into(),
            city: city.into(),
            time,
        }
    }
}

/// Fare amount and currency.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fare {
    /// Total amount.
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency: String,
}

impl Fare {
    /// Creates a fare.
    #[must_use]
    pub fn new(amount: Decimal, currency: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
        }
    }

    /// Creates a fare in Indonesian rupiah.
    #[must_use]
    pub fn idr(amount: Decimal) -> Self {
        Self::new(amount, "IDR")
    }
}

impl fmt::Display for Fare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}

/// Baggage allowance as described by the provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Baggage {
    /// Cabin baggage, e.g. `7 kg`.
    pub carry_on: String,
    /// Checked baggage, e.g. `20 kg`.
    pub checked: String,
}

/// A flight offer from one provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    id: FlightId,
    provider: ProviderName,
    airline: Airline,
    flight_number: String,
    departure: FlightPoint,
    arrival: FlightPoint,
    duration_minutes: i64,
    stops: u32,
    price: Fare,
    available_seats: u32,
    cabin_class: String,
    aircraft: Option<String>,
    #[serde(default)]
    amenities: Vec<String>,
    #[serde(default)]
    baggage: Baggage,
    #[serde(default)]
    best_value_score: f64,
}

impl Flight {
    /// Returns the provider-qualified identifier.
    #[inline]
    #[must_use]
    pub fn id(&self) -> &FlightId {
        &self.id
    }

    /// Returns the provider that offered this flight.
    #[inline]
    #[must_use]
    pub fn provider(&self) -> &ProviderName {
        &self.provider
    }

    /// Returns the operating airline.
    #[inline]
    #[must_use]
    pub fn airline(&self) -> &Airline {
        &self.airline
    }

    /// Returns the flight number.
    #[inline]
    #[must_use]
    pub fn flight_number(&self) -> &str {
        &self.flight_number
    }

    /// Returns the departure point.
    #[inline]
    #[must_use]
    pub fn departure(&self) -> &FlightPoint {
        &self.departure
    }

    /// Returns the arrival point.
    #[inline]
    #[must_use]
    pub fn arrival(&self) -> &FlightPoint {
        &self.arrival
    }

    /// Returns the duration in minutes.
    #[inline]
    #[must_use]
    pub fn duration_minutes(&self) -> i64 {
        self.duration_minutes
    }

    /// Returns the number of stops.
    #[inline]
    #[must_use]
    pub fn stops(&self) -> u32 {
        self.stops
    }

    /// Returns the fare.
    #[inline]
    #[must_use]
    pub fn price(&self) -> &Fare {
        &self.price
    }

    /// Returns the number of seats left.
    #[inline]
    #[must_use]
    pub fn available_seats(&self) -> u32 {
        self.available_seats
    }

    /// Returns the lowercase cabin class.
    #[inline]
    #[must_use]
    pub fn cabin_class(&self) -> &str {
        &self.cabin_class
    }

    /// Returns the aircraft label.
    #[inline]
    #[must_use]
    pub fn aircraft(&self) -> Option<&str> {
        self.aircraft.as_deref()
    }

    /// Returns the amenity tags.
    #[inline]
    #[must_use]
    pub fn amenities(&self) -> &[String] {
        &self.amenities
    }

    /// Returns the baggage allowance.
    #[inline]
    #[must_use]
    pub fn baggage(&self) -> &Baggage {
        &self.baggage
    }

    /// Returns the best-value score. Lower is better.
    #[inline]
    #[must_use]
    pub fn best_value_score(&self) -> f64 {
        self.best_value_score
    }

    /// Returns the departure timestamp.
    #[inline]
    #[must_use]
    pub fn departs_at(&self) -> Option<DateTime<FixedOffset>> {
        self.departure.time
    }

    /// Returns the arrival timestamp.
    #[inline]
    #[must_use]
    pub fn arrives_at(&self) -> Option<DateTime<FixedOffset>> {
        self.arrival.time
    }

    /// Returns true if both timestamps are present and arrival is strictly
    /// after departure.
    #[must_use]
    pub fn has_valid_schedule(&self) -> bool {
        matches!(
            (self.departure.time, self.arrival.time),
            (Some(dep), Some(arr)) if arr > dep
        )
    }

    /// Returns the whole minutes between departure and arrival, if both are
    /// present and the interval is positive.
    #[must_use]
    pub fn scheduled_duration_minutes(&self) -> Option<i64> {
        scheduled_minutes(self.departure.time, self.arrival.time)
    }

    /// Replaces the declared duration with the scheduled one when available.
    pub(crate) fn normalize_duration(&mut self) {
        if let Some(minutes) = self.scheduled_duration_minutes() {
            self.duration_minutes = minutes;
        }
    }

    pub(crate) fn set_best_value_score(&mut self, score: f64) {
        self.best_value_score = score;
    }
}

impl fmt::Display for Flight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Flight({} {} {}->{} {} via {})",
            self.airline.code,
            self.flight_number,
            self.departure.airport,
            self.arrival.airport,
            self.price,
            self.provider
        )
    }
}

fn scheduled_minutes(
    departure: Option<DateTime<FixedOffset>>,
    arrival: Option<DateTime<FixedOffset>>,
) -> Option<i64> {
    let minutes = (arrival? - departure?).num_minutes();
    (minutes > 0).then_some(minutes)
}

/// Builder for [`Flight`].
#[derive(Debug, Clone)]
pub struct FlightBuilder {
    id: Option<FlightId>,
    provider: ProviderName,
    airline: Airline,
    flight_number: String,
    departure: FlightPoint,
    arrival: FlightPoint,
    declared_duration: i64,
    stops: u32,
    price: Fare,
    available_seats: u32,
    cabin_class: String,
    aircraft: Option<String>,
    amenities: Vec<String>,
    baggage: Baggage,
}

impl FlightBuilder {
    /// Creates a builder with the required fields.
    ///
    /// Defaults: direct flight, economy, no seats declared, no amenities.
    #[must_use]
    pub fn new(
        provider: impl Into<ProviderName>,
        airline: Airline,
        flight_number: impl Into<String>,
        departure: FlightPoint,
        arrival: FlightPoint,
        price: Fare,
    ) -> Self {
        Self {
            id: None,
            provider: provider.into(),
            airline,
            flight_number: flight_number.into(),
            departure,
            arrival,
            declared_duration: 0,
            stops: 0,
            price,
            available_seats: 0,
            cabin_class: "economy".to_string(),
            aircraft: None,
            amenities: Vec::new(),
            baggage: Baggage::default(),
        }
    }

    /// Overrides the generated identifier.
    #[must_use]
    pub fn id(mut self, id: FlightId) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the duration the provider declared, used when the timestamps
    /// cannot produce one.
    #[must_use]
    pub fn declared_duration(mut self, minutes: i64) -> Self {
        self.declared_duration = minutes;
        self
    }

    /// Sets the number of stops.
    #[must_use]
    pub fn stops(mut self, stops: u32) -> Self {
        self.stops = stops;
        self
    }

    /// Sets the available seats.
    #[must_use]
    pub fn available_seats(mut self, seats: u32) -> Self {
        self.available_seats = seats;
        self
    }

    /// Sets the cabin class; stored lowercase.
    #[must_use]
    pub fn cabin_class(mut self, cabin_class: impl Into<String>) -> Self {
        self.cabin_class = cabin_class.into().to_lowercase();
        self
    }

    /// Sets the aircraft label. Blank labels are dropped.
    #[must_use]
    pub fn aircraft(mut self, aircraft: impl Into<String>) -> Self {
        let label = aircraft.into().trim().to_string();
        self.aircraft = (!label.is_empty()).then_some(label);
        self
    }

    /// Sets the amenity tags.
    #[must_use]
    pub fn amenities<I, S>(mut self, amenities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.amenities = amenities.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the baggage allowance.
    #[must_use]
    pub fn baggage(mut self, carry_on: impl Into<String>, checked: impl Into<String>) -> Self {
        self.baggage = Baggage {
            carry_on: carry_on.into(),
            checked: checked.into(),
        };
        self
    }

    /// Builds the flight.
    ///
    /// The duration is taken from the timestamps when they give a positive
    /// interval, otherwise from the declared duration.
    #[must_use]
    pub fn build(self) -> Flight {
        let id = self
            .id
            .unwrap_or_else(|| FlightId::qualified(&self.flight_number, &self.provider));
        let duration_minutes = scheduled_minutes(self.departure.time, self.arrival.time)
            .unwrap_or(self.declared_duration);

        Flight {
            id,
            provider: self.provider,
            airline: self.airline,
            flight_number: self.flight_number,
            departure: self.departure,
            arrival: self.arrival,
            duration_minutes,
            stops: self.stops,
            price: self.price,
            available_seats: self.available_seats,
            cabin_class: self.cabin_class,
            aircraft: self.aircraft,
            amenities: self.amenities,
            baggage: self.baggage,
            best_value_score: 0.0,
        }
    }
}
