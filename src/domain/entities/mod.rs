//! # Domain Entities
//!
//! - [`Flight`]: the canonical flight record every provider is mapped into
//! - [`Airline`], [`FlightPoint`], [`Fare`], [`Baggage`]: its components

pub mod flight;

pub use flight::{Airline, Baggage, Fare, Flight, FlightBuilder, FlightPoint};
