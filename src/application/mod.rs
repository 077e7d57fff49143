//! # Application Layer
//!
//! The search use case and the services it composes.
//!
//! - [`use_cases`]: the [`SearchFlights`](use_cases::SearchFlights) entry point
//! - [`services`]: fan-out, retry and the result pipeline
//! - [`dto`]: the outcome returned to callers
//! - [`error`]: call-level errors

pub mod dto;
pub mod error;
pub mod services;
pub mod use_cases;
