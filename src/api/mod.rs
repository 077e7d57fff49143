//! # Presentation
//!
//! Display helpers for outer layers such as the `flight-search` binary.

pub mod format;
pub mod view;

pub use format::{format_duration, format_idr};
pub use view::{FlightView, OutcomeView};
