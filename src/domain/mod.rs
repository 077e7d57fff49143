//! # Domain Layer
//!
//! Flight records and the search vocabulary shared by every other layer.
//!
//! - [`entities`]: the canonical [`Flight`](entities::Flight) record
//! - [`value_objects`]: criteria, filters, sort options and identifiers
//! - [`errors`]: validation failures raised while building criteria

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use errors::{DomainError, DomainResult};
