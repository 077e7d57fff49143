//! # Application Errors
//!
//! Error types for the application layer.
//!
//! Only a few failures surface from a search call. Individual provider
//! failures are absorbed into the outcome metadata instead.
//!
//! # Error Hierarchy
//!
//! ```text
//! ApplicationError
//! ├── Domain(DomainError)   - Malformed criteria
//! ├── Validation(String)    - Input rejected before any provider is called
//! ├── Cancelled             - The caller cancelled the search
//! ├── Timeout               - The overall request deadline elapsed
//! └── Internal(String)      - Unexpected failure
//! ```
//!
//! # Examples
//!
//! ```
//! use flight_aggregator::application::error::ApplicationError;
//!
//! let err = ApplicationError::validation("origin is required");
//! assert!(err.is_validation());
//!
//! let err = ApplicationError::timeout(5000);
//! assert!(err.to_string().contains("5000"));
//! ```

use crate::domain::errors::DomainError;
use thiserror::Error;

/// Application layer error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplicationError {
    /// Domain error from criteria construction.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// Request validation failed.
    #[error("validation error: {0}")]
    Validation(String),

    /// The search was cancelled by the caller.
    #[error("search cancelled")]
    Cancelled,

    /// The overall request deadline elapsed.
    #[error("search timed out after {timeout_ms}ms")]
    Timeout {
        /// Deadline in milliseconds.
        timeout_ms: u64,
    },

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Creates a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a cancellation error.
    #[must_use]
    pub fn cancelled() -> Self {
        Self::Cancelled
    }

    /// Creates a request timeout error.
    #[must_use]
    pub fn timeout(timeout_ms: u64) -> Self {
        Self::Timeout { timeout_ms }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Returns true if the criteria were rejected.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Domain(_))
    }

    /// Returns true if the search stopped early by cancellation or deadline.
    #[must_use]
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled | Self::Timeout { .. })
    }
}

/// Result type for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
