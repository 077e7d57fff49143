//! # Provider Errors
//!
//! Error types for flight provider calls.
//!
//! Errors are split into two classes. Transient errors signal overload or a
//! momentary fault and are eligible for retry. Every other error, including
//! cancellation and timeout, is permanent: it is not retried and the provider
//! is recorded as failed for the current call.
//!
//! # Examples
//!
//! ```
//! use flight_aggregator::infrastructure::providers::error::ProviderError;
//!
//! let error = ProviderError::transient("upstream overloaded");
//! assert!(error.is_transient());
//!
//! let error = ProviderError::cancelled();
//! assert!(!error.is_transient());
//! assert!(error.is_cancellation());
//! ```

use thiserror::Error;

/// Error type for provider operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// Temporary failure; the same request may succeed on retry.
    #[error("temporary provider error: {message}")]
    Transient {
        /// Error message.
        message: String,
    },

    /// The provider refused the request outright.
    #[error("provider unavailable: {message}")]
    Unavailable {
        /// Error message.
        message: String,
    },

    /// The per-provider deadline elapsed.
    #[error("provider timeout: {message}")]
    Timeout {
        /// Error message.
        message: String,
        /// Deadline in milliseconds.
        timeout_ms: Option<u64>,
    },

    /// The caller cancelled the call.
    #[error("provider call cancelled")]
    Cancelled,

    /// The provider answered with data that could not be interpreted.
    #[error("provider invalid response: {message}")]
    InvalidResponse {
        /// Error message.
        message: String,
    },

    /// Internal provider failure.
    #[error("provider internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}

impl ProviderError {
    /// Creates a transient error.
    #[must_use]
    pub fn transient(message: impl Into<String>) -> Self {
        Self::Transient {
            message: message.into(),
        }
    }

    /// Creates an unavailable error.
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a timeout error.
    #[must_use]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
            timeout_ms: None,
        }
    }

    /// Creates a timeout error with the elapsed deadline.
    #[must_use]
    pub fn timeout_with_duration(message: impl Into<String>, timeout_ms: u64) -> Self {
        Self::Timeout {
            message: message.into(),
            timeout_ms: Some(timeout_ms),
        }
    }

    /// Creates a cancellation error.
    #[must_use]
    pub fn cancelled() -> Self {
        Self::Cancelled
    }

    /// Creates an invalid response error.
    #[must_use]
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns true if this error is eligible for retry.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transient { .. })
    }

    /// Returns true if the call was aborted by cancellation or deadline.
    #[must_use]
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled | Self::Timeout { .. })
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(error: serde_json::Error) -> Self {
        Self::invalid_response(error.to_string())
    }
}

impl From<std::io::Error> for ProviderError {
    fn from(error: std::io::Error) -> Self {
        Self::internal(error.to_string())
    }
}

/// Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;
