//! Error types for distshare.
//!
//! All errors are strongly typed using thiserror. This enables pattern
//! matching on specific error conditions and provides clear error messages.

use thiserror::Error;

use crate::storage::StorageError;

/// Validation errors that occur during coordinate construction.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// Latitude outside [-90, 90] degrees.
    #[error("Latitude {value} is out of range [-90, 90]")]
    LatitudeOutOfRange {
        /// The offending value.
        value: f64,
    },

    /// Longitude outside [-180, 180] degrees.
    #[error("Longitude {value} is out of range [-180, 180]")]
    LongitudeOutOfRange {
        /// The offending value.
        value: f64,
    },

    /// A coordinate component is NaN or infinite.
    #[error("Coordinate {axis} must be a finite number")]
    NonFiniteCoordinate {
        /// Which component failed ("lat" or "lon").
        axis: &'static str,
    },
}

/// Top-level error type for distshare.
///
/// This enum encompasses all possible errors that can occur when using the
/// tracker, the reactor runtime, or its subscription streams.
#[derive(Debug, Error)]
pub enum DistShareError {
    /// Input validation failed.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The underlying store failed; propagated untranslated, no retry here.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// A reactor channel closed while the caller still needed it.
    #[error("Channel disconnected: {path}")]
    Disconnected {
        /// Which channel closed.
        path: String,
    },

    /// A blocking receive exceeded its deadline.
    #[error("Timed out after {duration_ms}ms")]
    Timeout {
        /// The deadline that elapsed.
        duration_ms: u64,
    },
}

impl DistShareError {
    /// Returns true if this is a validation error.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if this is a storage error.
    #[must_use]
    pub const fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }

    /// Returns true if this error is retryable.
    ///
    /// Validation failures won't change on retry; timeouts might.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

/// Result type alias for distshare operations.
pub type DistShareResult<T> = Result<T, DistShareError>;
