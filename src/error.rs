//! Error types for the colony engine.
//!
//! Two families exist. Configuration errors are raised while building a
//! [`Colony`](crate::colony::Colony) and no engine is produced. Invariant
//! violations are internal-logic faults detected during construction steps;
//! they are surfaced instead of being smoothed over with a made-up probability.

use thiserror::Error;

/// Result type alias for colony operations.
pub type AcoResult<T> = Result<T, AcoError>;

/// Unified error type for all colony operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AcoError {
    /// Invalid numeric parameter in [`AcoConfig`](crate::colony::AcoConfig).
    #[error("configuration error: {message}")]
    Config {
        /// Description of the offending parameter.
        message: String,
    },

    /// The problem instance has nothing to optimize over.
    #[error("empty instance: no {what}")]
    EmptyInstance {
        /// What was missing (`"cities"`, `"items"`).
        what: &'static str,
    },

    /// The problem instance contains unusable data.
    #[error("invalid instance: {message}")]
    InvalidInstance {
        /// Description of the offending datum.
        message: String,
    },

    /// A construction step hit a state that valid inputs should never reach,
    /// e.g. a candidate distribution whose total weight is zero or not finite.
    #[error("invariant violation: {message}")]
    InvariantViolation {
        /// Description of the violated invariant.
        message: String,
    },
}

impl AcoError {
    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid-instance error with a message.
    #[must_use]
    pub fn invalid_instance(message: impl Into<String>) -> Self {
        Self::InvalidInstance {
            message: message.into(),
        }
    }

    /// Create an invariant-violation error with a message.
    #[must_use]
    pub fn invariant(message: impl Into<String>) -> Self {
        Self::InvariantViolation {
            message: message.into(),
        }
    }

    /// Returns `true` for errors raised while building an engine.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::Config { .. } | Self::EmptyInstance { .. } | Self::InvalidInstance { .. }
        )
    }
}
