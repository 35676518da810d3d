use thiserror::Error;

/// Unified error type for the plan caching core.
///
/// The taxonomy is deliberately small: request validation failures and
/// generator failures are surfaced to the caller, while store failures are
/// soft. Callers treat a failed read as a miss and a failed write as a
/// dropped cache entry, and the user-visible request still succeeds.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed request (missing destination, non-positive day count,
    /// pathological key length). Never retried, never cached.
    #[error("invalid parameter: {message}")]
    InvalidParameter { message: String },

    /// The plan generator collaborator failed. Propagated to the caller;
    /// nothing is written to the cache.
    #[error("plan generation failed: {message}")]
    Generation { message: String },

    /// The backing store could not be read or written.
    #[error("cache store unavailable: {message}")]
    Store { message: String },

    /// A payload could not be encoded or decoded. Treated like a store
    /// failure by the orchestration layer.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a new `InvalidParameter` error.
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Error::InvalidParameter {
            message: message.into(),
        }
    }

    /// Create a new `Generation` error.
    pub fn generation(message: impl Into<String>) -> Self {
        Error::Generation {
            message: message.into(),
        }
    }

    /// Create a new `Store` error.
    pub fn store(message: impl Into<String>) -> Self {
        Error::Store {
            message: message.into(),
        }
    }

    /// True for failures the cache layer may absorb without failing the
    /// user-visible request (store and serialization errors).
    pub fn is_soft(&self) -> bool {
        matches!(self, Error::Store { .. } | Error::Serialization(_))
    }
}
