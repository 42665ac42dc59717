//! Crate-wide error taxonomy
//!
//! Nothing here is retried or swallowed: each variant surfaces to the caller
//! the first time it occurs, and the experiment loop aborts on the first
//! failure rather than skipping a configuration.

use thiserror::Error;

/// Errors produced by the detectar pipeline
#[derive(Debug, Error)]
pub enum Error {
    /// Input files missing, malformed, or missing the join key / target column
    #[error("data load failed: {0}")]
    DataLoad(String),

    /// A configuration's qubit count does not match the prepared feature width
    #[error("configuration mismatch: circuit expects {expected} features, data has {actual}")]
    ConfigurationMismatch { expected: usize, actual: usize },

    /// No operational execution target meets the minimum capacity requirement
    #[error("no backend available: {0}")]
    BackendUnavailable(String),

    /// Underlying I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Model artifact (de)serialization failure
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
