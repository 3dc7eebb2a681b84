//! Error types for concept retrieval.
//!
//! This module defines [`FetchError`], covering the failures that can occur
//! while resolving a ticker or fetching a concept. Only identifier
//! resolution surfaces errors to callers; concept fetchers collapse every
//! variant here to absence at their boundary.

use thiserror::Error;

/// Errors that can occur while resolving a ticker or fetching a concept.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Network-related errors (connection failures, timeouts, bad statuses).
    #[error("Network error: {0}")]
    Network(String),

    /// Error parsing a response from the API.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The ticker does not map to a known CIK.
    #[error("Ticker not found: {0}")]
    TickerNotFound(String),

    /// An empty or blank ticker was submitted.
    #[error("Invalid ticker: {0:?}")]
    InvalidTicker(String),

    /// The concept response lacks the expected unit key.
    #[error("Concept {concept} has no \"{unit}\" unit data")]
    MissingUnit {
        /// The us-gaap tag that was requested.
        concept: &'static str,
        /// The unit key that was expected.
        unit: &'static str,
    },

    /// The concept has no 10-K-tagged observations.
    #[error("Concept {0} has no 10-K observations")]
    NoAnnualObservation(&'static str),
}

/// Result type alias using [`FetchError`].
pub type Result<T> = std::result::Result<T, FetchError>;
