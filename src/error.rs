//! Error types.

use thiserror::Error;

/// Result alias for optimizer entry points.
pub type Result<T> = std::result::Result<T, QpsoError>;

/// Errors surfaced to the caller of the optimizer.
///
/// Every variant is raised before any swarm state is allocated. Failures
/// inside a run (oracle outages, numerically broken candidates) are
/// recovered locally and never appear here.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QpsoError {
    /// A configuration parameter is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A seeded visiting order is not a permutation of the destinations.
    #[error("seed order is not a permutation of {expected} destinations: {order:?}")]
    InvalidSeedOrder {
        /// Number of destinations in the problem.
        expected: usize,
        /// The rejected order.
        order: Vec<usize>,
    },
}

/// A per-destination estimate could not be obtained.
///
/// The runner replaces the estimate with [`crate::oracle::FALLBACK_ESTIMATE`]
/// and keeps going.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OracleError {
    /// The backing model or service could not answer.
    #[error("estimate unavailable for {destination}: {reason}")]
    Unavailable {
        /// Destination identifier.
        destination: String,
        /// Human-readable cause.
        reason: String,
    },

    /// The model answered but produced no usable numbers.
    #[error("no usable estimate data for {destination}")]
    MissingData {
        /// Destination identifier.
        destination: String,
    },
}
