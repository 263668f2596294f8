//! Error type shared by the aggregation engine and its input boundary.
//!
//! All errors are synchronous and final: an operation that fails returns no
//! partial output.

use thiserror::Error;

/// Failure of an engine or parser operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AggregateError {
    /// A token could not be read as an address or network.
    #[error("invalid network: {0}")]
    InvalidNetwork(String),

    /// Range endpoints are out of order or belong to different families.
    #[error("invalid range {first} - {last}: {reason}")]
    InvalidRange {
        first: String,
        last: String,
        reason: &'static str,
    },

    /// One collection held both IPv4 and IPv6 members.
    #[error("IPv4 and IPv6 networks can not be mixed in one collection")]
    MixedFamily,

    /// Nothing left to aggregate.
    #[error("no subnets found to aggregate")]
    EmptyInput,
}
