// src/core/errors.rs

//! Defines the error type for topology and failover version invariant violations.

use thiserror::Error;

/// Failures raised when a query disagrees with the configured topology.
///
/// None of these are expected during normal operation. They mean the process was
/// configured with a topology that cannot interpret the input it was given, so the
/// owning operation should be aborted rather than retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClusterMetadataError {
    #[error("Unknown cluster name: {cluster} with given cluster initial failover version map: {topology}")]
    UnknownCluster { cluster: String, topology: String },

    #[error(
        "Unknown initial failover version {residue} with given cluster initial failover version map: {topology} and failover version increment {increment}"
    )]
    UnknownFailoverVersionResidue {
        residue: i64,
        increment: i64,
        topology: String,
    },

    #[error(
        "Next failover version for cluster {cluster} after {version} overflows i64 with given cluster initial failover version map: {topology}"
    )]
    FailoverVersionOverflow {
        cluster: String,
        version: i64,
        topology: String,
    },

    #[error("Failover version increment must be greater than 0, got {0}")]
    InvalidFailoverVersionIncrement(i64),
}
