// src/core/mod.rs

//! The central module containing the cluster topology model and its error type.

pub mod cluster;
pub mod errors;

pub use cluster::{ClusterInformation, ClusterMetadata, EMPTY_VERSION};
pub use errors::ClusterMetadataError;
