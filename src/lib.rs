// src/lib.rs

pub mod cli;
pub mod config;
pub mod core;

// Re-export
pub use crate::core::cluster;
pub use crate::core::{ClusterInformation, ClusterMetadata, ClusterMetadataError, EMPTY_VERSION};
