// src/core/cluster/mod.rs

//! This module contains the cluster topology model and the failover version
//! encoding used to track which cluster owns a piece of replicated state.

pub mod info;
pub mod metadata;
pub mod version;

// Re-export key types for easier access from other modules.
pub use info::ClusterInformation;
pub use metadata::ClusterMetadata;
pub use version::{EMPTY_VERSION, residue};
