// src/core/cluster/info.rs

use serde::{Deserialize, Serialize};

/// Describes a single cluster participating in the deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterInformation {
    /// Disabled clusters stay decodable but are never treated as replication peers.
    #[serde(default)]
    pub enabled: bool,
    /// The residue this cluster owns in the failover version space.
    pub initial_failover_version: i64,
    /// The service name remote clusters use to reach this cluster.
    #[serde(default)]
    pub rpc_name: String,
    /// The `host:port` of that service.
    #[serde(default)]
    pub rpc_address: String,
}

impl ClusterInformation {
    /// Creates an entry with no RPC endpoint, mostly useful in tests and tooling.
    pub fn new(enabled: bool, initial_failover_version: i64) -> Self {
        Self {
            enabled,
            initial_failover_version,
            rpc_name: String::new(),
            rpc_address: String::new(),
        }
    }

    pub fn with_rpc(mut self, rpc_name: impl Into<String>, rpc_address: impl Into<String>) -> Self {
        self.rpc_name = rpc_name.into();
        self.rpc_address = rpc_address.into();
        self
    }
}
