// src/core/cluster/metadata.rs

//! An immutable snapshot of the cluster topology and the failover version
//! arithmetic built on top of it.
//!
//! Every cluster owns one residue class modulo `failover_version_increment`,
//! keyed by its `initial_failover_version`. A version therefore identifies the
//! cluster that produced it, and a cluster taking over ownership of some state
//! advances the version to the next value in its own class. All derived lookup
//! maps are computed once in [`ClusterMetadata::new`]; the value is never
//! mutated afterwards, so it can be shared between threads behind an `Arc`.

use super::info::ClusterInformation;
use super::version::{EMPTY_VERSION, residue};
use crate::core::errors::ClusterMetadataError;
use std::collections::BTreeMap;
use tracing::{debug, error};

/// Topology metadata for the cluster this process belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterMetadata {
    /// The amount a version advances on each failover. Always positive.
    failover_version_increment: i64,
    /// Only the primary cluster may register or update domain level metadata.
    /// Every cluster can perform a failover.
    primary_cluster_name: String,
    current_cluster_name: String,
    /// Full topology, disabled clusters included.
    all_clusters: BTreeMap<String, ClusterInformation>,
    enabled_clusters: BTreeMap<String, ClusterInformation>,
    /// Enabled clusters other than the current one.
    remote_clusters: BTreeMap<String, ClusterInformation>,
    /// Initial failover version -> cluster name, over all clusters.
    version_to_cluster_name: BTreeMap<i64, String>,
}

impl ClusterMetadata {
    /// Builds the metadata and all derived lookup maps from a topology snapshot.
    pub fn new(
        failover_version_increment: i64,
        primary_cluster_name: impl Into<String>,
        current_cluster_name: impl Into<String>,
        cluster_group: BTreeMap<String, ClusterInformation>,
    ) -> Result<Self, ClusterMetadataError> {
        if failover_version_increment <= 0 {
            return Err(ClusterMetadataError::InvalidFailoverVersionIncrement(
                failover_version_increment,
            ));
        }
        let primary_cluster_name = primary_cluster_name.into();
        let current_cluster_name = current_cluster_name.into();

        // Disabled clusters are kept here so versions they issued in the past still decode.
        let version_to_cluster_name = cluster_group
            .iter()
            .map(|(name, info)| (info.initial_failover_version, name.clone()))
            .collect();

        let enabled_clusters: BTreeMap<String, ClusterInformation> = cluster_group
            .iter()
            .filter(|(_, info)| info.enabled)
            .map(|(name, info)| (name.clone(), info.clone()))
            .collect();

        let remote_clusters: BTreeMap<String, ClusterInformation> = enabled_clusters
            .iter()
            .filter(|(name, _)| **name != current_cluster_name)
            .map(|(name, info)| (name.clone(), info.clone()))
            .collect();

        debug!(
            "Built cluster metadata for '{}' (primary '{}'): {} clusters, {} enabled, {} remote, increment {}",
            current_cluster_name,
            primary_cluster_name,
            cluster_group.len(),
            enabled_clusters.len(),
            remote_clusters.len(),
            failover_version_increment
        );

        Ok(Self {
            failover_version_increment,
            primary_cluster_name,
            current_cluster_name,
            all_clusters: cluster_group,
            enabled_clusters,
            remote_clusters,
            version_to_cluster_name,
        })
    }

    /// Returns the smallest version owned by `cluster` that is not smaller than
    /// `current_failover_version`.
    ///
    /// # Notes
    ///
    /// With negative inputs the result can land on [`EMPTY_VERSION`], which
    /// [`cluster_name_for_failover_version`](Self::cluster_name_for_failover_version)
    /// decodes to the current cluster rather than to `cluster`.
    ///
    /// # Panics
    ///
    /// Panics if `cluster` is not part of the topology or the result would overflow.
    /// The error is logged with the full topology before panicking.
    pub fn next_failover_version(&self, cluster: &str, current_failover_version: i64) -> i64 {
        self.try_next_failover_version(cluster, current_failover_version)
            .unwrap_or_else(|e| self.fail(e))
    }

    /// Fallible form of [`next_failover_version`](Self::next_failover_version).
    pub fn try_next_failover_version(
        &self,
        cluster: &str,
        current_failover_version: i64,
    ) -> Result<i64, ClusterMetadataError> {
        let info = self
            .all_clusters
            .get(cluster)
            .ok_or_else(|| ClusterMetadataError::UnknownCluster {
                cluster: cluster.to_string(),
                topology: self.topology_summary(),
            })?;

        let overflow = || ClusterMetadataError::FailoverVersionOverflow {
            cluster: cluster.to_string(),
            version: current_failover_version,
            topology: self.topology_summary(),
        };

        let increment = self.failover_version_increment;
        let failover_version = current_failover_version
            .div_euclid(increment)
            .checked_mul(increment)
            .and_then(|v| v.checked_add(info.initial_failover_version))
            .ok_or_else(overflow)?;

        if failover_version < current_failover_version {
            return failover_version.checked_add(increment).ok_or_else(overflow);
        }
        Ok(failover_version)
    }

    /// Returns true if both versions fall in the same residue class, i.e. were
    /// issued by the same cluster.
    pub fn is_version_from_same_cluster(&self, version1: i64, version2: i64) -> bool {
        residue(version1, self.failover_version_increment)
            == residue(version2, self.failover_version_increment)
    }

    pub fn is_primary_cluster(&self) -> bool {
        self.primary_cluster_name == self.current_cluster_name
    }

    pub fn current_cluster_name(&self) -> &str {
        &self.current_cluster_name
    }

    pub fn primary_cluster_name(&self) -> &str {
        &self.primary_cluster_name
    }

    pub fn failover_version_increment(&self) -> i64 {
        self.failover_version_increment
    }

    /// All configured clusters, including disabled ones.
    pub fn all_cluster_info(&self) -> &BTreeMap<String, ClusterInformation> {
        &self.all_clusters
    }

    pub fn enabled_cluster_info(&self) -> &BTreeMap<String, ClusterInformation> {
        &self.enabled_clusters
    }

    /// Enabled clusters other than the current one.
    pub fn remote_cluster_info(&self) -> &BTreeMap<String, ClusterInformation> {
        &self.remote_clusters
    }

    /// Returns the name of the cluster that produced `failover_version`.
    ///
    /// [`EMPTY_VERSION`] decodes to the current cluster.
    ///
    /// # Panics
    ///
    /// Panics if no configured cluster owns the version's residue. The error is
    /// logged with the full topology before panicking.
    pub fn cluster_name_for_failover_version(&self, failover_version: i64) -> &str {
        self.try_cluster_name_for_failover_version(failover_version)
            .unwrap_or_else(|e| self.fail(e))
    }

    /// Fallible form of [`cluster_name_for_failover_version`](Self::cluster_name_for_failover_version).
    pub fn try_cluster_name_for_failover_version(
        &self,
        failover_version: i64,
    ) -> Result<&str, ClusterMetadataError> {
        if failover_version == EMPTY_VERSION {
            return Ok(self.current_cluster_name.as_str());
        }

        let initial_failover_version = residue(failover_version, self.failover_version_increment);
        self.version_to_cluster_name
            .get(&initial_failover_version)
            .map(String::as_str)
            .ok_or_else(|| ClusterMetadataError::UnknownFailoverVersionResidue {
                residue: initial_failover_version,
                increment: self.failover_version_increment,
                topology: self.topology_summary(),
            })
    }

    /// Renders `name: initial_failover_version` pairs for every configured cluster.
    pub fn topology_summary(&self) -> String {
        let entries: Vec<String> = self
            .all_clusters
            .iter()
            .map(|(name, info)| format!("{name}: {}", info.initial_failover_version))
            .collect();
        format!("{{{}}}", entries.join(", "))
    }

    fn fail(&self, err: ClusterMetadataError) -> ! {
        error!(
            "Cluster metadata invariant violated on '{}': {}",
            self.current_cluster_name, err
        );
        panic!("{err}");
    }
}
