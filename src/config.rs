// src/config.rs

//! Loads the cluster group topology from TOML and validates it before any
//! `ClusterMetadata` is built from it.

use crate::core::cluster::{ClusterInformation, ClusterMetadata};
use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use tracing::{info, warn};

/// A raw representation of the config file before validation.
#[derive(Deserialize)]
struct RawConfig {
    #[serde(default = "default_log_level")]
    log_level: String,
    failover_version_increment: i64,
    primary_cluster_name: String,
    current_cluster_name: String,
    #[serde(default)]
    cluster_group: BTreeMap<String, ClusterInformation>,
}

fn default_log_level() -> String {
    "info".to_string()
}

/// The validated cluster group configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterGroupConfig {
    pub log_level: String,
    /// The increment of each cluster's version when a failover happens.
    pub failover_version_increment: i64,
    /// The only cluster allowed to register or update domains.
    pub primary_cluster_name: String,
    /// The cluster this process runs in.
    pub current_cluster_name: String,
    pub cluster_group: BTreeMap<String, ClusterInformation>,
}

impl ClusterGroupConfig {
    /// Creates a new `ClusterGroupConfig` by reading and parsing a TOML file.
    pub fn from_file(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at '{path}'"))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("Invalid cluster group configuration in '{path}'"))
    }

    /// Parses and validates a configuration held in memory.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let raw_config: RawConfig =
            toml::from_str(contents).context("Failed to parse cluster group TOML")?;

        let config = ClusterGroupConfig {
            log_level: raw_config.log_level,
            failover_version_increment: raw_config.failover_version_increment,
            primary_cluster_name: raw_config.primary_cluster_name,
            current_cluster_name: raw_config.current_cluster_name,
            cluster_group: raw_config.cluster_group,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration to ensure version decoding will be unambiguous.
    pub fn validate(&self) -> Result<()> {
        if self.failover_version_increment <= 0 {
            return Err(anyhow!(
                "failover_version_increment must be greater than 0, got {}",
                self.failover_version_increment
            ));
        }
        if self.primary_cluster_name.trim().is_empty() {
            return Err(anyhow!("primary_cluster_name cannot be empty"));
        }
        if self.current_cluster_name.trim().is_empty() {
            return Err(anyhow!("current_cluster_name cannot be empty"));
        }

        for (role, name) in [
            ("primary", &self.primary_cluster_name),
            ("current", &self.current_cluster_name),
        ] {
            match self.cluster_group.get(name) {
                None => {
                    return Err(anyhow!(
                        "{role} cluster '{name}' is not defined in cluster_group"
                    ));
                }
                Some(info) if !info.enabled => {
                    return Err(anyhow!("{role} cluster '{name}' must be enabled"));
                }
                Some(_) => {}
            }
        }

        let mut version_to_cluster_name: HashMap<i64, &str> = HashMap::new();
        for (name, info) in &self.cluster_group {
            let version = info.initial_failover_version;
            if !(0..self.failover_version_increment).contains(&version) {
                return Err(anyhow!(
                    "cluster '{name}': initial_failover_version {version} must be in [0, {})",
                    self.failover_version_increment
                ));
            }
            if let Some(other) = version_to_cluster_name.insert(version, name) {
                return Err(anyhow!(
                    "clusters '{other}' and '{name}' share initial_failover_version {version}"
                ));
            }

            if info.rpc_name.trim().is_empty() || info.rpc_address.trim().is_empty() {
                if info.enabled {
                    return Err(anyhow!(
                        "enabled cluster '{name}' must set both rpc_name and rpc_address"
                    ));
                }
                warn!(
                    "Disabled cluster '{}' has no RPC endpoint configured.",
                    name
                );
            }
        }

        if self.cluster_group.len() as i64 == self.failover_version_increment {
            warn!(
                "All {} residues of failover_version_increment are in use; no cluster can be added without changing the increment.",
                self.failover_version_increment
            );
        }

        Ok(())
    }

    /// Builds the immutable metadata snapshot for this configuration.
    pub fn build_metadata(&self) -> Result<ClusterMetadata> {
        let metadata = ClusterMetadata::new(
            self.failover_version_increment,
            self.primary_cluster_name.clone(),
            self.current_cluster_name.clone(),
            self.cluster_group.clone(),
        )?;
        info!(
            "Loaded cluster group: current '{}', primary '{}', {} remote clusters.",
            metadata.current_cluster_name(),
            metadata.primary_cluster_name(),
            metadata.remote_cluster_info().len()
        );
        Ok(metadata)
    }
}
