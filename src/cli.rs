// src/cli.rs

//! Argument handling and command execution for the `clustermeta` binary.

use crate::core::cluster::ClusterMetadata;
use anyhow::{Context, Result, anyhow};

pub const USAGE: &str = "Usage: clustermeta [--config PATH] <info | next-version CLUSTER VERSION | owner VERSION | same-cluster V1 V2>";

/// The config path used when no `--config` flag is given.
pub const DEFAULT_CONFIG_PATH: &str = "topology.toml";

/// Returns the build version. `CLUSTERMETA_VERSION` set at compile time overrides the package version.
pub fn version() -> &'static str {
    option_env!("CLUSTERMETA_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}

/// A query against the loaded topology.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    Info,
    NextVersion { cluster: String, version: i64 },
    Owner { version: i64 },
    SameCluster { version1: i64, version2: i64 },
}

/// What the process was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    PrintVersion,
    Run {
        config_path: String,
        command: CliCommand,
    },
}

/// Parses the arguments following the program name.
pub fn parse_args<S: AsRef<str>>(args: &[S]) -> Result<Invocation> {
    let args: Vec<&str> = args.iter().map(|arg| arg.as_ref()).collect();

    if args.contains(&"--version") {
        return Ok(Invocation::PrintVersion);
    }

    let mut config_path: Option<&str> = None;
    let mut command: Vec<&str> = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if *arg == "--config" {
            match iter.next() {
                Some(path) if !path.starts_with("--") => {
                    if config_path.replace(*path).is_some() {
                        return Err(anyhow!("--config given more than once"));
                    }
                }
                _ => return Err(anyhow!("--config flag requires a value")),
            }
        } else {
            command.push(*arg);
        }
    }

    Ok(Invocation::Run {
        config_path: config_path.unwrap_or(DEFAULT_CONFIG_PATH).to_string(),
        command: parse_command(&command)?,
    })
}

fn parse_command(command: &[&str]) -> Result<CliCommand> {
    match command {
        [] | ["info"] => Ok(CliCommand::Info),
        ["next-version", cluster, version] => Ok(CliCommand::NextVersion {
            cluster: cluster.to_string(),
            version: parse_version(version)?,
        }),
        ["owner", version] => Ok(CliCommand::Owner {
            version: parse_version(version)?,
        }),
        ["same-cluster", version1, version2] => Ok(CliCommand::SameCluster {
            version1: parse_version(version1)?,
            version2: parse_version(version2)?,
        }),
        other => Err(anyhow!("Unknown command: {}", other.join(" "))),
    }
}

fn parse_version(value: &str) -> Result<i64> {
    value
        .parse::<i64>()
        .with_context(|| format!("Invalid failover version: {value}"))
}

/// Runs `command` and returns the text to print on stdout.
pub fn run_command(metadata: &ClusterMetadata, command: &CliCommand) -> Result<String> {
    match command {
        CliCommand::Info => Ok(render_info(metadata)),
        CliCommand::NextVersion { cluster, version } => {
            let next = metadata.try_next_failover_version(cluster, *version)?;
            Ok(next.to_string())
        }
        CliCommand::Owner { version } => {
            let owner = metadata.try_cluster_name_for_failover_version(*version)?;
            Ok(owner.to_string())
        }
        CliCommand::SameCluster { version1, version2 } => Ok(metadata
            .is_version_from_same_cluster(*version1, *version2)
            .to_string()),
    }
}

fn render_info(metadata: &ClusterMetadata) -> String {
    let mut lines = vec![
        format!(
            "failover_version_increment: {}",
            metadata.failover_version_increment()
        ),
        format!("primary_cluster: {}", metadata.primary_cluster_name()),
        format!("current_cluster: {}", metadata.current_cluster_name()),
        format!("is_primary: {}", metadata.is_primary_cluster()),
        "clusters:".to_string(),
    ];
    for (name, info) in metadata.all_cluster_info() {
        let role = if name == metadata.current_cluster_name() {
            "current"
        } else if metadata.remote_cluster_info().contains_key(name) {
            "remote"
        } else {
            "disabled"
        };
        lines.push(format!(
            "  {name}: initial_failover_version={} role={role} rpc={}@{}",
            info.initial_failover_version, info.rpc_name, info.rpc_address
        ));
    }
    lines.join("\n")
}
