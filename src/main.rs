// src/main.rs

//! Command-line entry point for inspecting a cluster group topology and
//! answering failover version queries against it.

use anyhow::Result;
use clustermeta::cli::{self, Invocation, USAGE};
use clustermeta::config::ClusterGroupConfig;
use std::env;
use tracing_subscriber::filter::EnvFilter;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();

    let (config_path, command) = match cli::parse_args(&args) {
        Ok(Invocation::PrintVersion) => {
            println!("clustermeta version {}", cli::version());
            return Ok(());
        }
        Ok(Invocation::Run {
            config_path,
            command,
        }) => (config_path, command),
        Err(e) => {
            eprintln!("{e:#}");
            eprintln!("{USAGE}");
            std::process::exit(1);
        }
    };

    let config = match ClusterGroupConfig::from_file(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to load configuration from \"{config_path}\": {e:#}");
            std::process::exit(1);
        }
    };

    // Get the log level from the env var or the config.
    let log_level = env::var("RUST_LOG").unwrap_or_else(|_| config.log_level.clone());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level))
        .compact()
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .init();

    let metadata = config.build_metadata()?;

    match cli::run_command(&metadata, &command) {
        Ok(output) => println!("{output}"),
        Err(e) => {
            eprintln!("{e:#}");
            eprintln!("{USAGE}");
            std::process::exit(1);
        }
    }

    Ok(())
}
