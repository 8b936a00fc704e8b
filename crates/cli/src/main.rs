//! esharness - Command-line companion for integration test clusters.
//!
//! Responsibilities:
//! - Parse command-line arguments.
//! - Assemble the cluster configuration from flags, environment, and config file.
//! - Detect proxy signals once and hand them to the selected command.
//!
//! Does NOT handle:
//! - Profile derivation or client construction (see `crates/client`).
//! - Cluster lifecycle; the cluster must already be running.
//!
//! Invariants:
//! - `load_dotenv()` is called BEFORE configuration is read so `.env` can provide values.
//! - stdout carries command output only; logs always go to stderr.

mod args;
mod commands;
mod error;

use anyhow::{Context, Result};
use args::Cli;
use clap::Parser;
use commands::{CommandContext, run_command};
use error::{ExitCode, ExitCodeExt};
use esharness_client::EnvironmentSignals;
use esharness_config::{ClusterConfigLoader, ClusterConfiguration};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_json);

    let exit_code = match run(&cli).await {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            e.exit_code()
        }
    };

    std::process::exit(exit_code.as_i32());
}

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr)).init();
    }
}

async fn run(cli: &Cli) -> Result<()> {
    let cluster = if cli.needs_cluster() {
        Some(load_cluster(cli)?)
    } else {
        None
    };

    let ctx = CommandContext {
        signals: EnvironmentSignals::detect(),
        cluster,
        insecure: cli.insecure,
    };

    run_command(cli, ctx).await
}

fn load_cluster(cli: &Cli) -> Result<ClusterConfiguration> {
    let loader = ClusterConfigLoader::new()
        .load_dotenv()
        .context("Failed to load environment")?;
    let loader = cli
        .apply_overrides(loader)
        .from_env()
        .context("Failed to load configuration from environment")?
        .from_file()
        .context("Failed to load configuration file")?;

    loader.build().context("Failed to build cluster configuration")
}
