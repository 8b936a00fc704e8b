//! Command implementations for esharness.
//!
//! Each command writes a single JSON document to stdout; logs go to stderr.

pub mod detect;
pub mod ping;
pub mod profile;

use anyhow::{Context, Result};
use esharness_client::{EnvironmentSignals, ProfileBuilder};
use esharness_config::ClusterConfiguration;
use serde::Serialize;

use crate::args::{Cli, Commands};

/// Everything a command may need, resolved once per invocation.
pub struct CommandContext {
    pub signals: EnvironmentSignals,
    pub cluster: Option<ClusterConfiguration>,
    pub insecure: bool,
}

impl CommandContext {
    /// The cluster configuration, for commands that require one.
    pub fn cluster(&self) -> Result<&ClusterConfiguration> {
        self.cluster
            .as_ref()
            .context("this command requires a cluster configuration")
    }

    /// Profile builder honouring the detected signals and `--insecure`.
    pub fn profile_builder(&self) -> ProfileBuilder {
        let builder = ProfileBuilder::new(&self.signals);
        if self.insecure {
            builder.insecure_allow_all()
        } else {
            builder
        }
    }
}

/// Run the selected command.
pub async fn run_command(cli: &Cli, ctx: CommandContext) -> Result<()> {
    match cli.command {
        Commands::Detect => detect::run(&ctx),
        Commands::Profile => profile::run(&ctx),
        Commands::Ping => ping::run(&ctx).await,
    }
}

/// Pretty-print `value` as JSON on stdout.
pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}
