//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Carry command-line overrides for the cluster configuration.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `commands` module).
//! - Does not read environment variables or config files (see `esharness_config`).

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use esharness_config::ClusterConfigLoader;

#[derive(Parser)]
#[command(name = "esharness")]
#[command(
    about = "Resolve and check connections to ephemeral search clusters",
    long_about = None
)]
#[command(version)]
#[command(
    after_help = "Examples:\n  esharness detect\n  ESHARNESS_NODES=node1,node2 esharness profile\n  esharness --config cluster.json --insecure ping\n"
)]
pub struct Cli {
    /// Path to a JSON cluster configuration file.
    ///
    /// Can also be set via the ESHARNESS_CONFIG_PATH environment variable.
    #[arg(long = "config", global = true, value_name = "FILE")]
    pub config_path: Option<PathBuf>,

    /// Node endpoints, comma separated (overrides env and file)
    #[arg(long, global = true, value_delimiter = ',', value_name = "NODES")]
    pub nodes: Option<Vec<String>>,

    /// Accept any server certificate instead of pinning the cluster CA.
    ///
    /// The CA file is still loaded and must be valid. Test clusters only.
    #[arg(long, global = true)]
    pub insecure: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Report which intercepting proxies are running and the host endpoints will use
    Detect,

    /// Print the resolved connection profile with secrets redacted
    Profile,

    /// Connect to the first node and print cluster identity
    Ping,
}

impl Cli {
    /// Apply command-line overrides to a config loader.
    ///
    /// Builder values win over env and file, so this may run before or after
    /// `from_env` / `from_file`.
    pub fn apply_overrides(&self, mut loader: ClusterConfigLoader) -> ClusterConfigLoader {
        if let Some(path) = &self.config_path
            && !path.as_os_str().is_empty()
        {
            loader = loader.with_config_path(path.clone());
        }
        if let Some(nodes) = &self.nodes {
            loader = loader.with_endpoints(nodes.clone());
        }
        loader
    }

    /// Return true if the command needs a cluster configuration.
    pub fn needs_cluster(&self) -> bool {
        !matches!(self.command, Commands::Detect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["esharness", "profile", "--insecure", "--nodes", "a,b:9201"]);
        assert_eq!(cli.command, Commands::Profile);
        assert!(cli.insecure);
        assert_eq!(
            cli.nodes,
            Some(vec!["a".to_string(), "b:9201".to_string()])
        );
    }

    #[test]
    fn test_detect_needs_no_cluster() {
        let cli = Cli::parse_from(["esharness", "detect"]);
        assert!(!cli.needs_cluster());
        assert!(Cli::parse_from(["esharness", "ping"]).needs_cluster());
    }
}
