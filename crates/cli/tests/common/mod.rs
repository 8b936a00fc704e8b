//! Shared test utilities for esharness integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory that prevents dotenv loading.
//! - Clear host `ESHARNESS_*` variables so tests only see what they set.
//!
//! Invariants / Assumptions:
//! - All integration tests using this helper are hermetic by default.

use assert_cmd::Command;

const CLUSTER_VARS: &[&str] = &[
    "ESHARNESS_CLUSTER_NAME",
    "ESHARNESS_NODES",
    "ESHARNESS_SECURITY_ENABLED",
    "ESHARNESS_TLS_ENABLED",
    "ESHARNESS_CA_CERT",
    "ESHARNESS_ADMIN_USERNAME",
    "ESHARNESS_ADMIN_PASSWORD",
    "ESHARNESS_CONFIG_PATH",
];

/// Returns a hermetic `esharness` command for integration testing.
pub fn esharness_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("esharness");

    // Hermeticity: prevent loading local .env
    cmd.env("DOTENV_DISABLED", "1");
    cmd.env_remove("RUST_LOG");
    for var in CLUSTER_VARS {
        cmd.env_remove(var);
    }

    cmd
}

/// Returns a hermetic command targeting a single node on `port`.
#[allow(dead_code)]
pub fn esharness_cmd_for_port(port: u16) -> Command {
    let mut cmd = esharness_cmd();
    cmd.env("ESHARNESS_NODES", format!("node1:{port}"));
    cmd
}
