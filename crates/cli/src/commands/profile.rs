//! `profile`: print the resolved connection profile.

use anyhow::{Context, Result};
use esharness_client::{Identity, ProfileSummary};
use serde::Serialize;

use super::{CommandContext, print_json};

#[derive(Debug, Serialize)]
struct ProfileOutput<'a> {
    cluster: &'a str,
    security_enabled: bool,
    tls_enabled: bool,
    profile: ProfileSummary,
}

pub fn run(ctx: &CommandContext) -> Result<()> {
    let cluster = ctx.cluster()?;
    let profile = ctx
        .profile_builder()
        .build(cluster, &Identity)
        .with_context(|| format!("Failed to resolve connection profile for {}", cluster.name))?;

    print_json(&ProfileOutput {
        cluster: &cluster.name,
        security_enabled: cluster.security_enabled,
        tls_enabled: cluster.tls_enabled,
        profile: profile.summary(),
    })
}
