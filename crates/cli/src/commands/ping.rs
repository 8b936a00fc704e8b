//! `ping`: fetch cluster identity from the first node.

use anyhow::{Context, Result};
use esharness_client::{ClientRegistry, Identity};

use super::{CommandContext, print_json};

pub async fn run(ctx: &CommandContext) -> Result<()> {
    let cluster = ctx.cluster()?;
    let registry: ClientRegistry = ClientRegistry::new(ctx.profile_builder());

    let client = registry
        .get_or_add_client(cluster, &Identity)
        .with_context(|| format!("Failed to build client for {}", cluster.name))?;

    let endpoint = client
        .endpoints()
        .first()
        .map(|url| url.to_string())
        .unwrap_or_default();
    tracing::info!(cluster = %cluster.name, %endpoint, "Pinging cluster");

    let info = client
        .root_info()
        .await
        .with_context(|| format!("Failed to reach {endpoint}"))?;

    print_json(&info)
}
