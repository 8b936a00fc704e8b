//! `detect`: report proxy signals and the resolved endpoint host.

use anyhow::Result;
use esharness_client::EnvironmentSignals;
use serde::Serialize;

use super::{CommandContext, print_json};

#[derive(Debug, Serialize)]
struct DetectOutput<'a> {
    #[serde(flatten)]
    signals: &'a EnvironmentSignals,
    watched_processes: &'static [&'static str],
    resolved_host: &'static str,
}

pub fn run(ctx: &CommandContext) -> Result<()> {
    print_json(&DetectOutput {
        signals: &ctx.signals,
        watched_processes: EnvironmentSignals::watched_processes(),
        resolved_host: ctx.signals.resolve_host(),
    })
}
