//! Endpoint resolution for cluster nodes.
//!
//! Responsibilities:
//! - Detect intercepting proxy processes once per session (`EnvironmentSignals`).
//! - Pick the host every node endpoint is rewritten to.
//! - Turn configured node endpoints into absolute URLs.
//!
//! Does NOT handle:
//! - Credentials or TLS policy (see `profile` module).
//! - Starting, stopping, or configuring the proxies themselves.
//!
//! Invariants:
//! - Host resolution is total: with no proxy running the loopback host is returned.
//! - Process inspection happens only in `EnvironmentSignals::detect*`; the result is
//!   passed around explicitly instead of living in global state.
//! - Resolved URLs never carry userinfo; credentials come from the profile only.

use std::ffi::OsStr;

use esharness_config::constants::{
    DEFAULT_NODE_PORT, FIDDLER_PROCESS, LOOPBACK_HOST, MITMPROXY_PROCESS, PROXY_PROCESS_NAMES,
    PROXY_ROUTING_HOST,
};
use serde::Serialize;
use sysinfo::{ProcessRefreshKind, RefreshKind, System};
use url::Url;

use crate::error::{ClientError, Result};

/// Source of "is a process with this name running" answers.
pub trait ProcessInspector {
    /// Return true if at least one process with exactly this name is running.
    fn is_running(&self, name: &str) -> bool;
}

/// [`ProcessInspector`] backed by a snapshot of the host process table.
pub struct SystemProcessInspector {
    names: Vec<String>,
}

impl SystemProcessInspector {
    /// Take a snapshot of the running process names.
    pub fn snapshot() -> Self {
        let system = System::new_with_specifics(
            RefreshKind::nothing().with_processes(ProcessRefreshKind::nothing()),
        );
        let names = system
            .processes()
            .values()
            .map(|process| normalize_process_name(process.name()))
            .collect();
        Self { names }
    }
}

impl ProcessInspector for SystemProcessInspector {
    fn is_running(&self, name: &str) -> bool {
        self.names.iter().any(|running| names_match(running, name))
    }
}

/// Strip the Windows executable suffix so `fiddler.exe` reports as `fiddler`.
fn normalize_process_name(name: &OsStr) -> String {
    let name = name.to_string_lossy();
    let len = name.len();
    if len > 4 && name.is_char_boundary(len - 4) && name[len - 4..].eq_ignore_ascii_case(".exe") {
        name[..len - 4].to_string()
    } else {
        name.into_owned()
    }
}

fn names_match(running: &str, wanted: &str) -> bool {
    // Process names are case-insensitive on Windows only.
    if cfg!(windows) {
        running.eq_ignore_ascii_case(wanted)
    } else {
        running == wanted
    }
}

/// Proxy-detection results, captured once at session start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EnvironmentSignals {
    pub mitmproxy_running: bool,
    pub fiddler_running: bool,
}

impl EnvironmentSignals {
    /// Inspect the host process table.
    pub fn detect() -> Self {
        Self::detect_with(&SystemProcessInspector::snapshot())
    }

    /// Inspect processes through the given inspector.
    pub fn detect_with(inspector: &impl ProcessInspector) -> Self {
        let signals = Self {
            mitmproxy_running: inspector.is_running(MITMPROXY_PROCESS),
            fiddler_running: inspector.is_running(FIDDLER_PROCESS),
        };
        tracing::debug!(
            mitmproxy = signals.mitmproxy_running,
            fiddler = signals.fiddler_running,
            "Detected proxy processes"
        );
        signals
    }

    /// Signals for an environment with no proxy running.
    pub fn none() -> Self {
        Self::default()
    }

    /// Return true if any known intercepting proxy is running.
    pub fn proxy_detected(&self) -> bool {
        self.mitmproxy_running || self.fiddler_running
    }

    /// Host that node endpoints should target.
    pub fn resolve_host(&self) -> &'static str {
        if self.proxy_detected() {
            PROXY_ROUTING_HOST
        } else {
            LOOPBACK_HOST
        }
    }

    /// Names of the proxy processes this detection looks for.
    pub fn watched_processes() -> &'static [&'static str] {
        &PROXY_PROCESS_NAMES
    }
}

/// Rewrites node endpoints onto the resolved host.
#[derive(Debug, Clone)]
pub struct EndpointResolver {
    host: String,
}

impl EndpointResolver {
    /// Resolver targeting the host chosen by `signals`.
    pub fn from_signals(signals: &EnvironmentSignals) -> Self {
        Self::with_host(signals.resolve_host())
    }

    /// Resolver targeting an explicit host.
    pub fn with_host(host: impl Into<String>) -> Self {
        Self { host: host.into() }
    }

    /// The host every endpoint is rewritten to.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Turn a configured endpoint into an absolute URL on the resolved host.
    ///
    /// Bare endpoints (`node1`, `node1:9201`) get `https` when `tls_enabled`
    /// and `http` otherwise, plus the default node port when none is given.
    /// Full URIs keep their scheme, port, and path.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidEndpoint`] if the endpoint does not parse
    /// as a URL with a host, or if it embeds `user[:password]@` credentials.
    /// The endpoint echoed in the error has any userinfo redacted.
    pub fn rewrite(&self, endpoint: &str, tls_enabled: bool) -> Result<Url> {
        let raw = endpoint.trim();
        let invalid = |reason: String| ClientError::InvalidEndpoint {
            endpoint: redact_userinfo(endpoint),
            reason,
        };

        let bare = !raw.contains("://");
        let candidate = if bare {
            let scheme = if tls_enabled { "https" } else { "http" };
            format!("{scheme}://{raw}")
        } else {
            raw.to_string()
        };

        let mut url = Url::parse(&candidate).map_err(|e| invalid(e.to_string()))?;
        if url.cannot_be_a_base() || url.host().is_none() {
            return Err(invalid("endpoint has no host".to_string()));
        }
        if !url.username().is_empty() || url.password().is_some() {
            return Err(invalid(
                "credentials in endpoints are not supported; configure the admin credentials instead"
                    .to_string(),
            ));
        }

        url.set_host(Some(self.host.as_str()))
            .map_err(|e| invalid(e.to_string()))?;

        if bare && !has_explicit_port(raw) {
            url.set_port(Some(DEFAULT_NODE_PORT))
                .map_err(|()| invalid("cannot set port".to_string()))?;
        }

        Ok(url)
    }

    /// Rewrite every endpoint, preserving order.
    pub fn rewrite_all(&self, endpoints: &[String], tls_enabled: bool) -> Result<Vec<Url>> {
        let urls = endpoints
            .iter()
            .map(|endpoint| self.rewrite(endpoint, tls_enabled))
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!(host = %self.host, nodes = urls.len(), "Resolved node endpoints");
        Ok(urls)
    }
}

/// Replace the `user[:password]@` part of an endpoint with `***@`.
fn redact_userinfo(endpoint: &str) -> String {
    let (scheme, rest) = match endpoint.split_once("://") {
        Some((scheme, rest)) => (Some(scheme), rest),
        None => (None, endpoint),
    };
    let authority_end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let Some(at) = rest[..authority_end].rfind('@') else {
        return endpoint.to_string();
    };

    let redacted = format!("***{}", &rest[at..]);
    match scheme {
        Some(scheme) => format!("{scheme}://{redacted}"),
        None => redacted,
    }
}

/// Check whether a bare `host[:port][/path]` endpoint names a port.
fn has_explicit_port(raw: &str) -> bool {
    let authority = raw.split('/').next().unwrap_or(raw);
    authority
        .rsplit_once(':')
        .is_some_and(|(_, port)| port.parse::<u16>().is_ok())
}
