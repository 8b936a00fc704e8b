//! HTTP client for a search cluster.
//!
//! Responsibilities:
//! - Hold a configured `reqwest::Client` together with the cluster's node URLs.
//! - Attach basic credentials to every request when the profile uses them.
//! - Map non-success responses to [`ClientError::ApiError`].
//!
//! Does NOT handle:
//! - TLS and identity setup (see `client::builder`).
//! - Deciding which credentials or TLS policy to use (see `profile`).
//! - Node failover; requests go to the first configured node.

pub mod builder;

use reqwest::{Method, RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::error::{ClientError, Result};
use crate::models::ClusterInfo;

pub use builder::SearchClientBuilder;

/// Client for one search cluster.
#[derive(Debug, Clone)]
pub struct SearchClient {
    http: reqwest::Client,
    endpoints: Vec<Url>,
    credentials: Option<(String, SecretString)>,
}

impl SearchClient {
    /// Create a new client builder.
    pub fn builder() -> SearchClientBuilder {
        SearchClientBuilder::new()
    }

    /// Node URLs this client talks to.
    pub fn endpoints(&self) -> &[Url] {
        &self.endpoints
    }

    /// Return true if requests carry basic credentials.
    pub fn uses_basic_auth(&self) -> bool {
        self.credentials.is_some()
    }

    /// The underlying HTTP client.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Start a request against the first node.
    ///
    /// `path` is resolved relative to the node URL, so a node URL with a
    /// path prefix keeps it.
    pub fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let base = self
            .endpoints
            .first()
            .ok_or_else(|| ClientError::InvalidEndpoint {
                endpoint: String::new(),
                reason: "client has no endpoints".to_string(),
            })?;
        let url = join_path(base, path)?;

        let mut request = self.http.request(method, url);
        if let Some((username, password)) = &self.credentials {
            request = request.basic_auth(username, Some(password.expose_secret()));
        }
        Ok(request)
    }

    /// Fetch cluster identity and version from the root endpoint.
    pub async fn root_info(&self) -> Result<ClusterInfo> {
        let response = self.request(Method::GET, "/")?.send().await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }
}

fn join_path(base: &Url, path: &str) -> Result<Url> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let with_slash = format!("{}/", base.path());
        base.set_path(&with_slash);
    }
    base.join(path.trim_start_matches('/'))
        .map_err(|e| ClientError::InvalidEndpoint {
            endpoint: format!("{base}{path}"),
            reason: e.to_string(),
        })
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().to_string();
    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "Could not read error response body".to_string());
    tracing::debug!(status = status.as_u16(), %url, "Request failed");

    Err(ClientError::ApiError {
        status: status.as_u16(),
        url,
        message,
    })
}
