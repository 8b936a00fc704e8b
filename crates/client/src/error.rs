//! Error types for the esharness client.

use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur while resolving profiles or constructing clients.
#[derive(Error, Debug)]
pub enum ClientError {
    /// CA certificate material could not be read or parsed.
    #[error("Failed to load CA certificate from {path}: {reason}")]
    CertificateLoad { path: PathBuf, reason: String },

    /// Client identity (certificate + key) could not be read or parsed.
    #[error("Failed to load client identity from {path}: {reason}")]
    IdentityLoad { path: PathBuf, reason: String },

    /// A node endpoint could not be turned into a URL.
    #[error("Invalid endpoint {endpoint:?}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    /// HTTP request error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Error response from the search backend.
    #[error("API error ({status}) at {url}: {message}")]
    ApiError {
        status: u16,
        url: String,
        message: String,
    },

    /// A client construction failure observed through the client cache.
    #[error(transparent)]
    Shared(Arc<ClientError>),
}

impl ClientError {
    /// Check if this error is a CA certificate loading failure.
    pub fn is_certificate_error(&self) -> bool {
        match self {
            Self::CertificateLoad { .. } => true,
            Self::Shared(inner) => inner.is_certificate_error(),
            _ => false,
        }
    }
}

impl From<Arc<ClientError>> for ClientError {
    fn from(error: Arc<ClientError>) -> Self {
        Self::Shared(error)
    }
}
