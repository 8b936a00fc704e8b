//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map `ClientError` and `ConfigError` to appropriate exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//!
//! Invariants:
//! - Exit codes 1-9 are reserved for specific error categories.

use esharness_client::ClientError;
use esharness_config::ConfigError;

/// Structured exit codes for esharness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Command completed successfully.
    Success = 0,

    /// Unhandled or generic failure.
    GeneralError = 1,

    /// The cluster rejected the credentials (HTTP 401).
    AuthenticationFailed = 2,

    /// Network, timeout, or DNS failure.
    ///
    /// Scripts may retry; the cluster may still be starting.
    ConnectionError = 3,

    /// Invalid configuration: endpoints, config file, CA or identity material.
    ///
    /// Scripts should fix the configuration and not retry.
    ConfigurationError = 4,

    /// The credentials lack the required privileges (HTTP 403).
    PermissionDenied = 5,

    /// The cluster is not ready to serve requests (HTTP 502/503/504).
    ServiceUnavailable = 6,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&ClientError> for ExitCode {
    fn from(err: &ClientError) -> Self {
        match err {
            ClientError::CertificateLoad { .. }
            | ClientError::IdentityLoad { .. }
            | ClientError::InvalidEndpoint { .. } => ExitCode::ConfigurationError,

            ClientError::ApiError { status: 401, .. } => ExitCode::AuthenticationFailed,
            ClientError::ApiError { status: 403, .. } => ExitCode::PermissionDenied,
            ClientError::ApiError {
                status: 502..=504, ..
            } => ExitCode::ServiceUnavailable,
            ClientError::ApiError { .. } => ExitCode::GeneralError,

            ClientError::HttpError(e) => {
                if e.is_connect() || e.is_timeout() {
                    ExitCode::ConnectionError
                } else {
                    ExitCode::GeneralError
                }
            }

            ClientError::Shared(inner) => Self::from(inner.as_ref()),
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Extract the appropriate exit code from this error.
    ///
    /// Returns ExitCode::GeneralError if the chain holds no known error type.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        for cause in self.chain() {
            if let Some(client_err) = cause.downcast_ref::<ClientError>() {
                return ExitCode::from(client_err);
            }
            if cause.downcast_ref::<ConfigError>().is_some() {
                return ExitCode::ConfigurationError;
            }
        }
        ExitCode::GeneralError
    }
}
