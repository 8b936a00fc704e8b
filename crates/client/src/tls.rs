//! CA certificate material for pinned TLS validation.
//!
//! Responsibilities:
//! - Read a PEM file and keep every certificate block as DER.
//! - Reject files that are missing, empty, or contain unparseable certificates.
//!
//! Does NOT handle:
//! - Certificate issuance or rotation.
//! - Installing the certificates into an HTTP client (see `client::builder`).
//!
//! Invariants:
//! - A `CaBundle` always holds at least one certificate that parsed as X.509.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{ClientError, Result};

const CERTIFICATE_TAG: &str = "CERTIFICATE";

/// Trusted CA certificates loaded from a PEM file.
#[derive(Clone, PartialEq, Eq)]
pub struct CaBundle {
    path: PathBuf,
    certificates: Vec<Vec<u8>>,
}

impl CaBundle {
    /// Load a CA bundle from a PEM file.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::CertificateLoad`] if the file cannot be read or
    /// does not contain at least one valid certificate.
    pub fn load(path: &Path) -> Result<Self> {
        let pem = std::fs::read(path).map_err(|e| ClientError::CertificateLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_pem(path, &pem)
    }

    /// Parse a CA bundle from PEM bytes; `path` is kept for diagnostics.
    pub fn from_pem(path: impl Into<PathBuf>, pem_bytes: &[u8]) -> Result<Self> {
        let path = path.into();
        let malformed = |reason: String| ClientError::CertificateLoad {
            path: path.clone(),
            reason,
        };

        let blocks = pem::parse_many(pem_bytes).map_err(|e| malformed(e.to_string()))?;

        let mut certificates = Vec::new();
        for block in blocks.iter().filter(|b| b.tag() == CERTIFICATE_TAG) {
            let (_, cert) = x509_parser::parse_x509_certificate(block.contents())
                .map_err(|e| malformed(format!("X.509 parse failed: {e}")))?;
            tracing::debug!(subject = %cert.subject(), "Loaded CA certificate");
            certificates.push(block.contents().to_vec());
        }

        if certificates.is_empty() {
            return Err(malformed("no PEM certificate blocks found".to_string()));
        }

        Ok(Self { path, certificates })
    }

    /// File the bundle was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// DER-encoded certificates, in file order.
    pub fn certificates(&self) -> &[Vec<u8>] {
        &self.certificates
    }
}

impl fmt::Debug for CaBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaBundle")
            .field("path", &self.path)
            .field("certificates", &self.certificates.len())
            .finish()
    }
}
