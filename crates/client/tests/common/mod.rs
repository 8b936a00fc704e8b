//! Common test utilities for integration tests.
//!
//! This module provides certificate fixtures and cluster configurations shared
//! by the client integration tests.
//!
//! # Invariants
//! - Generated certificates are self-signed and only valid for tests
//! - Files are written into caller-owned temp directories and vanish with them
//!
//! # What this does NOT handle
//! - Plain HTTP mock server setup (use wiremock directly in tests)
//! - Test-specific assertions or test logic

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use esharness_client::ProcessInspector;
use esharness_config::{AdminCredentials, ClusterConfiguration};
use rcgen::{
    BasicConstraints, CertificateParams, DistinguishedName, DnType, IsCa, Issuer, KeyPair,
};
use rustls::pki_types::{PrivateKeyDer, PrivatePkcs8KeyDer};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio_rustls::TlsAcceptor;
use url::Url;

/// Generate a self-signed CA certificate in PEM form.
#[allow(dead_code)]
pub fn generate_ca_pem() -> String {
    let params = ca_params("esharness integration CA");
    let key_pair = KeyPair::generate().unwrap();
    params.self_signed(&key_pair).unwrap().pem()
}

fn ca_params(common_name: &str) -> CertificateParams {
    let mut params = CertificateParams::default();
    params.distinguished_name = DistinguishedName::new();
    params.distinguished_name.push(DnType::CommonName, common_name);
    params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
    params
}

/// Generate a client identity: certificate followed by its PKCS#8 key, in PEM.
#[allow(dead_code)]
pub fn generate_identity_pem() -> String {
    let params = CertificateParams::new(vec!["esharness-client".to_string()]).unwrap();
    let key_pair = KeyPair::generate().unwrap();
    let cert = params.self_signed(&key_pair).unwrap();
    format!("{}{}", cert.pem(), key_pair.serialize_pem())
}

/// Write a fresh CA certificate to `dir/ca.crt`.
#[allow(dead_code)]
pub fn write_ca(dir: &Path) -> PathBuf {
    let path = dir.join("ca.crt");
    std::fs::write(&path, generate_ca_pem()).unwrap();
    path
}

/// Single-node cluster with security enabled and default admin credentials.
#[allow(dead_code)]
pub fn secured_cluster(name: &str) -> ClusterConfiguration {
    ClusterConfiguration::new(name, vec!["node1".to_string()])
        .with_security(AdminCredentials::default())
}

/// Process inspector answering from a fixed list of names.
#[allow(dead_code)]
pub struct FakeProcesses(pub HashSet<String>);

#[allow(dead_code)]
impl FakeProcesses {
    pub fn running(names: &[&str]) -> Self {
        Self(names.iter().map(|n| n.to_string()).collect())
    }
}

impl ProcessInspector for FakeProcesses {
    fn is_running(&self, name: &str) -> bool {
        self.0.contains(name)
    }
}

/// HTTPS node served over a loopback socket.
#[allow(dead_code)]
pub struct TlsNode {
    /// Base URL of the node.
    pub url: Url,
    /// PEM of the CA that issued the node certificate.
    pub ca_pem: String,
}

/// Start an HTTPS node whose certificate is issued by a fresh private CA.
///
/// Every request is answered with `200 OK` and `body` as JSON. The node runs
/// until the test runtime shuts down.
#[allow(dead_code)]
pub async fn start_tls_node(body: serde_json::Value) -> TlsNode {
    let ca_key = KeyPair::generate().unwrap();
    let ca_params = ca_params("esharness node CA");
    let ca_pem = ca_params.self_signed(&ca_key).unwrap().pem();
    let issuer = Issuer::new(ca_params, ca_key);

    let node_params =
        CertificateParams::new(vec!["localhost".to_string(), "127.0.0.1".to_string()]).unwrap();
    let node_key = KeyPair::generate().unwrap();
    let node_cert = node_params.signed_by(&node_key, &issuer).unwrap();

    let provider = Arc::new(rustls::crypto::aws_lc_rs::default_provider());
    let config = rustls::ServerConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()
        .unwrap()
        .with_no_client_auth()
        .with_single_cert(
            vec![node_cert.der().clone()],
            PrivateKeyDer::Pkcs8(PrivatePkcs8KeyDer::from(node_key.serialize_der())),
        )
        .unwrap();
    let acceptor = TlsAcceptor::from(Arc::new(config));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let body = body.to_string();

    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let acceptor = acceptor.clone();
            let body = body.clone();
            tokio::spawn(async move {
                // Handshake failures are the expected outcome for untrusting clients.
                let Ok(mut tls) = acceptor.accept(stream).await else {
                    return;
                };

                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match tls.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }

                let response = format!(
                    "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                    body.len(),
                    body
                );
                let _ = tls.write_all(response.as_bytes()).await;
                let _ = tls.shutdown().await;
            });
        }
    });

    TlsNode {
        url: Url::parse(&format!("https://127.0.0.1:{port}/")).unwrap(),
        ca_pem,
    }
}
