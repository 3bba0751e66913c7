//! TLS context construction and certificate loading.
//!
//! Selects between mutual and server-only authentication and produces an
//! immutable rustls server configuration. The context is built once at
//! startup; missing or unreadable certificate material is fatal before the
//! listener binds.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use rustls::pki_types::{CertificateDer, PrivateKeyDer};
use rustls::server::WebPkiClientVerifier;
use rustls::{RootCertStore, ServerConfig};
use thiserror::Error;
use tokio::net::TcpStream;
use tokio_rustls::server::TlsStream;
use tokio_rustls::TlsAcceptor;

use crate::config::schema::{TlsConfig, TlsMode};

/// Error type for TLS context construction.
#[derive(Debug, Error)]
pub enum TlsError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("no certificates found in {0}")]
    EmptyCertChain(String),

    #[error("no private key found in {0}")]
    MissingKey(String),

    #[error("mutual TLS requires a CA certificate path")]
    MissingCaPath,

    #[error("rejected CA certificate in {path}: {source}")]
    CaCertificate {
        path: String,
        source: rustls::Error,
    },

    #[error("client verifier: {0}")]
    Verifier(#[from] rustls::server::VerifierBuilderError),

    #[error("TLS configuration rejected: {0}")]
    Rustls(#[from] rustls::Error),
}

/// Immutable server-side TLS context, shared for the process lifetime.
#[derive(Clone)]
pub struct TlsContext {
    acceptor: TlsAcceptor,
}

impl std::fmt::Debug for TlsContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TlsContext").finish_non_exhaustive()
    }
}

impl TlsContext {
    /// Build the server-side TLS configuration for the configured mode.
    ///
    /// Mutual mode loads the CA bundle and requires every client to present
    /// a certificate chaining to it; absent or untrusted client certificates
    /// fail the handshake. Server-only mode accepts any client.
    pub fn build(config: &TlsConfig) -> Result<Self, TlsError> {
        let certs = load_certs(Path::new(&config.cert_path))?;
        let key = load_key(Path::new(&config.key_path))?;

        let server_config = match config.mode {
            TlsMode::Mutual => {
                let ca_path = config.ca_path.as_deref().ok_or(TlsError::MissingCaPath)?;
                let mut roots = RootCertStore::empty();
                for cert in load_certs(Path::new(ca_path))? {
                    roots.add(cert).map_err(|source| TlsError::CaCertificate {
                        path: ca_path.to_string(),
                        source,
                    })?;
                }
                let verifier = WebPkiClientVerifier::builder(Arc::new(roots)).build()?;
                ServerConfig::builder()
                    .with_client_cert_verifier(verifier)
                    .with_single_cert(certs, key)?
            }
            TlsMode::ServerOnly => ServerConfig::builder()
                .with_no_client_auth()
                .with_single_cert(certs, key)?,
        };

        tracing::info!(mode = ?config.mode, "TLS context built");

        Ok(Self {
            acceptor: TlsAcceptor::from(Arc::new(server_config)),
        })
    }

    /// Perform the server-side handshake on an accepted TCP stream.
    ///
    /// Failures here are connection-scoped: the caller logs and drops the
    /// connection, the loop continues.
    pub async fn accept(&self, stream: TcpStream) -> std::io::Result<TlsStream<TcpStream>> {
        self.acceptor.accept(stream).await
    }
}

fn load_certs(path: &Path) -> Result<Vec<CertificateDer<'static>>, TlsError> {
    let file = File::open(path).map_err(|source| TlsError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let mut reader = BufReader::new(file);
    let certs = rustls_pemfile::certs(&mut reader)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| TlsError::Read {
            path: path.display().to_string(),
            source,
        })?;
    if certs.is_empty() {
        return Err(TlsError::EmptyCertChain(path.display().to_string()));
    }
    Ok(certs)
}

fn load_key(path: &Path) -> Result<PrivateKeyDer<'static>, TlsError> {
    let file = File::open(path).map_err(|source| TlsError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let mut reader = BufReader::new(file);
    rustls_pemfile::private_key(&mut reader)
        .map_err(|source| TlsError::Read {
            path: path.display().to_string(),
            source,
        })?
        .ok_or_else(|| TlsError::MissingKey(path.display().to_string()))
}
