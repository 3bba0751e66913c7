//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.
//! Every field has a default so a minimal (or absent) config file works;
//! the defaults mirror the certificate file names and privileged port the
//! update-delivery test rigs expect.

use serde::{Deserialize, Serialize};

/// Root configuration for the payload server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (bind address, accept polling).
    pub listener: ListenerConfig,

    /// TLS material and authentication mode.
    pub tls: TlsConfig,

    /// Served content settings.
    pub content: ContentConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:443").
    pub bind_address: String,

    /// Listen backlog for the raw socket.
    pub backlog: u32,

    /// Accept poll interval in seconds. The accept loop re-checks the
    /// shutdown signal each time an accept call times out.
    pub accept_poll_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:443".to_string(),
            backlog: 5,
            accept_poll_secs: 1,
        }
    }
}

/// TLS authentication mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TlsMode {
    /// Require a client certificate and verify it against the configured CA.
    #[default]
    Mutual,
    /// Only the server authenticates; client identity is unverified.
    ServerOnly,
}

/// TLS configuration for the listener.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TlsConfig {
    /// Authentication mode.
    pub mode: TlsMode,

    /// Path to the server certificate chain (PEM).
    pub cert_path: String,

    /// Path to the server private key (PEM).
    pub key_path: String,

    /// Path to the CA bundle used to verify client certificates.
    /// Required in mutual mode, ignored in server-only mode.
    pub ca_path: Option<String>,
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self {
            mode: TlsMode::Mutual,
            cert_path: "mutual-server-cert.pem".to_string(),
            key_path: "mutual-server.key".to_string(),
            ca_path: Some("ca-cert.pem".to_string()),
        }
    }
}

/// Served content configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Directory request paths are resolved against. Paths are joined onto
    /// this root with no canonicalization.
    pub root_dir: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            root_dir: ".".to_string(),
        }
    }
}
