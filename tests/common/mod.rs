//! Shared helpers for integration tests: throwaway PKI, client-side TLS,
//! and server startup on an ephemeral port.

#![allow(dead_code)]

use std::io::Cursor;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rcgen::{
    BasicConstraints, CertificateParams, ExtendedKeyUsagePurpose, IsCa, KeyPair, KeyUsagePurpose,
};
use rustls::pki_types::{CertificateDer, ServerName};
use rustls::{ClientConfig, RootCertStore};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::task::JoinHandle;
use tokio_rustls::TlsConnector;

use otaserve::config::schema::{ServerConfig, TlsMode};
use otaserve::lifecycle::Shutdown;
use otaserve::net::listener::{Listener, ListenerError};
use otaserve::net::tls::TlsContext;
use otaserve::server::Server;

/// Certificate material for one test: a CA, a server identity for
/// localhost, and a client identity signed by the same CA.
pub struct TestPki {
    pub ca_cert_pem: String,
    pub ca_cert_path: PathBuf,
    pub server_cert_path: PathBuf,
    pub server_key_path: PathBuf,
    pub client_cert_pem: String,
    pub client_key_pem: String,
}

pub fn install_provider() {
    rustls::crypto::ring::default_provider()
        .install_default()
        .ok();
}

/// Unique scratch directory per test.
pub fn temp_dir(label: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "otaserve-test-{}-{}",
        label,
        std::process::id()
    ));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Generate the test PKI and write the server-side files under `dir`.
pub fn generate_pki(dir: &Path) -> TestPki {
    let ca_key = KeyPair::generate().unwrap();
    let mut ca_params = CertificateParams::new(Vec::new()).unwrap();
    ca_params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
    ca_params.key_usages = vec![
        KeyUsagePurpose::KeyCertSign,
        KeyUsagePurpose::DigitalSignature,
    ];
    let ca_cert = ca_params.self_signed(&ca_key).unwrap();

    let server_key = KeyPair::generate().unwrap();
    let mut server_params = CertificateParams::new(vec!["localhost".to_string()]).unwrap();
    server_params.extended_key_usages = vec![ExtendedKeyUsagePurpose::ServerAuth];
    let server_cert = server_params
        .signed_by(&server_key, &ca_cert, &ca_key)
        .unwrap();

    let client_key = KeyPair::generate().unwrap();
    let mut client_params = CertificateParams::new(vec!["update-client".to_string()]).unwrap();
    client_params.extended_key_usages = vec![ExtendedKeyUsagePurpose::ClientAuth];
    let client_cert = client_params
        .signed_by(&client_key, &ca_cert, &ca_key)
        .unwrap();

    let ca_cert_path = dir.join("ca-cert.pem");
    let server_cert_path = dir.join("server-cert.pem");
    let server_key_path = dir.join("server-key.pem");
    std::fs::write(&ca_cert_path, ca_cert.pem()).unwrap();
    std::fs::write(&server_cert_path, server_cert.pem()).unwrap();
    std::fs::write(&server_key_path, server_key.serialize_pem()).unwrap();

    TestPki {
        ca_cert_pem: ca_cert.pem(),
        ca_cert_path,
        server_cert_path,
        server_key_path,
        client_cert_pem: client_cert.pem(),
        client_key_pem: client_key.serialize_pem(),
    }
}

/// A self-signed client identity that no CA in the test PKI trusts.
pub fn generate_untrusted_client() -> (String, String) {
    let key = KeyPair::generate().unwrap();
    let mut params = CertificateParams::new(vec!["rogue-client".to_string()]).unwrap();
    params.extended_key_usages = vec![ExtendedKeyUsagePurpose::ClientAuth];
    let cert = params.self_signed(&key).unwrap();
    (cert.pem(), key.serialize_pem())
}

fn root_store(ca_pem: &str) -> RootCertStore {
    let mut roots = RootCertStore::empty();
    for cert in rustls_pemfile::certs(&mut Cursor::new(ca_pem.as_bytes())) {
        roots.add(cert.unwrap()).unwrap();
    }
    roots
}

/// Client config trusting the test CA, presenting no certificate.
pub fn client_config(ca_pem: &str) -> ClientConfig {
    ClientConfig::builder()
        .with_root_certificates(root_store(ca_pem))
        .with_no_client_auth()
}

/// Client config trusting the test CA and presenting the given identity.
pub fn client_config_with_identity(ca_pem: &str, cert_pem: &str, key_pem: &str) -> ClientConfig {
    let certs: Vec<CertificateDer> = rustls_pemfile::certs(&mut Cursor::new(cert_pem.as_bytes()))
        .collect::<Result<_, _>>()
        .unwrap();
    let key = rustls_pemfile::private_key(&mut Cursor::new(key_pem.as_bytes()))
        .unwrap()
        .unwrap();
    ClientConfig::builder()
        .with_root_certificates(root_store(ca_pem))
        .with_client_auth_cert(certs, key)
        .unwrap()
}

/// Server config pointing at the test PKI and content root.
pub fn server_config(pki: &TestPki, mode: TlsMode, root_dir: &Path) -> ServerConfig {
    let mut config = ServerConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.tls.mode = mode;
    config.tls.cert_path = pki.server_cert_path.display().to_string();
    config.tls.key_path = pki.server_key_path.display().to_string();
    config.tls.ca_path = Some(pki.ca_cert_path.display().to_string());
    config.content.root_dir = root_dir.display().to_string();
    config
}

/// Start the server on an ephemeral port. Returns the bound address, the
/// shutdown handle, and the accept loop's join handle.
pub async fn start_server(
    config: ServerConfig,
) -> (SocketAddr, Shutdown, JoinHandle<Result<(), ListenerError>>) {
    install_provider();
    let tls = TlsContext::build(&config.tls).unwrap();
    let listener = Listener::bind(&config.listener).unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let shutdown_rx = shutdown.subscribe();
    let handle = tokio::spawn(Server::new(config, tls).run(listener, shutdown_rx));

    (addr, shutdown, handle)
}

/// Send a raw request over TLS and collect everything the server sends
/// until it closes. Handshake or I/O failures yield whatever bytes were
/// collected up to that point (possibly none).
pub async fn send_request(addr: SocketAddr, config: ClientConfig, request: &str) -> Vec<u8> {
    let mut received = Vec::new();

    let Ok(tcp) = TcpStream::connect(addr).await else {
        return received;
    };
    let connector = TlsConnector::from(Arc::new(config));
    let server_name = ServerName::try_from("localhost".to_string()).unwrap();
    let Ok(mut stream) = connector.connect(server_name, tcp).await else {
        return received;
    };

    if stream.write_all(request.as_bytes()).await.is_err() {
        return received;
    }
    let _ = stream.read_to_end(&mut received).await;
    received
}

/// Split a raw response into (header text, body bytes).
pub fn split_response(raw: &[u8]) -> (String, Vec<u8>) {
    let pos = raw
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("response has no header terminator");
    (
        String::from_utf8(raw[..pos].to_vec()).unwrap(),
        raw[pos + 4..].to_vec(),
    )
}
