//! otaserve binary entry point.
//!
//! Startup order is fixed: logging, CLI, configuration, TLS context,
//! listener, signal handler, accept loop. Any failure before the loop
//! starts is fatal; there is no partial startup.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use otaserve::config::loader::load_config;
use otaserve::config::schema::ServerConfig;
use otaserve::lifecycle::{signals, Shutdown};
use otaserve::net::listener::Listener;
use otaserve::net::tls::TlsContext;
use otaserve::server::Server;

/// Minimal secure file-transfer server for update payload delivery.
#[derive(Parser, Debug)]
#[command(name = "otaserve", version)]
struct Args {
    /// Path to the TOML configuration file. Defaults apply if omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address (e.g. "0.0.0.0:8443").
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "otaserve=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // rustls needs a process-wide crypto provider before any context is built.
    rustls::crypto::ring::default_provider()
        .install_default()
        .ok();

    tracing::info!("otaserve v0.1.0 starting");

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }

    tracing::info!(
        bind_address = %config.listener.bind_address,
        mode = ?config.tls.mode,
        root_dir = %config.content.root_dir,
        "Configuration loaded"
    );

    // Fatal before the listener binds: no partial startup.
    let tls = TlsContext::build(&config.tls)?;
    let listener = Listener::bind(&config.listener)?;

    let shutdown = Shutdown::new();
    let shutdown_rx = shutdown.subscribe();
    signals::spawn_interrupt_handler(shutdown);

    Server::new(config, tls).run(listener, shutdown_rx).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
