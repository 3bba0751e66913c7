//! otaserve — minimal secure file-transfer server for update payloads.
//!
//! Validates delivery of update payloads over TLS in two authentication
//! modes: mutual TLS (client certificate required, verified against a
//! trusted CA) and server-only TLS (client identity unverified).
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │                  OTASERVE                    │
//!                    │                                              │
//!   TLS client       │  ┌─────────┐   ┌─────────┐   ┌────────────┐ │
//!   ─────────────────┼─▶│   net   │──▶│  http   │──▶│   http     │ │
//!                    │  │listener │   │ handler │   │  streamer  │ │
//!                    │  │  + tls  │   │         │   │ (progress) │ │
//!                    │  └─────────┘   └─────────┘   └────────────┘ │
//!                    │                                              │
//!                    │  ┌────────────────────────────────────────┐  │
//!                    │  │         Cross-Cutting Concerns         │  │
//!                    │  │   ┌────────┐        ┌─────────────┐    │  │
//!                    │  │   │ config │        │  lifecycle  │    │  │
//!                    │  │   │        │        │  shutdown   │    │  │
//!                    │  │   └────────┘        └─────────────┘    │  │
//!                    │  └────────────────────────────────────────┘  │
//!                    └──────────────────────────────────────────────┘
//! ```
//!
//! One connection at a time: the accept loop fully processes each client
//! before accepting the next. Connection-scoped failures never terminate
//! the server; only configuration failures and unexpected accept errors
//! are fatal.

// Core subsystems
pub mod config;
pub mod http;
pub mod net;
pub mod server;

// Cross-cutting concerns
pub mod lifecycle;

pub use config::schema::ServerConfig;
pub use lifecycle::Shutdown;
pub use net::tls::TlsContext;
pub use server::Server;
