//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming TCP connection
//!     → listener.rs (bind, backlog, raw accept)
//!     → tls.rs (handshake per configured auth mode)
//!     → Hand off to the request handler
//!
//! Accept loop states:
//!     Listening → Accepting → {Serving | Listening} → Closed
//! ```
//!
//! # Design Decisions
//! - TLS context built once at startup; handshake failures never kill the loop
//! - Accept calls are bounded so shutdown can be observed between them
//! - One connection at a time: the loop serves sequentially, by contract

pub mod listener;
pub mod tls;

pub use listener::{Listener, ListenerError};
pub use tls::{TlsContext, TlsError};
