//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     Load config → Validate → Build TLS context → Bind → Accept loop
//!
//! Shutdown (shutdown.rs):
//!     Signal received → observed at next accept timeout → loop exits
//!     → listening socket released
//!
//! Signals (signals.rs):
//!     Ctrl+C → trigger shutdown
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal, no partial start
//! - Shutdown is cooperative: the accept timeout is the sole check point
//! - In-flight connection handling is not preempted

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
