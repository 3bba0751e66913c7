//! Minimal HTTP-subset layer.
//!
//! # Data Flow
//! ```text
//! Established TLS connection
//!     → handler.rs (single read, dispatch)
//!     → request.rs (parse request line, resolve path)
//!     → response.rs (header bytes) + streamer.rs (chunked body, progress)
//!     → connection closed
//! ```
//!
//! # Design Decisions
//! - One request per connection, no keep-alive, no header parsing
//! - Non-GET methods receive no response by contract
//! - All failures are caught at the connection boundary

pub mod handler;
pub mod request;
pub mod response;
pub mod streamer;

pub use request::{Request, RequestError};
pub use streamer::TransferProgress;
