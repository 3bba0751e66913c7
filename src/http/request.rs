//! Request parsing and path resolution.
//!
//! The wire format is a deliberately minimal HTTP/1.1 subset: one request
//! line, one response, connection closed. The request is read exactly once
//! into a fixed buffer; a request line split across multiple network reads
//! is not reassembled.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Fixed size of the single request read.
pub const REQUEST_BUFFER_SIZE: usize = 1024;

/// Errors raised while reading or interpreting a request.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("connection closed before a request was received")]
    Empty,

    #[error("request is not valid UTF-8")]
    Encoding,

    #[error("malformed request line: {0:?}")]
    Malformed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A parsed request line, scoped to a single connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: String,
    pub path: String,
    /// Filesystem path the request resolves to, relative to the content
    /// root. No canonicalization or traversal protection is applied.
    pub resolved: PathBuf,
}

impl Request {
    /// Parse the first line of a raw request buffer.
    ///
    /// The line must carry exactly three whitespace-separated tokens:
    /// method, path, protocol version.
    pub fn parse(raw: &[u8], root: &Path) -> Result<Self, RequestError> {
        if raw.is_empty() {
            return Err(RequestError::Empty);
        }
        let text = std::str::from_utf8(raw).map_err(|_| RequestError::Encoding)?;
        let line = text.lines().next().unwrap_or("");

        let tokens: Vec<&str> = line.split_whitespace().collect();
        let &[method, path, _version] = tokens.as_slice() else {
            return Err(RequestError::Malformed(line.to_string()));
        };

        Ok(Self {
            method: method.to_string(),
            path: path.to_string(),
            resolved: resolve_path(path, root),
        })
    }

    /// Whether this request gets a response at all. Anything but GET is
    /// answered with silence.
    pub fn is_get(&self) -> bool {
        self.method == "GET"
    }
}

/// Map a request path onto the content root. `/` serves `index.html`; the
/// leading separator is stripped to form a relative path.
fn resolve_path(path: &str, root: &Path) -> PathBuf {
    let path = if path == "/" { "/index.html" } else { path };
    root.join(path.trim_start_matches('/'))
}
