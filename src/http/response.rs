//! Response wire format.
//!
//! Exactly the headers listed here, nothing more: this is not a compliant
//! HTTP implementation, just enough for the update clients under test.

/// Fixed not-found response with a 13-byte plain-text body.
pub const NOT_FOUND: &[u8] =
    b"HTTP/1.1 404 Not Found\r\nContent-Type: text/html\r\nContent-Length: 13\r\n\r\n404 Not Found";

/// Build the success header for a body of `content_length` bytes.
///
/// The declared length is whatever the caller sampled before streaming; it
/// is not revalidated against the bytes actually sent.
pub fn ok_header(content_length: u64) -> Vec<u8> {
    format!(
        "HTTP/1.1 200 OK\r\nContent-Length: {content_length}\r\nContent-Type: application/octet-stream\r\n\r\n"
    )
    .into_bytes()
}
