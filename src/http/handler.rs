//! Per-connection request handling.
//!
//! # Responsibilities
//! - Read and parse the single request line
//! - Resolve the target path against the content root
//! - Serve the file, the fixed 404, or silence for non-GET methods
//! - Close the connection on every exit path

use std::path::Path;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio_rustls::server::TlsStream;

use crate::http::request::{Request, RequestError, REQUEST_BUFFER_SIZE};
use crate::http::{response, streamer};

/// Serve one established connection, then close it.
///
/// Connection-scoped failures are returned for logging at the accept loop;
/// they never terminate the server. The TLS close_notify is attempted
/// whatever the outcome, and the connection drops exactly once.
pub async fn serve_connection(
    stream: &mut TlsStream<TcpStream>,
    root: &Path,
) -> Result<(), RequestError> {
    let result = handle(stream, root).await;
    let _ = stream.shutdown().await;
    result
}

async fn handle(stream: &mut TlsStream<TcpStream>, root: &Path) -> Result<(), RequestError> {
    // Single fixed-size read. A request line split across network reads
    // stays split and fails to parse.
    let mut buffer = [0u8; REQUEST_BUFFER_SIZE];
    let n = stream.read(&mut buffer).await?;

    let request = Request::parse(&buffer[..n], root)?;
    tracing::debug!(method = %request.method, path = %request.path, "Request received");

    if !request.is_get() {
        // Silence is the contract for anything but GET.
        tracing::debug!(method = %request.method, "Ignoring non-GET method");
        return Ok(());
    }

    match tokio::fs::metadata(&request.resolved).await {
        Ok(metadata) if metadata.is_file() => {
            // Size sampled once, used for Content-Length and progress both.
            let total_size = metadata.len();
            tracing::info!(
                file = %request.resolved.display(),
                bytes = total_size,
                "Sending file"
            );
            let header = response::ok_header(total_size);
            streamer::stream_file(stream, &header, &request.resolved, total_size).await?;
        }
        _ => {
            tracing::info!(path = %request.path, "File not found");
            stream.write_all(response::NOT_FOUND).await?;
        }
    }

    Ok(())
}
