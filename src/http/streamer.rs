//! Chunked response streaming with decile progress reporting.
//!
//! The body goes out in fixed-size chunks, read-then-write, no pipelining.
//! The total size is sampled once by the caller before any byte is sent and
//! serves as both the declared Content-Length and the progress denominator;
//! a file mutated mid-transfer produces an inconsistent length on the wire.

use std::path::Path;

use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Fixed chunk size for body writes.
pub const CHUNK_SIZE: usize = 4096;

/// Transfer accounting for one response body.
#[derive(Debug)]
pub struct TransferProgress {
    total_size: u64,
    sent_size: u64,
    next_threshold_percent: u8,
}

impl TransferProgress {
    pub fn new(total_size: u64) -> Self {
        Self {
            total_size,
            sent_size: 0,
            next_threshold_percent: 10,
        }
    }

    pub fn sent_size(&self) -> u64 {
        self.sent_size
    }

    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    /// Account for one written chunk and return every decile threshold the
    /// transfer newly crossed, in order. The threshold only advances, in
    /// steps of 10, capped at 100.
    pub fn record(&mut self, chunk_len: usize) -> Vec<u8> {
        self.sent_size += chunk_len as u64;

        let mut crossed = Vec::new();
        if self.total_size == 0 {
            return crossed;
        }
        let percent = self.sent_size * 100 / self.total_size;
        while u64::from(self.next_threshold_percent) <= percent {
            crossed.push(self.next_threshold_percent);
            if self.next_threshold_percent >= 100 {
                break;
            }
            self.next_threshold_percent += 10;
        }
        crossed
    }
}

/// Stream `file` as the response body after writing `header`.
///
/// The header goes out as a single write, then the body sequentially in
/// `CHUNK_SIZE` chunks until end-of-file. A progress event is logged at
/// every decile of `total_size`. A write failure aborts the transfer with
/// no retry; the caller closes the connection.
pub async fn stream_file<W>(
    writer: &mut W,
    header: &[u8],
    path: &Path,
    total_size: u64,
) -> Result<u64, std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    let mut progress = TransferProgress::new(total_size);

    writer.write_all(header).await?;

    let mut file = File::open(path).await?;
    let mut chunk = [0u8; CHUNK_SIZE];
    loop {
        let n = file.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        writer.write_all(&chunk[..n]).await?;
        for percent in progress.record(n) {
            tracing::info!(
                percent,
                sent = progress.sent_size(),
                total = progress.total_size(),
                file = %path.display(),
                "Transfer progress"
            );
        }
    }
    writer.flush().await?;

    Ok(progress.sent_size())
}
