//! Newline-delimited JSON transport
//!
//! Each input line is one [`Request`]; each output line is the matching
//! [`Response`]. Blank lines are skipped. A line that does not decode as a
//! request, invalid UTF-8 included, is answered with a `BadRequest` failure
//! carrying id 0. Only I/O errors on the streams end the loop.

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

use super::channel::IpcClient;
use super::message::{ErrorKind, Request, Response};

/// Serve requests from `reader` until EOF, returning how many were answered
pub async fn serve_lines<R, W>(client: &IpcClient, mut reader: R, mut writer: W) -> Result<usize>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();
    let mut answered = 0;

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .await
            .context("Failed to read request")?;
        if read == 0 {
            break;
        }

        let line = buf.trim_ascii();
        if line.is_empty() {
            continue;
        }

        let response = match serde_json::from_slice::<Request>(line) {
            Ok(request) => client.send(request).await?,
            Err(e) => {
                warn!(error = %e, "Malformed request line");
                Response::failure(0, ErrorKind::BadRequest, format!("Malformed request: {}", e))
            }
        };

        let mut encoded = serde_json::to_vec(&response)?;
        encoded.push(b'\n');
        writer
            .write_all(&encoded)
            .await
            .context("Failed to write response")?;
        writer.flush().await?;
        answered += 1;
    }

    debug!(answered, "Request stream ended");
    Ok(answered)
}
