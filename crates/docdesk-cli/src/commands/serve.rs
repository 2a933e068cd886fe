//! Message channel over stdio

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::BufReader;
use tracing::info;

use docdesk_core::ipc::{serve_lines, IpcServer};
use docdesk_core::DocumentService;

/// Answer newline-delimited JSON requests from stdin until EOF
pub async fn run(service: Arc<DocumentService>) -> Result<()> {
    let (client, server) = IpcServer::spawn(service);
    info!("Serving message channel on stdio");

    let stdin = BufReader::new(tokio::io::stdin());
    let answered = serve_lines(&client, stdin, tokio::io::stdout()).await?;

    drop(client);
    server.await.context("Message channel task failed")?;
    info!(answered, "Message channel finished");
    Ok(())
}
