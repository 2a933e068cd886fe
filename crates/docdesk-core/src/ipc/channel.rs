//! Async message channel
//!
//! [`IpcServer`] owns the service on a tokio task and answers queued
//! requests one at a time, so store mutations of two requests never
//! interleave. Filesystem and picker operations run on the blocking pool
//! while the server task awaits them.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::service::DocumentService;

use super::dispatch::dispatch;
use super::message::{ErrorKind, Operation, Request, Response};

/// Requests that can wait in the queue before senders are back-pressured
const QUEUE_DEPTH: usize = 64;

type Job = (Request, oneshot::Sender<Response>);

#[derive(Error, Debug)]
pub enum ChannelError {
    #[error("Message channel is closed")]
    Closed,
}

/// Spawns the task that serves requests
pub struct IpcServer;

impl IpcServer {
    /// Start serving on the current tokio runtime
    ///
    /// The task ends once every [`IpcClient`] clone has been dropped.
    pub fn spawn(service: Arc<DocumentService>) -> (IpcClient, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel::<Job>(QUEUE_DEPTH);
        let handle = tokio::spawn(serve(service, rx));
        (IpcClient::new(tx), handle)
    }
}

async fn serve(service: Arc<DocumentService>, mut rx: mpsc::Receiver<Job>) {
    info!("Message channel started");
    while let Some((request, reply)) = rx.recv().await {
        let response = execute(&service, request).await;
        if reply.send(response).is_err() {
            debug!("Caller went away before its response was ready");
        }
    }
    info!("Message channel closed");
}

async fn execute(service: &Arc<DocumentService>, request: Request) -> Response {
    let blocking = request
        .op
        .parse::<Operation>()
        .map(Operation::is_blocking)
        .unwrap_or(false);
    if !blocking {
        return dispatch(service, request);
    }

    let id = request.id;
    let service = Arc::clone(service);
    match tokio::task::spawn_blocking(move || dispatch(&service, request)).await {
        Ok(response) => response,
        Err(e) => {
            error!(id, error = %e, "Blocking operation did not complete");
            Response::failure(
                id,
                ErrorKind::InternalError,
                format!("Operation did not complete: {}", e),
            )
        }
    }
}

/// Handle for sending requests to a running [`IpcServer`]
#[derive(Clone)]
pub struct IpcClient {
    tx: mpsc::Sender<Job>,
    next_id: Arc<AtomicU64>,
}

impl IpcClient {
    fn new(tx: mpsc::Sender<Job>) -> Self {
        Self {
            tx,
            next_id: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Send a request with a caller-chosen id and wait for its response
    pub async fn send(&self, request: Request) -> Result<Response, ChannelError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send((request, reply_tx))
            .await
            .map_err(|_| ChannelError::Closed)?;
        reply_rx.await.map_err(|_| ChannelError::Closed)
    }

    /// Invoke an operation by name, numbering the request automatically
    pub async fn invoke(&self, op: &str, args: Value) -> Result<Response, ChannelError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        self.send(Request::new(id, op, args)).await
    }
}
