//! Request/response message channel
//!
//! The UI talks to the document service by naming an operation and
//! passing JSON arguments; it gets back one response per request.
//!
//! - `message`: wire envelopes and the operation table
//! - `dispatch`: maps an operation to a service call
//! - `channel`: tokio task serving requests one at a time
//! - `lines`: newline-delimited JSON transport over any async reader/writer

pub mod channel;
pub mod dispatch;
pub mod lines;
pub mod message;

pub use channel::{ChannelError, IpcClient, IpcServer};
pub use dispatch::dispatch;
pub use lines::serve_lines;
pub use message::{ErrorBody, ErrorKind, Operation, Request, Response};
