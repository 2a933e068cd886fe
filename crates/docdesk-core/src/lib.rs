//! docdesk core library
//!
//! The system of record behind the docdesk document manager: documents,
//! favorites and access history, plus the message channel a UI uses to
//! drive them.
//!
//! # Architecture
//!
//! - **Stores**: in-memory document store and the favorites/history ledgers
//! - **Service**: the only writer to the stores; every UI request ends here
//! - **Gateway**: filesystem and picker access, swappable for tests
//!
//! Nothing is persisted. State lives for as long as the service does.
//!
//! # Quick Start
//!
//! ```text
//! let service = DocumentService::new(LocalGateway::new());
//!
//! let doc = service.create_document(NewDocument::titled("Notes"));
//! service.add_favorite(&doc.id)?;
//!
//! let (client, _task) = IpcServer::spawn(Arc::new(service));
//! let response = client.invoke("list-favorites", Value::Null).await?;
//! ```
//!
//! # Modules
//!
//! - `service`: document service (main entry point)
//! - `models`: documents, ledger records and listing views
//! - `filter`: list filtering and sorting
//! - `store`: document store and ledgers
//! - `gateway`: file and dialog gateway
//! - `ipc`: request/response message channel
//! - `system`: host system information
//! - `config`: application configuration

pub mod config;
pub mod error;
pub mod filter;
pub mod gateway;
pub mod ids;
pub mod ipc;
pub mod models;
pub mod service;
pub mod store;
pub mod system;

pub use config::Config;
pub use error::{ServiceError, ServiceResult};
pub use filter::{DocumentFilter, SortField, SortOrder};
pub use gateway::{
    FileFilter, FileGateway, FileStat, GatewayError, LocalGateway, NoPicker, Picker,
};
pub use ids::{IdGenerator, RandomIds, SequentialIds};
pub use ipc::{ErrorKind, IpcClient, IpcServer, Operation, Request, Response};
pub use models::{
    Document, DocumentPatch, DocumentStatus, DocumentSummary, DocumentType, Favorite,
    FavoriteDocument, FileMeta, HistoryDocument, HistoryEntry, NewDocument,
};
pub use service::DocumentService;
pub use system::SystemInfo;
