//! Message channel types
//!
//! One JSON object per message. Requests carry a caller-chosen id that the
//! matching response echoes back.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ServiceError;

/// Request sent by the UI
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Request {
    /// Correlation id, echoed in the response
    #[serde(default)]
    pub id: u64,
    /// Operation name, e.g. `get-document`
    pub op: String,
    /// Named arguments; absent for operations that take none
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub args: Value,
}

impl Request {
    pub fn new(id: u64, op: impl Into<String>, args: Value) -> Self {
        Self {
            id,
            op: op.into(),
            args,
        }
    }
}

/// Failure category reported to the UI
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    #[serde(rename = "IOError")]
    Io,
    ValidationError,
    UnknownOperation,
    BadRequest,
    InternalError,
}

impl From<&ServiceError> for ErrorKind {
    fn from(error: &ServiceError) -> Self {
        match error {
            ServiceError::NotFound { .. } => ErrorKind::NotFound,
            ServiceError::Io { .. } => ErrorKind::Io,
            ServiceError::Validation(_) => ErrorKind::ValidationError,
        }
    }
}

/// Error payload of a rejected response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    pub kind: ErrorKind,
    pub message: String,
}

/// Response to a single request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Response {
    pub id: u64,
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

impl Response {
    pub fn success(id: u64, result: Value) -> Self {
        Self {
            id,
            ok: true,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(id: u64, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            id,
            ok: false,
            result: None,
            error: Some(ErrorBody {
                kind,
                message: message.into(),
            }),
        }
    }

    pub fn from_service_error(id: u64, error: &ServiceError) -> Self {
        Self::failure(id, ErrorKind::from(error), error.to_string())
    }

    /// The result value, or the error body for a rejected response
    ///
    /// A successful `null` result (e.g. a cancelled picker) comes back as
    /// `Value::Null`.
    pub fn into_result(self) -> Result<Value, ErrorBody> {
        match (self.ok, self.error) {
            (true, _) => Ok(self.result.unwrap_or(Value::Null)),
            (false, Some(error)) => Err(error),
            (false, None) => Err(ErrorBody {
                kind: ErrorKind::InternalError,
                message: "Response rejected without an error".to_string(),
            }),
        }
    }
}

/// Every operation the channel understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    GetDocument,
    ListDocuments,
    CreateDocument,
    UpdateDocument,
    DeleteDocument,
    ReadFile,
    SaveFile,
    GetFileMeta,
    AddFavorite,
    RemoveFavorite,
    ListFavorites,
    AddHistory,
    ListHistory,
    ClearHistory,
    SelectFile,
    SelectFolder,
    SystemInfo,
    Echo,
}

impl Operation {
    pub const ALL: [Operation; 18] = [
        Operation::GetDocument,
        Operation::ListDocuments,
        Operation::CreateDocument,
        Operation::UpdateDocument,
        Operation::DeleteDocument,
        Operation::ReadFile,
        Operation::SaveFile,
        Operation::GetFileMeta,
        Operation::AddFavorite,
        Operation::RemoveFavorite,
        Operation::ListFavorites,
        Operation::AddHistory,
        Operation::ListHistory,
        Operation::ClearHistory,
        Operation::SelectFile,
        Operation::SelectFolder,
        Operation::SystemInfo,
        Operation::Echo,
    ];

    /// Wire name of the operation
    pub fn name(self) -> &'static str {
        match self {
            Operation::GetDocument => "get-document",
            Operation::ListDocuments => "list-documents",
            Operation::CreateDocument => "create-document",
            Operation::UpdateDocument => "update-document",
            Operation::DeleteDocument => "delete-document",
            Operation::ReadFile => "read-file",
            Operation::SaveFile => "save-file",
            Operation::GetFileMeta => "get-file-meta",
            Operation::AddFavorite => "add-favorite",
            Operation::RemoveFavorite => "remove-favorite",
            Operation::ListFavorites => "list-favorites",
            Operation::AddHistory => "add-history",
            Operation::ListHistory => "list-history",
            Operation::ClearHistory => "clear-history",
            Operation::SelectFile => "select-file",
            Operation::SelectFolder => "select-folder",
            Operation::SystemInfo => "system-info",
            Operation::Echo => "echo",
        }
    }

    /// Whether the operation waits on the filesystem, a picker or the OS
    pub fn is_blocking(self) -> bool {
        matches!(
            self,
            Operation::ReadFile
                | Operation::SaveFile
                | Operation::GetFileMeta
                | Operation::SelectFile
                | Operation::SelectFolder
                | Operation::SystemInfo
        )
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .iter()
            .copied()
            .find(|op| op.name() == s)
            .ok_or_else(|| format!("Unknown operation: {}", s))
    }
}
