//! Gateway error handling
//!
//! Provides typed errors for filesystem and dialog operations with
//! descriptive messages and recovery suggestions.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Kind of filesystem access that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
    Stat,
}

/// Errors that can occur while talking to the filesystem or a picker
#[derive(Error, Debug)]
pub enum GatewayError {
    /// File not found
    #[error("File not found: '{path}'")]
    NotFound { path: PathBuf },

    /// Permission denied accessing path
    #[error("Permission denied: cannot access '{path}'. Check file permissions.")]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Disk is full or quota exceeded
    #[error(
        "Disk full or quota exceeded while writing to '{path}'. Free up disk space and try again."
    )]
    DiskFull {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to read file
    #[error("Failed to read '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to write file
    #[error("Failed to write '{path}': {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to read file metadata
    #[error("Failed to stat '{path}': {source}")]
    StatError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file or folder picker could not be shown
    #[error("File dialog failed: {0}")]
    Picker(String),
}

impl GatewayError {
    /// Classify an I/O error by its kind (permission, disk full, etc.)
    pub fn classify(error: io::Error, path: PathBuf, access: Access) -> Self {
        match error.kind() {
            io::ErrorKind::PermissionDenied => GatewayError::PermissionDenied {
                path,
                source: error,
            },
            io::ErrorKind::NotFound => GatewayError::NotFound { path },
            _ if is_disk_full_error(&error) => GatewayError::DiskFull {
                path,
                source: error,
            },
            _ => match access {
                Access::Read => GatewayError::ReadError {
                    path,
                    source: error,
                },
                Access::Write => GatewayError::WriteError {
                    path,
                    source: error,
                },
                Access::Stat => GatewayError::StatError {
                    path,
                    source: error,
                },
            },
        }
    }

    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            GatewayError::DiskFull { .. } | GatewayError::PermissionDenied { .. }
        )
    }

    /// Get a recovery suggestion for this error
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            GatewayError::DiskFull { .. } => Some("Free up disk space and try again."),
            GatewayError::PermissionDenied { .. } => {
                Some("Check file and directory permissions. You may need to run with different permissions or change ownership.")
            }
            GatewayError::NotFound { .. } => {
                Some("Check that the path exists and is spelled correctly.")
            }
            GatewayError::Picker(_) => {
                Some("The picker needs an interactive terminal. Pass the path directly instead.")
            }
            _ => None,
        }
    }
}

/// Check if an I/O error indicates disk full condition
fn is_disk_full_error(error: &io::Error) -> bool {
    let msg = error.to_string().to_lowercase();
    msg.contains("no space left")
        || msg.contains("disk full")
        || msg.contains("quota exceeded")
        || msg.contains("not enough space")
}

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;
