//! Service error taxonomy
//!
//! Every document operation either succeeds fully or fails with one of
//! these errors. The `kind()` label is what the message channel reports.

use thiserror::Error;

use crate::gateway::GatewayError;

/// Errors surfaced by the document service
#[derive(Error, Debug)]
pub enum ServiceError {
    /// No record with this id exists in the store
    #[error("Document with id {id} not found")]
    NotFound { id: String },

    /// Filesystem or dialog failure, with the operation that hit it
    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: GatewayError,
    },

    /// Malformed input
    #[error("Invalid input: {0}")]
    Validation(String),
}

impl ServiceError {
    pub fn not_found(id: impl Into<String>) -> Self {
        ServiceError::NotFound { id: id.into() }
    }

    pub fn io(context: &'static str, source: GatewayError) -> Self {
        ServiceError::Io { context, source }
    }

    /// Stable wire label for this error
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::NotFound { .. } => "NotFound",
            ServiceError::Io { .. } => "IOError",
            ServiceError::Validation(_) => "ValidationError",
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::Access;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn test_not_found_message() {
        let err = ServiceError::not_found("abc123");
        assert_eq!(err.to_string(), "Document with id abc123 not found");
        assert_eq!(err.kind(), "NotFound");
    }

    #[test]
    fn test_io_error_wraps_underlying_message() {
        let source = GatewayError::classify(
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
            PathBuf::from("/locked/file.md"),
            Access::Read,
        );
        let err = ServiceError::io("Failed to read file", source);

        let msg = err.to_string();
        assert!(msg.starts_with("Failed to read file: "));
        assert!(msg.contains("/locked/file.md"));
        assert_eq!(err.kind(), "IOError");
    }

    #[test]
    fn test_validation_kind() {
        let err = ServiceError::Validation("bad filter".to_string());
        assert_eq!(err.kind(), "ValidationError");
        assert!(err.to_string().contains("bad filter"));
    }
}
