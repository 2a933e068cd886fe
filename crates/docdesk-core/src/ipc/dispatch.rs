//! Operation dispatch
//!
//! Decodes a request's arguments for its operation, calls the matching
//! [`DocumentService`] method and encodes the outcome as a [`Response`].

use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, error, warn};

use crate::error::ServiceError;
use crate::filter::DocumentFilter;
use crate::models::{DocumentPatch, NewDocument};
use crate::service::DocumentService;
use crate::system;

use super::message::{ErrorKind, Operation, Request, Response};

#[derive(Debug, Deserialize)]
struct IdArgs {
    id: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ListArgs {
    filter: Option<DocumentFilter>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CreateArgs {
    document: NewDocument,
}

#[derive(Debug, Deserialize)]
struct UpdateArgs {
    id: String,
    #[serde(default)]
    patch: DocumentPatch,
}

#[derive(Debug, Deserialize)]
struct PathArgs {
    path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct SaveArgs {
    id: String,
    content: String,
}

enum Failure {
    Service(ServiceError),
    Encode(serde_json::Error),
}

impl From<ServiceError> for Failure {
    fn from(error: ServiceError) -> Self {
        Failure::Service(error)
    }
}

impl From<serde_json::Error> for Failure {
    fn from(error: serde_json::Error) -> Self {
        Failure::Encode(error)
    }
}

/// Execute one request against the service
///
/// Runs synchronously to completion. Callers on an async runtime should
/// move blocking operations (see [`Operation::is_blocking`]) off the
/// runtime threads.
pub fn dispatch(service: &DocumentService, request: Request) -> Response {
    let Request { id, op, args } = request;

    let operation = match op.parse::<Operation>() {
        Ok(operation) => operation,
        Err(message) => {
            warn!(id, op = %op, "Rejected unknown operation");
            return Response::failure(id, ErrorKind::UnknownOperation, message);
        }
    };

    debug!(id, op = %operation, "Dispatching request");
    match run(service, operation, args) {
        Ok(result) => Response::success(id, result),
        Err(Failure::Service(e)) => {
            debug!(id, op = %operation, kind = e.kind(), error = %e, "Request failed");
            Response::from_service_error(id, &e)
        }
        Err(Failure::Encode(e)) => {
            error!(id, op = %operation, error = %e, "Failed to encode result");
            Response::failure(id, ErrorKind::InternalError, format!("Failed to encode result: {}", e))
        }
    }
}

fn run(service: &DocumentService, operation: Operation, args: Value) -> Result<Value, Failure> {
    let value = match operation {
        Operation::GetDocument => {
            let IdArgs { id } = parse_args(operation, args)?;
            encode(service.get_document(&id)?)?
        }
        Operation::ListDocuments => {
            let ListArgs { filter } = parse_args(operation, args)?;
            encode(service.list_documents(filter.as_ref()))?
        }
        Operation::CreateDocument => {
            let CreateArgs { document } = parse_args(operation, args)?;
            encode(service.create_document(document))?
        }
        Operation::UpdateDocument => {
            let UpdateArgs { id, patch } = parse_args(operation, args)?;
            encode(service.update_document(&id, patch)?)?
        }
        Operation::DeleteDocument => {
            let IdArgs { id } = parse_args(operation, args)?;
            encode(service.delete_document(&id)?)?
        }
        Operation::ReadFile => {
            let PathArgs { path } = parse_args(operation, args)?;
            encode(service.read_file(&path)?)?
        }
        Operation::SaveFile => {
            let SaveArgs { id, content } = parse_args(operation, args)?;
            encode(service.save_file(&id, &content)?)?
        }
        Operation::GetFileMeta => {
            let PathArgs { path } = parse_args(operation, args)?;
            encode(service.get_file_meta(&path)?)?
        }
        Operation::AddFavorite => {
            let IdArgs { id } = parse_args(operation, args)?;
            encode(service.add_favorite(&id)?)?
        }
        Operation::RemoveFavorite => {
            let IdArgs { id } = parse_args(operation, args)?;
            encode(service.remove_favorite(&id)?)?
        }
        Operation::ListFavorites => encode(service.list_favorites())?,
        Operation::AddHistory => {
            let IdArgs { id } = parse_args(operation, args)?;
            encode(service.add_history(&id)?)?
        }
        Operation::ListHistory => encode(service.list_history())?,
        Operation::ClearHistory => encode(service.clear_history())?,
        Operation::SelectFile => encode(service.select_file()?)?,
        Operation::SelectFolder => encode(service.select_folder()?)?,
        Operation::SystemInfo => encode(system::collect())?,
        Operation::Echo => args,
    };
    Ok(value)
}

/// Decode an operation's arguments; missing args count as `{}`
fn parse_args<T: DeserializeOwned>(operation: Operation, args: Value) -> Result<T, ServiceError> {
    let args = if args.is_null() {
        Value::Object(Map::new())
    } else {
        args
    };
    serde_json::from_value(args)
        .map_err(|e| ServiceError::Validation(format!("bad arguments for {}: {}", operation, e)))
}

fn encode<T: Serialize>(value: T) -> Result<Value, serde_json::Error> {
    serde_json::to_value(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::LocalGateway;
    use crate::ids::SequentialIds;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn service() -> DocumentService {
        DocumentService::new(LocalGateway::new()).with_ids(SequentialIds::new("id-"))
    }

    fn call(service: &DocumentService, op: &str, args: Value) -> Response {
        dispatch(service, Request::new(1, op, args))
    }

    fn ok(service: &DocumentService, op: &str, args: Value) -> Value {
        let response = call(service, op, args);
        assert!(response.ok, "{} failed: {:?}", op, response.error);
        response.result.unwrap()
    }

    fn error_kind(response: &Response) -> ErrorKind {
        response.error.as_ref().unwrap().kind
    }

    #[test]
    fn test_create_then_get() {
        let service = service();
        let created = ok(&service, "create-document", json!({"document": {"title": "A"}}));
        assert_eq!(created["id"], "id-1");

        let fetched = ok(&service, "get-document", json!({"id": "id-1"}));
        assert_eq!(fetched["title"], "A");
        assert_eq!(fetched["status"], "normal");
        assert_eq!(fetched["type"], "markdown");
        assert_eq!(fetched["tags"], json!([]));
        assert_eq!(fetched["isFavorite"], false);
    }

    #[test]
    fn test_create_without_args_uses_defaults() {
        let service = service();
        let created = ok(&service, "create-document", Value::Null);
        assert_eq!(created["title"], "Untitled Document");
        assert_eq!(created["path"], "");
    }

    #[test]
    fn test_get_missing_is_not_found() {
        let service = service();
        let response = call(&service, "get-document", json!({"id": "nope"}));
        assert!(!response.ok);
        assert_eq!(error_kind(&response), ErrorKind::NotFound);
        assert_eq!(
            response.error.unwrap().message,
            "Document with id nope not found"
        );
    }

    #[test]
    fn test_unknown_operation() {
        let service = service();
        let response = call(&service, "drop-tables", Value::Null);
        assert_eq!(response.id, 1);
        assert_eq!(error_kind(&response), ErrorKind::UnknownOperation);
    }

    #[test]
    fn test_malformed_args_are_validation_errors() {
        let service = service();

        let missing_id = call(&service, "get-document", json!({}));
        assert_eq!(error_kind(&missing_id), ErrorKind::ValidationError);
        assert!(missing_id.error.unwrap().message.contains("get-document"));

        let bad_filter = call(
            &service,
            "list-documents",
            json!({"filter": {"status": "shredded"}}),
        );
        assert_eq!(error_kind(&bad_filter), ErrorKind::ValidationError);
    }

    #[test]
    fn test_list_documents_summaries_and_filter() {
        let service = service();
        ok(&service, "create-document", json!({"document": {"title": "A", "content": "x"}}));
        ok(&service, "create-document", json!({"document": {"title": "B"}}));
        ok(&service, "add-favorite", json!({"id": "id-2"}));

        let all = ok(&service, "list-documents", Value::Null);
        assert_eq!(all.as_array().unwrap().len(), 2);
        assert!(all[0].get("content").is_none());

        let favorites = ok(&service, "list-documents", json!({"filter": {"favorite": true}}));
        assert_eq!(favorites.as_array().unwrap().len(), 1);
        assert_eq!(favorites[0]["title"], "B");

        let unfiltered = ok(&service, "list-documents", json!({"filter": {"favorite": false}}));
        assert_eq!(unfiltered.as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_update_and_delete() {
        let service = service();
        ok(
            &service,
            "create-document",
            json!({"document": {"title": "A", "tags": ["keep"]}}),
        );

        let updated = ok(
            &service,
            "update-document",
            json!({"id": "id-1", "patch": {"title": "B", "isFavorite": true}}),
        );
        assert_eq!(updated["title"], "B");
        assert_eq!(updated["tags"], json!(["keep"]));
        assert_eq!(updated["isFavorite"], false);

        assert_eq!(ok(&service, "delete-document", json!({"id": "id-1"})), json!(true));
        let fetched = ok(&service, "get-document", json!({"id": "id-1"}));
        assert_eq!(fetched["status"], "deleted");
    }

    #[test]
    fn test_file_operations() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("note.md");
        fs::write(&path, "# Hello").unwrap();

        let service = service();
        let doc = ok(&service, "read-file", json!({"path": path}));
        assert_eq!(doc["content"], "# Hello");
        assert_eq!(doc["title"], "note.md");
        let id = doc["id"].as_str().unwrap().to_string();

        assert_eq!(
            ok(&service, "save-file", json!({"id": id, "content": "changed"})),
            json!(true)
        );
        assert_eq!(fs::read_to_string(&path).unwrap(), "changed");

        let meta = ok(&service, "get-file-meta", json!({"path": path}));
        assert_eq!(meta["size"], 7);
        assert!(meta["modifiedAt"].is_string());

        let history = ok(&service, "list-history", Value::Null);
        assert_eq!(history[0]["id"], id.as_str());
        assert!(history[0]["historyId"].is_string());
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let temp = TempDir::new().unwrap();
        let service = service();
        let response = call(
            &service,
            "read-file",
            json!({"path": temp.path().join("missing.md")}),
        );
        assert_eq!(error_kind(&response), ErrorKind::Io);
        assert!(response.error.unwrap().message.starts_with("Failed to read file"));
    }

    #[test]
    fn test_favorites_and_history_channels() {
        let service = service();
        ok(&service, "create-document", json!({"document": {"title": "A"}}));

        ok(&service, "add-favorite", json!({"id": "id-1"}));
        ok(&service, "add-favorite", json!({"id": "id-1"}));
        let favorites = ok(&service, "list-favorites", Value::Null);
        assert_eq!(favorites.as_array().unwrap().len(), 1);
        assert_eq!(favorites[0]["favoriteId"], "id-2");

        let removed = ok(&service, "remove-favorite", json!({"id": "id-1"}));
        assert_eq!(removed["isFavorite"], false);

        assert_eq!(ok(&service, "add-history", json!({"id": "id-1"})), json!(true));
        assert_eq!(ok(&service, "list-history", Value::Null).as_array().unwrap().len(), 1);
        assert_eq!(ok(&service, "clear-history", Value::Null), json!(true));
        assert_eq!(ok(&service, "list-history", Value::Null), json!([]));
    }

    #[test]
    fn test_picker_cancel_is_null() {
        let service = service();
        assert_eq!(ok(&service, "select-file", Value::Null), Value::Null);
        assert_eq!(ok(&service, "select-folder", Value::Null), Value::Null);
    }

    #[test]
    fn test_echo_and_system_info() {
        let service = service();
        assert_eq!(ok(&service, "echo", json!({"ping": 1})), json!({"ping": 1}));

        let info = ok(&service, "system-info", Value::Null);
        assert!(info["cpu"].is_string());
        assert!(info["memory"].as_str().unwrap().ends_with("GB"));
    }
}
