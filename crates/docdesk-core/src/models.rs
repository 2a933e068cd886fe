//! Data models for docdesk
//!
//! Defines the document record, its summary view, the favorite and
//! history ledger records and the views that join them with documents.
//! Field names are camelCase on the wire.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::gateway::FileStat;

/// Title given to documents created without one
pub const UNTITLED: &str = "Untitled Document";

/// Kind of content a document holds
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    #[default]
    Markdown,
    Text,
}

impl DocumentType {
    /// `.md` files are markdown, everything else is plain text
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("md") => DocumentType::Markdown,
            _ => DocumentType::Text,
        }
    }
}

/// Lifecycle label of a document
///
/// Deletion is a status flip; deleted documents stay in the store.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    #[default]
    Normal,
    Archived,
    Deleted,
}

impl std::fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DocumentStatus::Normal => "normal",
            DocumentStatus::Archived => "archived",
            DocumentStatus::Deleted => "deleted",
        };
        write!(f, "{}", s)
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DocumentType::Markdown => "markdown",
            DocumentType::Text => "text",
        };
        write!(f, "{}", s)
    }
}

/// A document record, the unit the store holds
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Unique identifier, never changes
    pub id: String,
    /// Display name
    pub title: String,
    /// Backing file, empty when never bound to one
    pub path: String,
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    pub status: DocumentStatus,
    /// Byte length of the backing file
    pub size: u64,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    pub accessed_at: DateTime<Utc>,
    /// Mirrors membership in the favorites ledger
    pub is_favorite: bool,
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl Document {
    /// Build a fresh document from caller input, filling defaults
    pub fn create(id: String, input: NewDocument, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: input.title.unwrap_or_else(|| UNTITLED.to_string()),
            path: input.path.unwrap_or_default(),
            doc_type: input.doc_type.unwrap_or_default(),
            status: input.status.unwrap_or_default(),
            size: 0,
            created_at: now,
            modified_at: now,
            accessed_at: now,
            is_favorite: false,
            tags: input.tags.unwrap_or_default(),
            content: Some(input.content.unwrap_or_default()),
        }
    }

    /// Build a document bound to a file that was just read
    pub fn from_file(
        id: String,
        path: &Path,
        content: String,
        stat: &FileStat,
        now: DateTime<Utc>,
    ) -> Self {
        let title = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());

        Self {
            id,
            title,
            path: path.to_string_lossy().into_owned(),
            doc_type: DocumentType::from_path(path),
            status: DocumentStatus::Normal,
            size: stat.size,
            created_at: stat.created,
            modified_at: stat.modified,
            accessed_at: now,
            is_favorite: false,
            tags: Vec::new(),
            content: Some(content),
        }
    }

    /// Refresh a file-bound document after re-reading its file
    pub fn refresh_from_file(&mut self, content: String, stat: &FileStat, now: DateTime<Utc>) {
        self.content = Some(content);
        self.size = stat.size;
        self.accessed_at = now;
        self.modified_at = stat.modified;
    }

    /// Shallow-merge a patch; supplied fields replace, omitted ones stay
    pub fn apply(&mut self, patch: DocumentPatch, now: DateTime<Utc>) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(path) = patch.path {
            self.path = path;
        }
        if let Some(doc_type) = patch.doc_type {
            self.doc_type = doc_type;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(size) = patch.size {
            self.size = size;
        }
        if let Some(created_at) = patch.created_at {
            self.created_at = created_at;
        }
        if let Some(accessed_at) = patch.accessed_at {
            self.accessed_at = accessed_at;
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
        if let Some(content) = patch.content {
            self.content = Some(content);
        }
        self.modified_at = now;
    }

    /// Summary view without content
    pub fn summary(&self) -> DocumentSummary {
        DocumentSummary::from(self)
    }

    /// Case-insensitive substring match against title or content
    ///
    /// `needle` must already be lowercase.
    pub fn matches_query(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self
                .content
                .as_deref()
                .map(|content| content.to_lowercase().contains(needle))
                .unwrap_or(false)
    }
}

/// Document without its content, used for listings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSummary {
    pub id: String,
    pub title: String,
    pub path: String,
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    pub status: DocumentStatus,
    pub size: u64,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    pub accessed_at: DateTime<Utc>,
    pub is_favorite: bool,
    pub tags: Vec<String>,
}

impl From<&Document> for DocumentSummary {
    fn from(doc: &Document) -> Self {
        Self {
            id: doc.id.clone(),
            title: doc.title.clone(),
            path: doc.path.clone(),
            doc_type: doc.doc_type,
            status: doc.status,
            size: doc.size,
            created_at: doc.created_at,
            modified_at: doc.modified_at,
            accessed_at: doc.accessed_at,
            is_favorite: doc.is_favorite,
            tags: doc.tags.clone(),
        }
    }
}

/// Caller input for creating a document
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct NewDocument {
    pub title: Option<String>,
    pub path: Option<String>,
    #[serde(rename = "type")]
    pub doc_type: Option<DocumentType>,
    pub status: Option<DocumentStatus>,
    pub tags: Option<Vec<String>>,
    pub content: Option<String>,
}

impl NewDocument {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }
}

/// Partial update for an existing document
///
/// `id`, `isFavorite` and `modifiedAt` are not patchable; unknown
/// fields in the input are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct DocumentPatch {
    pub title: Option<String>,
    pub path: Option<String>,
    #[serde(rename = "type")]
    pub doc_type: Option<DocumentType>,
    pub status: Option<DocumentStatus>,
    pub size: Option<u64>,
    pub created_at: Option<DateTime<Utc>>,
    pub accessed_at: Option<DateTime<Utc>>,
    pub tags: Option<Vec<String>>,
    pub content: Option<String>,
}

/// Favorites ledger record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    pub id: String,
    pub document_id: String,
    pub added_time: DateTime<Utc>,
}

/// History ledger record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub document_id: String,
    pub access_time: DateTime<Utc>,
}

/// A favorited document as listed to the UI
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteDocument {
    #[serde(flatten)]
    pub document: DocumentSummary,
    pub favorite_id: String,
    pub added_time: DateTime<Utc>,
}

/// A recently accessed document as listed to the UI
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryDocument {
    #[serde(flatten)]
    pub document: DocumentSummary,
    pub history_id: String,
    pub access_time: DateTime<Utc>,
}

/// Filesystem metadata returned by `get-file-meta`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FileMeta {
    pub size: u64,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    pub accessed_at: DateTime<Utc>,
}

impl From<FileStat> for FileMeta {
    fn from(stat: FileStat) -> Self {
        Self {
            size: stat.size,
            created_at: stat.created,
            modified_at: stat.modified,
            accessed_at: stat.accessed,
        }
    }
}
