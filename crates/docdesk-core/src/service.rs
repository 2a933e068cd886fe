//! Document service
//!
//! The only writer to the document store and the two ledgers. Each
//! operation validates its input, mutates the stores and returns a value
//! or a [`ServiceError`].
//!
//! ## Locking
//!
//! The three stores sit behind one mutex. Gateway I/O (file reads, writes,
//! stats and pickers) runs without the lock held; the store mutation that
//! follows takes it again once the I/O result is in hand. Two overlapping
//! operations on the same document can therefore interleave between the
//! I/O and the mutation, the same as a single-threaded event loop would.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{ServiceError, ServiceResult};
use crate::filter::DocumentFilter;
use crate::gateway::{FileFilter, FileGateway, FileStat};
use crate::ids::{IdGenerator, RandomIds};
use crate::models::{
    Document, DocumentPatch, DocumentStatus, DocumentSummary, Favorite, FavoriteDocument, FileMeta,
    HistoryDocument, NewDocument,
};
use crate::store::{Stores, DEFAULT_HISTORY_LIMIT};

/// Orchestrates documents, favorites and history
pub struct DocumentService {
    stores: Mutex<Stores>,
    gateway: Arc<dyn FileGateway>,
    ids: Arc<dyn IdGenerator>,
    file_filters: Vec<FileFilter>,
}

impl DocumentService {
    /// Create a service with random ids and the default history capacity
    pub fn new(gateway: impl FileGateway + 'static) -> Self {
        Self {
            stores: Mutex::new(Stores::new(DEFAULT_HISTORY_LIMIT)),
            gateway: Arc::new(gateway),
            ids: Arc::new(RandomIds),
            file_filters: FileFilter::document_defaults(),
        }
    }

    /// Create a service using the history capacity and picker filters from config
    pub fn from_config(gateway: impl FileGateway + 'static, config: &Config) -> Self {
        Self::new(gateway)
            .with_history_limit(config.history_limit)
            .with_file_filters(config.file_filters.clone())
    }

    /// Use a different id generator
    pub fn with_ids(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Arc::new(ids);
        self
    }

    /// Replace the history ledger with an empty one of this capacity
    pub fn with_history_limit(self, limit: usize) -> Self {
        self.lock().history = crate::store::HistoryLedger::with_capacity(limit);
        self
    }

    pub fn with_file_filters(mut self, filters: Vec<FileFilter>) -> Self {
        self.file_filters = filters;
        self
    }

    fn lock(&self) -> MutexGuard<'_, Stores> {
        self.stores.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ==================== Documents ====================

    /// Get the full record, soft-deleted documents included
    pub fn get_document(&self, id: &str) -> ServiceResult<Document> {
        debug!(id, "get-document");
        self.lock()
            .documents
            .get(id)
            .cloned()
            .ok_or_else(|| ServiceError::not_found(id))
    }

    /// List document summaries, optionally filtered and sorted
    ///
    /// The query predicate sees the full record, so it can match on
    /// content that the returned summaries leave out.
    pub fn list_documents(&self, filter: Option<&DocumentFilter>) -> Vec<DocumentSummary> {
        let documents: Vec<Document> = self.lock().documents.list().cloned().collect();
        let documents = match filter {
            Some(filter) => filter.apply(documents),
            None => documents,
        };
        debug!(count = documents.len(), "list-documents");
        documents.iter().map(DocumentSummary::from).collect()
    }

    pub fn create_document(&self, input: NewDocument) -> Document {
        let document = Document::create(self.ids.next_id(), input, Utc::now());
        debug!(id = %document.id, title = %document.title, "create-document");
        self.lock().documents.put(document.clone());
        document
    }

    /// Shallow-merge a patch onto an existing document
    pub fn update_document(&self, id: &str, patch: DocumentPatch) -> ServiceResult<Document> {
        debug!(id, "update-document");
        let mut stores = self.lock();
        let document = stores
            .documents
            .get_mut(id)
            .ok_or_else(|| ServiceError::not_found(id))?;
        document.apply(patch, Utc::now());
        Ok(document.clone())
    }

    /// Soft delete: flips the status, leaves favorites and history alone
    pub fn delete_document(&self, id: &str) -> ServiceResult<bool> {
        debug!(id, "delete-document");
        let mut stores = self.lock();
        let document = stores
            .documents
            .get_mut(id)
            .ok_or_else(|| ServiceError::not_found(id))?;
        document.status = DocumentStatus::Deleted;
        Ok(true)
    }

    // ==================== Files ====================

    /// Read a file and bind it to a document, creating one if needed
    pub fn read_file(&self, path: &Path) -> ServiceResult<Document> {
        debug!(?path, "read-file");
        let (content, stat) = self.gateway.read_text(path).map_err(|e| {
            warn!(?path, error = %e, recoverable = e.is_recoverable(), "Error reading file");
            ServiceError::io("Failed to read file", e)
        })?;
        Ok(self.bind_file(path, content, &stat))
    }

    /// Update the document bound to `path`, or create it, and record a history touch
    fn bind_file(&self, path: &Path, content: String, stat: &FileStat) -> Document {
        let now = Utc::now();
        let path_str = path.to_string_lossy();
        let mut stores = self.lock();

        let document = match stores.documents.find_by_path(&path_str).cloned() {
            Some(mut document) => {
                document.refresh_from_file(content, stat, now);
                document
            }
            None => {
                let document = Document::from_file(self.ids.next_id(), path, content, stat, now);
                info!(id = %document.id, ?path, "Bound new document to file");
                document
            }
        };
        stores.documents.put(document.clone());

        stores.history.touch(&document.id, self.ids.as_ref(), now);
        document
    }

    /// Write content to the document's file and refresh its metadata
    pub fn save_file(&self, id: &str, content: &str) -> ServiceResult<bool> {
        debug!(id, "save-file");
        let path = PathBuf::from(self.get_document(id)?.path);

        let stat = self.gateway.write_text(&path, content).map_err(|e| {
            warn!(?path, error = %e, recoverable = e.is_recoverable(), "Error saving file");
            ServiceError::io("Failed to save file", e)
        })?;

        let mut stores = self.lock();
        let document = stores
            .documents
            .get_mut(id)
            .ok_or_else(|| ServiceError::not_found(id))?;
        document.content = Some(content.to_string());
        document.size = stat.size;
        document.modified_at = Utc::now();
        Ok(true)
    }

    /// Stat passthrough; does not touch the store
    pub fn get_file_meta(&self, path: &Path) -> ServiceResult<FileMeta> {
        debug!(?path, "get-file-meta");
        self.gateway.stat(path).map(FileMeta::from).map_err(|e| {
            warn!(?path, error = %e, recoverable = e.is_recoverable(), "Error getting file metadata");
            ServiceError::io("Failed to get file metadata", e)
        })
    }

    /// Run the file picker and bind the chosen file; `None` when cancelled
    pub fn select_file(&self) -> ServiceResult<Option<Document>> {
        debug!("select-file");
        let picked = self
            .gateway
            .pick_file(&self.file_filters)
            .map_err(|e| ServiceError::io("Failed to open file dialog", e))?;

        match picked {
            Some(path) => self.read_file(&path).map(Some),
            None => {
                debug!("File selection cancelled");
                Ok(None)
            }
        }
    }

    /// Run the folder picker; `None` when cancelled
    pub fn select_folder(&self) -> ServiceResult<Option<String>> {
        debug!("select-folder");
        let picked = self
            .gateway
            .pick_folder()
            .map_err(|e| ServiceError::io("Failed to open folder dialog", e))?;
        Ok(picked.map(|path| path.to_string_lossy().into_owned()))
    }

    // ==================== Favorites ====================

    /// Mark a document as favorite; a no-op when it already is
    pub fn add_favorite(&self, id: &str) -> ServiceResult<Document> {
        debug!(id, "add-favorite");
        let mut stores = self.lock();
        let document = stores
            .documents
            .get_mut(id)
            .ok_or_else(|| ServiceError::not_found(id))?;

        if document.is_favorite {
            return Ok(document.clone());
        }

        document.is_favorite = true;
        let document = document.clone();
        stores.favorites.push(Favorite {
            id: self.ids.next_id(),
            document_id: id.to_string(),
            added_time: Utc::now(),
        });
        Ok(document)
    }

    pub fn remove_favorite(&self, id: &str) -> ServiceResult<Document> {
        debug!(id, "remove-favorite");
        let mut stores = self.lock();
        let document = stores
            .documents
            .get_mut(id)
            .ok_or_else(|| ServiceError::not_found(id))?;

        document.is_favorite = false;
        let document = document.clone();
        stores.favorites.remove_first(id);
        Ok(document)
    }

    /// Favorites in ledger order; entries for missing documents are dropped
    pub fn list_favorites(&self) -> Vec<FavoriteDocument> {
        let stores = self.lock();
        stores
            .favorites
            .iter()
            .filter_map(|fav| {
                let document = stores.documents.get(&fav.document_id)?;
                Some(FavoriteDocument {
                    document: document.summary(),
                    favorite_id: fav.id.clone(),
                    added_time: fav.added_time,
                })
            })
            .collect()
    }

    // ==================== History ====================

    /// Stamp the access time and record a history touch
    pub fn add_history(&self, id: &str) -> ServiceResult<bool> {
        debug!(id, "add-history");
        let now = Utc::now();
        let mut stores = self.lock();
        let document = stores
            .documents
            .get_mut(id)
            .ok_or_else(|| ServiceError::not_found(id))?;
        document.accessed_at = now;
        stores.history.touch(id, self.ids.as_ref(), now);
        Ok(true)
    }

    /// History, most recent first; entries for missing documents are dropped
    pub fn list_history(&self) -> Vec<HistoryDocument> {
        let stores = self.lock();
        let mut entries: Vec<_> = stores.history.iter().collect();
        entries.sort_by(|a, b| b.access_time.cmp(&a.access_time));

        entries
            .into_iter()
            .filter_map(|entry| {
                let document = stores.documents.get(&entry.document_id)?;
                Some(HistoryDocument {
                    document: document.summary(),
                    history_id: entry.id.clone(),
                    access_time: entry.access_time,
                })
            })
            .collect()
    }

    pub fn clear_history(&self) -> bool {
        let mut stores = self.lock();
        info!(entries = stores.history.len(), "Clearing history");
        stores.history.clear();
        true
    }
}
