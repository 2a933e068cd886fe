//! File and dialog gateway
//!
//! The document service never touches the filesystem or native dialogs
//! directly. It goes through a [`FileGateway`], which reads and writes
//! text files, reports file metadata and runs the open-file/open-folder
//! pickers. A cancelled picker is `Ok(None)`, not an error.

pub mod error;
pub mod local;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use error::{Access, GatewayError, GatewayResult};
pub use local::{LocalGateway, NoPicker};

/// Result of a filesystem stat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStat {
    /// Byte length
    pub size: u64,
    /// Birth time, or mtime where the filesystem does not record it
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
    pub accessed: DateTime<Utc>,
}

/// Named group of extensions offered by the file picker
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileFilter {
    pub name: String,
    /// Extensions without the dot; `*` matches everything
    pub extensions: Vec<String>,
}

impl FileFilter {
    pub fn new(name: impl Into<String>, extensions: &[&str]) -> Self {
        Self {
            name: name.into(),
            extensions: extensions.iter().map(|ext| ext.to_string()).collect(),
        }
    }

    /// Markdown, plain text and everything else
    pub fn document_defaults() -> Vec<FileFilter> {
        vec![
            FileFilter::new("Markdown", &["md", "markdown"]),
            FileFilter::new("Text", &["txt"]),
            FileFilter::new("All Files", &["*"]),
        ]
    }

    /// Whether a file path passes this filter
    pub fn accepts(&self, path: &Path) -> bool {
        if self.extensions.iter().any(|ext| ext == "*") {
            return true;
        }
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) => self
                .extensions
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext)),
            None => false,
        }
    }
}

/// Filesystem and dialog operations the document service depends on
pub trait FileGateway: Send + Sync {
    /// Read a file as UTF-8 text together with its metadata
    fn read_text(&self, path: &Path) -> GatewayResult<(String, FileStat)>;

    /// Write text to a file, returning the metadata after the write
    fn write_text(&self, path: &Path, content: &str) -> GatewayResult<FileStat>;

    fn stat(&self, path: &Path) -> GatewayResult<FileStat>;

    /// Ask the user for a file; `None` when cancelled
    fn pick_file(&self, filters: &[FileFilter]) -> GatewayResult<Option<PathBuf>>;

    /// Ask the user for a folder; `None` when cancelled
    fn pick_folder(&self) -> GatewayResult<Option<PathBuf>>;
}

/// An interactive file/folder chooser plugged into [`LocalGateway`]
pub trait Picker: Send + Sync {
    fn pick_file(&self, filters: &[FileFilter]) -> GatewayResult<Option<PathBuf>>;

    fn pick_folder(&self) -> GatewayResult<Option<PathBuf>>;
}
