//! Local filesystem gateway
//!
//! Reads, writes and stats through `std::fs`. Picking is delegated to a
//! pluggable [`Picker`]; without one every pick is treated as cancelled.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use tracing::debug;

use super::{Access, FileFilter, FileGateway, FileStat, GatewayError, GatewayResult, Picker};

/// Picker used when no interactive chooser is available
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPicker;

impl Picker for NoPicker {
    fn pick_file(&self, _filters: &[FileFilter]) -> GatewayResult<Option<PathBuf>> {
        Ok(None)
    }

    fn pick_folder(&self) -> GatewayResult<Option<PathBuf>> {
        Ok(None)
    }
}

/// Gateway backed by the local filesystem
pub struct LocalGateway {
    picker: Box<dyn Picker>,
}

impl LocalGateway {
    pub fn new() -> Self {
        Self::with_picker(NoPicker)
    }

    pub fn with_picker(picker: impl Picker + 'static) -> Self {
        Self {
            picker: Box::new(picker),
        }
    }
}

impl Default for LocalGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl FileGateway for LocalGateway {
    fn read_text(&self, path: &Path) -> GatewayResult<(String, FileStat)> {
        debug!(?path, "Reading file");
        let bytes = fs::read(path)
            .map_err(|e| GatewayError::classify(e, path.to_path_buf(), Access::Read))?;
        // Invalid UTF-8 becomes U+FFFD rather than an error
        let content = String::from_utf8_lossy(&bytes).into_owned();
        let stat = self.stat(path)?;
        Ok((content, stat))
    }

    fn write_text(&self, path: &Path, content: &str) -> GatewayResult<FileStat> {
        debug!(?path, bytes = content.len(), "Writing file");
        fs::write(path, content)
            .map_err(|e| GatewayError::classify(e, path.to_path_buf(), Access::Write))?;
        self.stat(path)
    }

    fn stat(&self, path: &Path) -> GatewayResult<FileStat> {
        let stat_err = |e| GatewayError::classify(e, path.to_path_buf(), Access::Stat);

        let metadata = fs::metadata(path).map_err(stat_err)?;
        let modified = metadata.modified().map_err(stat_err)?;
        let created = metadata.created().unwrap_or(modified);
        let accessed = metadata.accessed().unwrap_or(modified);

        Ok(FileStat {
            size: metadata.len(),
            created: to_utc(created),
            modified: to_utc(modified),
            accessed: to_utc(accessed),
        })
    }

    fn pick_file(&self, filters: &[FileFilter]) -> GatewayResult<Option<PathBuf>> {
        self.picker.pick_file(filters)
    }

    fn pick_folder(&self) -> GatewayResult<Option<PathBuf>> {
        self.picker.pick_folder()
    }
}

fn to_utc(time: SystemTime) -> DateTime<Utc> {
    DateTime::<Utc>::from(time)
}
