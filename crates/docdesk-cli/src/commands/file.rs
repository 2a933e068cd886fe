//! File command handlers

use std::path::Path;

use anyhow::Result;
use tracing::debug;

use docdesk_core::DocumentService;

use crate::editor;
use crate::output::Output;

/// Bind a file to a document and show it
pub fn open(service: &DocumentService, path: &Path, output: &Output) -> Result<()> {
    let doc = service.read_file(path)?;
    output.print_document(&doc);
    Ok(())
}

/// Edit a file's content in $EDITOR and save it back through the service
pub fn edit(service: &DocumentService, path: &Path, yes: bool, output: &Output) -> Result<()> {
    let doc = service.read_file(path)?;

    let Some(edited) = editor::edit_document(&doc)? else {
        output.message("No changes.");
        return Ok(());
    };

    if !yes && output.should_prompt() && !editor::confirm_save(&doc)? {
        output.message("Changes discarded.");
        return Ok(());
    }

    service.save_file(&doc.id, &edited)?;
    debug!(id = %doc.id, bytes = edited.len(), "Saved edited content");
    output.success(&format!("Saved {}", path.display()));
    Ok(())
}

/// Show filesystem metadata without binding a document
pub fn meta(service: &DocumentService, path: &Path, output: &Output) -> Result<()> {
    let meta = service.get_file_meta(path)?;
    output.print_file_meta(path, &meta);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use docdesk_core::LocalGateway;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_open_records_history() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("plan.md");
        fs::write(&path, "# Plan").unwrap();

        let service = DocumentService::new(LocalGateway::new());
        open(&service, &path, &Output::new(OutputFormat::Quiet)).unwrap();

        let history = service.list_history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].document.title, "plan.md");
    }

    #[test]
    fn test_open_missing_file_fails() {
        let temp = TempDir::new().unwrap();
        let service = DocumentService::new(LocalGateway::new());
        let result = open(
            &service,
            &temp.path().join("gone.md"),
            &Output::new(OutputFormat::Quiet),
        );
        let message = result.unwrap_err().to_string();
        assert!(message.starts_with("Failed to read file"));
    }

    #[test]
    fn test_meta_leaves_store_untouched() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("data.txt");
        fs::write(&path, "abc").unwrap();

        let service = DocumentService::new(LocalGateway::new());
        meta(&service, &path, &Output::new(OutputFormat::Quiet)).unwrap();

        assert!(service.list_documents(None).is_empty());
        assert!(service.list_history().is_empty());
    }
}
