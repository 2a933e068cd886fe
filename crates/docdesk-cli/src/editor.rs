//! Interactive editing support
//!
//! Opens $EDITOR on a scratch copy of a document's content.

use anyhow::{bail, Context, Result};
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

use docdesk_core::Document;

/// Open a document's content in the user's preferred editor
///
/// Returns `None` when the editor leaves the content untouched. The scratch
/// file keeps the backing file's name so editors pick the right syntax
/// highlighting. Uses $EDITOR, $VISUAL, or falls back to common editors.
pub fn edit_document(doc: &Document) -> Result<Option<String>> {
    let editor = find_editor()?;
    let original = doc.content.as_deref().unwrap_or_default();

    // Create scratch file with content
    let scratch = scratch_path(&env::temp_dir(), doc);
    fs::write(&scratch, original)
        .with_context(|| format!("Failed to create scratch file: {:?}", scratch))?;

    // Open editor
    let status = Command::new(&editor)
        .arg(&scratch)
        .status()
        .with_context(|| format!("Failed to run editor: {}", editor))?;

    if !status.success() {
        // Clean up scratch file
        let _ = fs::remove_file(&scratch);
        bail!(
            "Editor '{}' exited with non-zero status. Check that your editor is configured correctly.",
            editor
        );
    }

    // Read edited content
    let edited = fs::read_to_string(&scratch)
        .with_context(|| format!("Failed to read edited file: {:?}", scratch))?;

    // Clean up
    let _ = fs::remove_file(&scratch);

    if edited == original {
        return Ok(None);
    }
    Ok(Some(edited))
}

/// Scratch location for a document, unique per process and document
fn scratch_path(dir: &Path, doc: &Document) -> PathBuf {
    let name = Path::new(&doc.path)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| "document.txt".to_string());

    dir.join(format!("docdesk_{}_{}_{}", std::process::id(), doc.id, name))
}

/// Find the user's preferred editor
fn find_editor() -> Result<String> {
    // Check environment variables
    for var in ["EDITOR", "VISUAL"] {
        if let Ok(editor) = env::var(var) {
            if !editor.is_empty() {
                return Ok(editor);
            }
        }
    }

    // Try common editors
    let common_editors = ["nano", "vim", "vi", "emacs", "code", "notepad"];
    if let Some(editor) = common_editors.into_iter().find(|e| command_exists(e)) {
        return Ok(editor.to_string());
    }

    bail!(
        "No editor found. Set $EDITOR environment variable.\n\
         Example: export EDITOR=nano"
    )
}

/// Check if a command exists in PATH
fn command_exists(cmd: &str) -> bool {
    Command::new("which")
        .arg(cmd)
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Ask before overwriting a document's backing file
///
/// Returns true if the user confirms. Without a TTY on stdin nobody can
/// answer, so this returns false.
pub fn confirm_save(doc: &Document) -> Result<bool> {
    // Check if stdin is a TTY
    if !atty::is(atty::Stream::Stdin) {
        return Ok(false);
    }

    print!("Save changes to {}? [y/N] ", doc.path);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(is_yes(&input))
}

fn is_yes(input: &str) -> bool {
    let input = input.trim().to_lowercase();
    input == "y" || input == "yes"
}
