//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use std::path::Path;

use serde::Serialize;

use docdesk_core::{Document, FileMeta, SystemInfo};

/// Lines of content shown under a document in human output
const PREVIEW_LINES: usize = 10;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print a document with a preview of its content
    pub fn print_document(&self, doc: &Document) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:        {}", doc.id);
                println!("Title:     {}", doc.title);
                println!("Path:      {}", doc.path);
                println!("Type:      {}", doc.doc_type);
                println!("Status:    {}", doc.status);
                println!("Size:      {} bytes", doc.size);
                if !doc.tags.is_empty() {
                    println!("Tags:      {}", doc.tags.join(", "));
                }
                println!("Created:   {}", doc.created_at.format("%Y-%m-%d %H:%M"));
                println!("Modified:  {}", doc.modified_at.format("%Y-%m-%d %H:%M"));

                let content = doc.content.as_deref().unwrap_or("");
                if !content.is_empty() {
                    println!();
                    println!("── Content ──");
                    for line in content.lines().take(PREVIEW_LINES) {
                        println!("{}", truncate(line, 80));
                    }
                    let total = content.lines().count();
                    if total > PREVIEW_LINES {
                        println!("... ({} more lines)", total - PREVIEW_LINES);
                    }
                }
            }
            OutputFormat::Json => println!("{}", to_json(doc)),
            OutputFormat::Quiet => println!("{}", doc.id),
        }
    }

    /// Print filesystem metadata for a path
    pub fn print_file_meta(&self, path: &Path, meta: &FileMeta) {
        match self.format {
            OutputFormat::Human => {
                println!("Path:      {}", path.display());
                println!("Size:      {} bytes", meta.size);
                println!("Created:   {}", meta.created_at.format("%Y-%m-%d %H:%M:%S"));
                println!("Modified:  {}", meta.modified_at.format("%Y-%m-%d %H:%M:%S"));
                println!("Accessed:  {}", meta.accessed_at.format("%Y-%m-%d %H:%M:%S"));
            }
            OutputFormat::Json => println!("{}", to_json(meta)),
            OutputFormat::Quiet => println!("{}", meta.size),
        }
    }

    /// Print a chosen folder
    pub fn print_folder(&self, folder: &str) {
        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::json!({ "folder": folder }));
            }
            OutputFormat::Human | OutputFormat::Quiet => println!("{}", folder),
        }
    }

    pub fn print_system_info(&self, info: &SystemInfo) {
        match self.format {
            OutputFormat::Human => {
                println!("CPU:     {}", info.cpu);
                println!("Memory:  {}", info.memory);
                println!("Disk:    {}", info.disk);
            }
            OutputFormat::Json => println!("{}", to_json(info)),
            OutputFormat::Quiet => println!("{}", info.cpu),
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| serde_json::json!({"error": e.to_string()}).to_string())
}

/// Truncate a string to max characters, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_flags() {
        assert_eq!(OutputFormat::from_flags(false, false), OutputFormat::Human);
        assert_eq!(OutputFormat::from_flags(true, false), OutputFormat::Json);
        assert_eq!(OutputFormat::from_flags(false, true), OutputFormat::Quiet);
        // Quiet takes precedence
        assert_eq!(OutputFormat::from_flags(true, true), OutputFormat::Quiet);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("this is a long string", 10), "this is...");
    }

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate("ééééééééééé", 6), "ééé...");
    }

    #[test]
    fn test_only_human_prompts() {
        assert!(Output::new(OutputFormat::Human).should_prompt());
        assert!(!Output::new(OutputFormat::Json).should_prompt());
        assert!(!Output::new(OutputFormat::Quiet).should_prompt());
    }
}
