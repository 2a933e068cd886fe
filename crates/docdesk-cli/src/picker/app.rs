//! Picker state
//!
//! A directory browser over the local filesystem. In file mode it lists
//! directories plus the files accepted by the active filter; in folder
//! mode it lists directories only.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crossterm::event::KeyCode;
use docdesk_core::FileFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerMode {
    File,
    Folder,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
}

/// How a picking session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Chosen(PathBuf),
    Cancelled,
}

pub struct PickerApp {
    pub mode: PickerMode,
    /// Directory being browsed
    pub dir: PathBuf,
    pub entries: Vec<Entry>,
    pub selected: usize,
    pub filters: Vec<FileFilter>,
    pub filter_index: usize,
    /// Last navigation error, shown in the status line
    pub status: Option<String>,
    pub outcome: Option<Outcome>,
}

impl PickerApp {
    pub fn new(mode: PickerMode, start_dir: PathBuf, filters: Vec<FileFilter>) -> io::Result<Self> {
        let dir = fs::canonicalize(&start_dir).unwrap_or(start_dir);
        let mut app = Self {
            mode,
            dir,
            entries: Vec::new(),
            selected: 0,
            filters,
            filter_index: 0,
            status: None,
            outcome: None,
        };
        app.entries = read_entries(&app.dir, mode, app.active_filter())?;
        Ok(app)
    }

    /// Filter applied to files; `None` when the caller gave no filters
    pub fn active_filter(&self) -> Option<&FileFilter> {
        match self.mode {
            PickerMode::File => self.filters.get(self.filter_index),
            PickerMode::Folder => None,
        }
    }

    pub fn selected_entry(&self) -> Option<&Entry> {
        self.entries.get(self.selected)
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('j') | KeyCode::Down => self.move_down(),
            KeyCode::Char('k') | KeyCode::Up => self.move_up(),
            KeyCode::Enter => self.activate(),
            KeyCode::Backspace | KeyCode::Char('h') | KeyCode::Left => self.go_parent(),
            KeyCode::Char('s') if self.mode == PickerMode::Folder => {
                self.outcome = Some(Outcome::Chosen(self.dir.clone()));
            }
            KeyCode::Tab => self.cycle_filter(),
            KeyCode::Esc | KeyCode::Char('q') => self.outcome = Some(Outcome::Cancelled),
            _ => {}
        }
    }

    fn move_down(&mut self) {
        if self.selected + 1 < self.entries.len() {
            self.selected += 1;
        }
    }

    fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Descend into the selected directory, or choose the selected file
    fn activate(&mut self) {
        let Some(entry) = self.selected_entry().cloned() else {
            return;
        };
        if entry.is_dir {
            self.change_dir(entry.path);
        } else if self.mode == PickerMode::File {
            self.outcome = Some(Outcome::Chosen(entry.path));
        }
    }

    fn go_parent(&mut self) {
        let Some(parent) = self.dir.parent().map(Path::to_path_buf) else {
            return;
        };
        let came_from = self.dir.clone();
        if self.change_dir(parent) {
            if let Some(index) = self.entries.iter().position(|e| e.path == came_from) {
                self.selected = index;
            }
        }
    }

    fn cycle_filter(&mut self) {
        if self.mode != PickerMode::File || self.filters.is_empty() {
            return;
        }
        self.filter_index = (self.filter_index + 1) % self.filters.len();
        let dir = self.dir.clone();
        self.change_dir(dir);
    }

    /// Switch to `dir`; on failure stay put and report it
    fn change_dir(&mut self, dir: PathBuf) -> bool {
        match read_entries(&dir, self.mode, self.active_filter()) {
            Ok(entries) => {
                self.dir = dir;
                self.entries = entries;
                self.selected = 0;
                self.status = None;
                true
            }
            Err(e) => {
                self.status = Some(format!("Cannot open {}: {}", dir.display(), e));
                false
            }
        }
    }
}

/// Visible entries of `dir`: directories first, then names case-insensitively
fn read_entries(dir: &Path, mode: PickerMode, filter: Option<&FileFilter>) -> io::Result<Vec<Entry>> {
    let mut entries = Vec::new();

    for item in fs::read_dir(dir)? {
        let item = item?;
        let name = item.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }

        let path = item.path();
        let is_dir = path.is_dir();
        let visible = is_dir
            || (mode == PickerMode::File && filter.map_or(true, |f| f.accepts(&path)));
        if visible {
            entries.push(Entry { name, path, is_dir });
        }
    }

    entries.sort_by(|a, b| {
        b.is_dir
            .cmp(&a.is_dir)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// root/
    ///   Beta/
    ///     inner.md
    ///   alpha/
    ///   .hidden.md
    ///   notes.md
    ///   readme.TXT
    ///   image.png
    fn fixture() -> (TempDir, PathBuf) {
        let temp = TempDir::new().unwrap();
        let root = temp.path().canonicalize().unwrap();
        fs::create_dir(root.join("Beta")).unwrap();
        fs::create_dir(root.join("alpha")).unwrap();
        fs::write(root.join("Beta").join("inner.md"), "x").unwrap();
        fs::write(root.join(".hidden.md"), "x").unwrap();
        fs::write(root.join("notes.md"), "x").unwrap();
        fs::write(root.join("readme.TXT"), "x").unwrap();
        fs::write(root.join("image.png"), "x").unwrap();
        (temp, root)
    }

    fn names(app: &PickerApp) -> Vec<&str> {
        app.entries.iter().map(|e| e.name.as_str()).collect()
    }

    fn file_picker(root: &Path) -> PickerApp {
        PickerApp::new(PickerMode::File, root.to_path_buf(), FileFilter::document_defaults())
            .unwrap()
    }

    #[test]
    fn test_lists_directories_first_and_applies_filter() {
        let (_temp, root) = fixture();
        let app = file_picker(&root);
        assert_eq!(names(&app), vec!["alpha", "Beta", "notes.md"]);
    }

    #[test]
    fn test_tab_cycles_filters() {
        let (_temp, root) = fixture();
        let mut app = file_picker(&root);

        app.handle_key(KeyCode::Tab);
        assert_eq!(app.active_filter().unwrap().name, "Text");
        assert_eq!(names(&app), vec!["alpha", "Beta", "readme.TXT"]);

        app.handle_key(KeyCode::Tab);
        assert_eq!(
            names(&app),
            vec!["alpha", "Beta", "image.png", "notes.md", "readme.TXT"]
        );

        app.handle_key(KeyCode::Tab);
        assert_eq!(app.active_filter().unwrap().name, "Markdown");
    }

    #[test]
    fn test_descend_and_return_to_parent() {
        let (_temp, root) = fixture();
        let mut app = file_picker(&root);

        app.handle_key(KeyCode::Down);
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.dir, root.join("Beta"));
        assert_eq!(names(&app), vec!["inner.md"]);

        app.handle_key(KeyCode::Backspace);
        assert_eq!(app.dir, root);
        assert_eq!(app.selected_entry().unwrap().name, "Beta");
        assert!(app.outcome.is_none());
    }

    #[test]
    fn test_enter_on_file_chooses_it() {
        let (_temp, root) = fixture();
        let mut app = file_picker(&root);

        app.handle_key(KeyCode::Char('j'));
        app.handle_key(KeyCode::Char('j'));
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.outcome, Some(Outcome::Chosen(root.join("notes.md"))));
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let (_temp, root) = fixture();
        let mut app = file_picker(&root);

        app.handle_key(KeyCode::Up);
        assert_eq!(app.selected, 0);
        for _ in 0..10 {
            app.handle_key(KeyCode::Down);
        }
        assert_eq!(app.selected, 2);
    }

    #[test]
    fn test_folder_mode_lists_directories_and_chooses_current() {
        let (_temp, root) = fixture();
        let mut app = PickerApp::new(PickerMode::Folder, root.clone(), Vec::new()).unwrap();
        assert_eq!(names(&app), vec!["alpha", "Beta"]);

        app.handle_key(KeyCode::Char('k'));
        app.handle_key(KeyCode::Enter);
        app.handle_key(KeyCode::Char('s'));
        assert_eq!(app.outcome, Some(Outcome::Chosen(root.join("alpha"))));
    }

    #[test]
    fn test_escape_cancels() {
        let (_temp, root) = fixture();
        let mut app = file_picker(&root);
        app.handle_key(KeyCode::Esc);
        assert_eq!(app.outcome, Some(Outcome::Cancelled));
    }

    #[test]
    fn test_s_does_nothing_in_file_mode() {
        let (_temp, root) = fixture();
        let mut app = file_picker(&root);
        app.handle_key(KeyCode::Char('s'));
        assert!(app.outcome.is_none());
    }

    #[test]
    fn test_missing_start_dir_is_an_error() {
        let (_temp, root) = fixture();
        assert!(PickerApp::new(PickerMode::File, root.join("nope"), Vec::new()).is_err());
    }
}
