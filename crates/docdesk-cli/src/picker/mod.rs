//! Terminal file and folder picker
//!
//! Stands in for the native open-file/open-folder dialogs. The browser is
//! drawn on stderr so it can run while stdout carries the message channel;
//! crossterm reads keys from the controlling terminal.
//!
//! ## Navigation
//!
//! - j/k or ↑/↓: Move selection
//! - Enter: Open a directory / choose a file
//! - s: Choose the current directory (folder mode)
//! - Backspace or h: Parent directory
//! - Tab: Cycle file filters
//! - Esc or q: Cancel

mod app;
mod ui;

use std::io::stderr;
use std::path::PathBuf;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use tracing::{debug, info};

use docdesk_core::gateway::{GatewayError, GatewayResult};
use docdesk_core::{FileFilter, Picker};

use app::{Outcome, PickerApp, PickerMode};

/// Interactive picker rendered with ratatui
pub struct TuiPicker {
    start_dir: PathBuf,
}

impl TuiPicker {
    pub fn new(start_dir: PathBuf) -> Self {
        Self { start_dir }
    }

    fn pick(&self, mode: PickerMode, filters: &[FileFilter]) -> GatewayResult<Option<PathBuf>> {
        if !atty::is(atty::Stream::Stderr) {
            return Err(GatewayError::Picker(
                "No terminal available for the picker".to_string(),
            ));
        }

        let mut app = PickerApp::new(mode, self.start_dir.clone(), filters.to_vec()).map_err(|e| {
            GatewayError::Picker(format!("Cannot open {}: {}", self.start_dir.display(), e))
        })?;

        debug!(?mode, dir = ?app.dir, "Opening picker");
        match run_terminal(&mut app).map_err(|e| GatewayError::Picker(e.to_string()))? {
            Outcome::Chosen(path) => {
                info!(?path, "Picked");
                Ok(Some(path))
            }
            Outcome::Cancelled => Ok(None),
        }
    }
}

impl Picker for TuiPicker {
    fn pick_file(&self, filters: &[FileFilter]) -> GatewayResult<Option<PathBuf>> {
        self.pick(PickerMode::File, filters)
    }

    fn pick_folder(&self) -> GatewayResult<Option<PathBuf>> {
        self.pick(PickerMode::Folder, &[])
    }
}

fn run_terminal(app: &mut PickerApp) -> Result<Outcome> {
    enable_raw_mode()?;
    stderr().execute(EnterAlternateScreen)?;

    let result = event_loop(app);

    // Restore the terminal even if the loop failed
    let _ = disable_raw_mode();
    let _ = stderr().execute(LeaveAlternateScreen);

    result
}

fn event_loop(app: &mut PickerApp) -> Result<Outcome> {
    let mut terminal = Terminal::new(CrosstermBackend::new(stderr()))?;

    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                return Ok(Outcome::Cancelled);
            }

            app.handle_key(key.code);
            if let Some(outcome) = app.outcome.take() {
                return Ok(outcome);
            }
        }
    }
}
