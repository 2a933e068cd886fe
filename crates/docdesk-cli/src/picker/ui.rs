//! Picker rendering

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use super::app::{PickerApp, PickerMode};

pub fn draw(frame: &mut Frame, app: &PickerApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    draw_header(frame, app, chunks[0]);
    draw_entries(frame, app, chunks[1]);
    draw_status_bar(frame, app, chunks[2]);
}

/// Current directory and active filter
fn draw_header(frame: &mut Frame, app: &PickerApp, area: Rect) {
    let title = match app.mode {
        PickerMode::File => " Open File ",
        PickerMode::Folder => " Open Folder ",
    };

    let mut spans = vec![Span::styled(
        app.dir.display().to_string(),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if let Some(filter) = app.active_filter() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("[{}]", filter.name),
            Style::default().fg(Color::Cyan),
        ));
    }

    let header = Paragraph::new(Line::from(spans))
        .block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(header, area);
}

fn draw_entries(frame: &mut Frame, app: &PickerApp, area: Rect) {
    let items: Vec<ListItem> = if app.entries.is_empty() {
        vec![ListItem::new("(empty)").style(Style::default().fg(Color::DarkGray))]
    } else {
        app.entries
            .iter()
            .map(|entry| {
                if entry.is_dir {
                    ListItem::new(format!("▸ {}/", entry.name))
                        .style(Style::default().fg(Color::Blue))
                } else {
                    ListItem::new(format!("  {}", entry.name))
                }
            })
            .collect()
    };

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .add_modifier(Modifier::REVERSED),
        );

    let mut state = ListState::default();
    if !app.entries.is_empty() {
        state.select(Some(app.selected));
    }

    frame.render_stateful_widget(list, area, &mut state);
}

/// Navigation error, or the key help for the current mode
fn draw_status_bar(frame: &mut Frame, app: &PickerApp, area: Rect) {
    let line = match &app.status {
        Some(message) => Line::from(Span::styled(
            message.clone(),
            Style::default().fg(Color::Red),
        )),
        None => {
            let help = match app.mode {
                PickerMode::File => "j/k: move  Enter: open  h: up  Tab: filter  q: cancel",
                PickerMode::Folder => "j/k: move  Enter: open  h: up  s: select  q: cancel",
            };
            Line::from(Span::styled(help, Style::default().fg(Color::DarkGray)))
        }
    };
    frame.render_widget(Paragraph::new(line), area);
}
