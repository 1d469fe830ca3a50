//! Main layout orchestration.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  FTPM-ADMIN v1.0.0   Last refresh: 10:42:07   [R]efresh [Q]uit  │
//! ├────────────────────────┬────────────────────────────────────────┤
//! │  PAGES                 │  PAGE                                  │
//! │  [1] Dashboard         │  ...                                   │
//! │  ...                   │                                        │
//! ├────────────────────────┤                                        │
//! │  SERVER STATUS         │                                        │
//! │  ...                   │                                        │
//! └────────────────────────┴────────────────────────────────────────┘
//! │  [1-5] Page   [↑↓] Select   [/] Search   [D] Delete             │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::domain::{App, AppState, Page};

use super::{left_panel, pages, widgets};

/// Render the entire UI.
pub fn render(frame: &mut Frame, app: &App) {
    let size = frame.area();

    // Main vertical layout: header, body, footer
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Body
            Constraint::Length(3), // Footer (keybinds)
        ])
        .split(size);

    render_header(frame, main_chunks[0], app);
    render_body(frame, main_chunks[1], app);
    render_footer(frame, main_chunks[2], app);

    if app.state == AppState::Help {
        widgets::render_help_overlay(frame);
    }
}

/// Render the header bar.
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let version = app
        .service
        .as_ref()
        .map(|info| format!("v{}", info.version))
        .unwrap_or_else(|| "offline".to_string());
    let title = vec![
        Span::styled(
            " FTPM-ADMIN ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(version, Style::default().fg(Color::DarkGray)),
    ];

    // Show last refresh time or error
    let status = if let Some(err) = &app.error_message {
        Span::styled(format!(" ⚠ {} ", err), Style::default().fg(Color::Red))
    } else if let Some(time) = app.last_refresh {
        Span::styled(
            format!(" Last refresh: {} ", time.format("%H:%M:%S")),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        Span::styled(" No data ", Style::default().fg(Color::DarkGray))
    };

    let hints = vec![
        Span::styled("[R]", Style::default().fg(Color::Yellow)),
        Span::raw("efresh "),
        Span::styled("[Q]", Style::default().fg(Color::Yellow)),
        Span::raw("uit "),
        Span::styled("[?]", Style::default().fg(Color::Yellow)),
        Span::raw("Help "),
    ];

    // Calculate spacing
    let title_len: usize = title.iter().map(|s| s.width()).sum();
    let status_len = status.width();
    let hints_len: usize = hints.iter().map(|s| s.width()).sum();
    let padding = area
        .width
        .saturating_sub(2)
        .saturating_sub((title_len + status_len + hints_len) as u16);

    let mut spans = title;
    spans.push(status);
    spans.push(Span::raw(" ".repeat(padding as usize)));
    spans.extend(hints);

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    frame.render_widget(header, area);
}

/// Render the main body (left panel + page).
fn render_body(frame: &mut Frame, area: Rect, app: &App) {
    let body_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(28), // Left panel (pages + server status)
            Constraint::Min(40),    // Page
        ])
        .split(area);

    left_panel::render(frame, body_chunks[0], app);

    let block = Block::default()
        .title(format!(" {} ", app.page.title().to_uppercase()))
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner_area = block.inner(body_chunks[1]);
    frame.render_widget(block, body_chunks[1]);

    pages::render(frame, inner_area, app);
}

fn keybinds(app: &App) -> Vec<(&'static str, &'static str)> {
    if app.state == AppState::Editing {
        return match app.page {
            Page::NewUser => vec![("[Tab]", " Next field  "), ("[Enter]", " Next / Create  "), ("[Esc]", " Done  ")],
            _ => vec![("[Enter]", " Apply  "), ("[Esc]", " Cancel  ")],
        };
    }

    let mut binds = vec![("[1-5]", " Page  "), ("[Tab]", " Next  ")];
    match app.page {
        Page::Dashboard => binds.push(("[R]", " Refresh  ")),
        Page::Users => binds.extend([
            ("[↑↓]", " Select  "),
            ("[/]", " Search  "),
            ("[D]", " Delete  "),
            ("[R]", " Reload  "),
        ]),
        Page::NewUser => binds.extend([("[↑↓]", " Field  "), ("[Enter]", " Edit  "), ("[S]", " Create  ")]),
        Page::Config => binds.extend([
            ("[↑↓]", " Field  "),
            ("[Enter]", " Edit  "),
            ("[S]", " Save  "),
            ("[R]", " Reload  "),
        ]),
        Page::Logs => binds.extend([("[↑↓]", " Scroll  "), ("[R]", " Refresh  ")]),
    }
    binds
}

/// Render the footer with keyboard shortcuts.
fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let spans: Vec<Span> = keybinds(app)
        .into_iter()
        .flat_map(|(key, action)| {
            [
                Span::styled(key, Style::default().fg(Color::Yellow)),
                Span::raw(action),
            ]
        })
        .collect();

    let footer = Paragraph::new(Line::from(spans))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .centered();

    frame.render_widget(footer, area);
}
