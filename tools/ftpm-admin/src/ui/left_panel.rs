//! Left panel: Page list + server status.
//!
//! ```text
//! ┌──────────────────────┐
//! │   PAGES              │
//! │  [1] Dashboard       │
//! │  [2] Users           │
//! │  ...                 │
//! ├──────────────────────┤
//! │  SERVER STATUS       │
//! │  ● vsftpd  online    │
//! │  ● Port    21        │
//! │  DISK: ████░░ 42%    │
//! └──────────────────────┘
//! ```

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use ftpm_client::QueryState;

use crate::domain::{App, Page};

use super::widgets::{progress_bar_color, render_progress_bar, status_item};

/// Render the left panel.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(7),    // Page list
            Constraint::Length(9), // Server status
        ])
        .split(area);

    render_page_list(frame, chunks[0], app);
    render_server_status(frame, chunks[1], app);
}

fn render_page_list(frame: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = Page::ALL
        .iter()
        .map(|&page| {
            let line_style = if page == app.page {
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("[{}] ", page.hotkey()),
                    Style::default().fg(Color::Yellow),
                ),
                Span::raw(page.title()),
            ]))
            .style(line_style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(" PAGES ")
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    frame.render_widget(list, area);
}

fn render_server_status(frame: &mut Frame, area: Rect, app: &App) {
    let text = match &app.stats {
        QueryState::Success(snapshot) => {
            let stats = &snapshot.data;
            let online = stats.server_status == "online";
            let ssl = stats.ssl_enabled.unwrap_or(false);
            let percent = stats.disk_usage_percent;
            vec![
                status_item(
                    "vsftpd",
                    stats.server_status.clone(),
                    if online { Color::Green } else { Color::Red },
                ),
                status_item(
                    "Port",
                    stats.ftp_port.map_or("-".to_string(), |p| p.to_string()),
                    Color::Blue,
                ),
                status_item(
                    "SSL/TLS",
                    if ssl { "enabled" } else { "disabled" }.to_string(),
                    if ssl { Color::Green } else { Color::DarkGray },
                ),
                status_item(
                    "Sessions",
                    stats
                        .active_connections
                        .map_or("-".to_string(), |c| c.to_string()),
                    Color::LightRed,
                ),
                Line::raw(""),
                Line::from(vec![
                    Span::raw("DISK: "),
                    Span::styled(render_progress_bar(percent, 10), progress_bar_color(percent)),
                    Span::raw(format!(" {:>3.0}%", percent)),
                ]),
            ]
        }
        QueryState::Error(failure) => vec![
            status_item("vsftpd", "unknown".to_string(), Color::Red),
            Line::raw(""),
            Line::styled(failure.message.clone(), Style::default().fg(Color::Red)),
        ],
        QueryState::Loading => vec![Line::styled(
            "Loading...",
            Style::default().fg(Color::DarkGray),
        )],
    };

    let paragraph = Paragraph::new(text).block(
        Block::default()
            .title(" SERVER STATUS ")
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    frame.render_widget(paragraph, area);
}
