//! Per-page renderers.

mod config;
mod dashboard;
mod logs;
mod new_user;
mod users;

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::domain::{App, Notice, Page};

/// Render the visible page into `area`.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    match app.page {
        Page::Dashboard => dashboard::render(frame, area, app),
        Page::Users => users::render(frame, area, app),
        Page::NewUser => new_user::render(frame, area, app),
        Page::Config => config::render(frame, area, app),
        Page::Logs => logs::render(frame, area, app),
    }
}

/// Red bordered box carrying an error message.
fn render_alert(frame: &mut Frame, area: Rect, title: &str, message: &str) {
    let paragraph = Paragraph::new(Line::from(vec![
        Span::styled("⚠ ", Style::default().fg(Color::Red)),
        Span::raw(message.to_string()),
    ]))
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .title(format!(" {} ", title))
            .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red)),
    );
    frame.render_widget(paragraph, area);
}

/// One line of inline feedback.
fn notice_line(notice: &Notice) -> Line<'static> {
    match notice {
        Notice::Success(message) => Line::styled(
            format!("✓ {}", message),
            Style::default().fg(Color::Green),
        ),
        Notice::Error(message) => {
            Line::styled(format!("✗ {}", message), Style::default().fg(Color::Red))
        }
    }
}

fn section_block(title: &str) -> Block<'static> {
    Block::default()
        .title(format!(" {} ", title))
        .title_style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
}
