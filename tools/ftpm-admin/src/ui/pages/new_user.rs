//! New user page: the creation form.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::domain::{App, AppState, NewUserField};

use super::{notice_line, section_block};

/// Render the new user form.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(NewUserField::ALL.len() as u16 * 2 + 3), // Form
            Constraint::Length(2),                                       // Notice
            Constraint::Min(0),
        ])
        .split(area);

    render_form(frame, chunks[0], app);

    let form = &app.new_user;
    let status = if form.submitting {
        Some(Line::styled(
            "Creating user...",
            Style::default().fg(Color::Yellow),
        ))
    } else {
        form.notice.as_ref().map(notice_line)
    };
    if let Some(line) = status {
        frame.render_widget(Paragraph::new(line), chunks[1]);
    }
}

fn render_form(frame: &mut Frame, area: Rect, app: &App) {
    let form = &app.new_user;
    let editing = app.state == AppState::Editing;

    let mut text = vec![Line::raw("")];
    for field in NewUserField::ALL {
        let focused = field == form.focus;
        let value = form.value(field);

        let marker = if focused {
            Span::styled("▶ ", Style::default().fg(Color::Yellow))
        } else {
            Span::raw("  ")
        };
        let label = Span::styled(
            format!("{:<18}", field.label()),
            if focused {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            },
        );
        let shown = if value.is_empty() {
            Span::styled(field.placeholder(), Style::default().fg(Color::DarkGray))
        } else if field.is_secret() {
            Span::raw("•".repeat(value.chars().count()))
        } else {
            Span::raw(value.to_string())
        };

        let mut spans = vec![marker, label, shown];
        if focused && editing {
            spans.push(Span::styled("█", Style::default().fg(Color::Yellow)));
        }
        text.push(Line::from(spans));
        text.push(Line::raw(""));
    }

    let paragraph = Paragraph::new(text).block(section_block("New FTP User"));
    frame.render_widget(paragraph, area);
}
