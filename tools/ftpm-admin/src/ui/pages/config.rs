//! Configuration page: editable server settings.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::domain::{App, ConfigField};

use super::{notice_line, render_alert, section_block};

/// Render the configuration page.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let page = &app.config;

    if let Some(error) = &page.error {
        render_alert(frame, area, "Configuration", error);
        return;
    }

    let Some(draft) = page.draft.as_ref().filter(|_| !page.loading) else {
        let text = Paragraph::new(Line::styled(
            "Loading configuration...",
            Style::default().fg(Color::DarkGray),
        ));
        frame.render_widget(text.block(section_block("General")), area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(ConfigField::ALL.len() as u16 + 2), // Fields
            Constraint::Length(2),                                  // Notice
            Constraint::Min(0),
        ])
        .split(area);

    let focused = page.focused();
    let lines: Vec<Line> = ConfigField::ALL
        .iter()
        .map(|&field| {
            let is_focused = field == focused;
            let value = match (&page.edit_buffer, is_focused) {
                (Some(buffer), true) => vec![
                    Span::raw(buffer.clone()),
                    Span::styled("█", Style::default().fg(Color::Yellow)),
                ],
                _ => {
                    let shown = field.read(draft);
                    let style = match (field, draft.ssl_enabled) {
                        (ConfigField::SslEnabled, true) => Style::default().fg(Color::Green),
                        (ConfigField::SslEnabled, false) => Style::default().fg(Color::DarkGray),
                        _ => Style::default().fg(Color::Cyan),
                    };
                    vec![Span::styled(shown, style)]
                }
            };

            let mut spans = vec![
                if is_focused {
                    Span::styled("▶ ", Style::default().fg(Color::Yellow))
                } else {
                    Span::raw("  ")
                },
                Span::styled(
                    format!("{:<20}", field.label()),
                    if is_focused {
                        Style::default().add_modifier(Modifier::BOLD)
                    } else {
                        Style::default()
                    },
                ),
            ];
            spans.extend(value);
            Line::from(spans)
        })
        .collect();

    frame.render_widget(
        Paragraph::new(lines).block(section_block("General")),
        chunks[0],
    );

    let status = if page.saving {
        Some(Line::styled(
            "Saving configuration...",
            Style::default().fg(Color::Yellow),
        ))
    } else {
        page.notice.as_ref().map(notice_line)
    };
    if let Some(line) = status {
        frame.render_widget(Paragraph::new(line), chunks[1]);
    }
}
