//! Logs page: tail of the vsftpd log.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::Paragraph,
    Frame,
};

use ftpm_client::QueryState;

use crate::domain::App;

use super::{render_alert, section_block};

fn line_style(line: &str) -> Style {
    if line.contains(" FAIL ") {
        Style::default().fg(Color::Red)
    } else if line.contains(" OK ") {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    }
}

/// Render the log page.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let block = section_block("/var/log/vsftpd.log");

    let log = match &app.log {
        QueryState::Loading => {
            let text = Paragraph::new(Line::styled(
                "Loading log...",
                Style::default().fg(Color::DarkGray),
            ));
            frame.render_widget(text.block(block), area);
            return;
        }
        QueryState::Error(failure) => {
            render_alert(frame, area, "Failed to load log", &failure.message);
            return;
        }
        QueryState::Success(snapshot) => snapshot.data.as_str(),
    };

    if log.trim().is_empty() {
        let text = Paragraph::new(Line::styled(
            "No log entries.",
            Style::default().fg(Color::DarkGray),
        ));
        frame.render_widget(text.block(block), area);
        return;
    }

    let lines: Vec<Line> = log
        .lines()
        .map(|line| Line::styled(line.to_string(), line_style(line)))
        .collect();

    // Follow the end of the log unless scrolled up.
    let visible = area.height.saturating_sub(2);
    let total = lines.len().min(u16::MAX as usize) as u16;
    let bottom = total.saturating_sub(visible);
    let offset = bottom.saturating_sub(app.log_scroll);

    let paragraph = Paragraph::new(lines).block(block).scroll((offset, 0));
    frame.render_widget(paragraph, area);
}
