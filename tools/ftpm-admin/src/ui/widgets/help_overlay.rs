//! Help overlay widget.

use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

fn key_line(key: &'static str, action: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<8}", key), Style::default().fg(Color::Yellow)),
        Span::raw(action),
    ])
}

fn section(title: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        title,
        Style::default().add_modifier(Modifier::BOLD),
    ))
}

/// Render a centered help overlay.
pub fn render_help_overlay(frame: &mut Frame) {
    let area = frame.area();

    // Center a box in the middle of the screen
    let popup_area = centered_rect(60, 80, area);

    // Clear the background
    frame.render_widget(Clear, popup_area);

    let help_text = vec![
        Line::from(Span::styled(
            "FTPM-ADMIN HELP",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        section("Navigation"),
        key_line("1-5", "Go to page"),
        key_line("Tab", "Next / previous page (Shift+Tab)"),
        key_line("↑/↓", "Move selection or focus"),
        key_line("R", "Refresh the current page"),
        key_line("Q / Esc", "Quit"),
        key_line("?", "Toggle this help"),
        Line::raw(""),
        section("Users"),
        key_line("/", "Search by username or email"),
        key_line("D", "Delete selected user (Y to confirm)"),
        Line::raw(""),
        section("New user / Configuration"),
        key_line("Enter", "Edit focused field (toggles SSL)"),
        key_line("Esc", "Stop editing"),
        key_line("S", "Create user / save configuration"),
        Line::raw(""),
        section("Status"),
        Line::from(vec![
            Span::styled("  ● online   ", Style::default().fg(Color::Green)),
            Span::raw("Active account or session"),
        ]),
        Line::from(vec![
            Span::styled("  ○ offline  ", Style::default().fg(Color::DarkGray)),
            Span::raw("Inactive"),
        ]),
        Line::from(vec![
            Span::styled("  ● suspended", Style::default().fg(Color::Red)),
            Span::raw(" Suspended account"),
        ]),
        Line::raw(""),
        Line::from(Span::styled(
            "Press any key to close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(help_text).block(
        Block::default()
            .title(" Help ")
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    frame.render_widget(paragraph, popup_area);
}

/// Create a centered rectangle.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(percent_y)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);

    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}
