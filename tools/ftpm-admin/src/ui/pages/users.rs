//! Users page: counters, search box and the user table.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::domain::{App, AppState};
use crate::ui::widgets::{avatar, badge, centered_rect, render_metric_card, MetricCard};

use super::{notice_line, render_alert, section_block};

/// Render the users page.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Counters
            Constraint::Length(3), // Search
            Constraint::Min(5),    // Table
            Constraint::Length(1), // Notice
        ])
        .split(area);

    render_counters(frame, chunks[0], app);
    render_search(frame, chunks[1], app);
    render_table(frame, chunks[2], app);

    if let Some(notice) = &app.users.notice {
        frame.render_widget(Paragraph::new(notice_line(notice)), chunks[3]);
    }

    if let Some(username) = &app.users.pending_delete {
        render_delete_confirmation(frame, username);
    }
}

fn render_counters(frame: &mut Frame, area: Rect, app: &App) {
    let counters = app.users.counters();
    let loading = app.users.loading;
    let cards = [
        MetricCard::new("Total", counters.total.to_string(), Color::Cyan),
        MetricCard::new("Active", counters.active.to_string(), Color::Green),
        MetricCard::new("Inactive", counters.inactive.to_string(), Color::Gray),
        MetricCard::new("Suspended", counters.suspended.to_string(), Color::Red),
    ];

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    for (card, column) in cards.into_iter().zip(columns.iter()) {
        render_metric_card(frame, *column, &card.loading(loading));
    }
}

fn render_search(frame: &mut Frame, area: Rect, app: &App) {
    let editing = app.state == AppState::Editing;
    let text = if app.users.search.is_empty() && !editing {
        Line::styled("Press / to search users...", Style::default().fg(Color::DarkGray))
    } else {
        let mut spans = vec![Span::raw(app.users.search.clone())];
        if editing {
            spans.push(Span::styled("█", Style::default().fg(Color::Yellow)));
        }
        Line::from(spans)
    };

    let border = if editing { Color::Yellow } else { Color::DarkGray };
    let paragraph = Paragraph::new(text).block(
        Block::default()
            .title(" Search ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border)),
    );
    frame.render_widget(paragraph, area);
}

fn render_table(frame: &mut Frame, area: Rect, app: &App) {
    let page = &app.users;
    let block = section_block("FTP Users");

    if let Some(error) = &page.error {
        render_alert(frame, area, "FTP Users", error);
        return;
    }
    if page.loading {
        let text = Paragraph::new(Line::styled(
            "Loading users...",
            Style::default().fg(Color::DarkGray),
        ));
        frame.render_widget(text.block(block), area);
        return;
    }

    let users = page.filtered();
    if users.is_empty() {
        let message = if page.users.is_empty() {
            "No users yet."
        } else {
            "No users match the search."
        };
        let text = Paragraph::new(Line::styled(message, Style::default().fg(Color::DarkGray)));
        frame.render_widget(text.block(block), area);
        return;
    }

    let header = Row::new(["User", "Home directory", "Quota", "Status", "Permissions", "Created"])
        .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD));

    let rows = users.iter().map(|user| {
        let status = user.status.as_deref().unwrap_or("-");
        let permissions = user.permissions.as_deref().unwrap_or("-");
        let mut name = vec![
            avatar::span(&user.username),
            Span::raw(" "),
            Span::raw(user.username.clone()),
        ];
        if let Some(email) = &user.email {
            name.push(Span::styled(
                format!(" <{}>", email),
                Style::default().fg(Color::DarkGray),
            ));
        }
        Row::new(vec![
            Line::from(name),
            Line::raw(user.home_dir.clone()),
            Line::raw(format!("{} MB", user.quota_mb)),
            Line::from(badge::status(status)),
            Line::from(badge::permission(permissions)),
            Line::raw(user.created_at.get(..10).unwrap_or(&user.created_at).to_string()),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Min(20),
            Constraint::Length(24),
            Constraint::Length(10),
            Constraint::Length(13),
            Constraint::Length(14),
            Constraint::Length(11),
        ],
    )
    .header(header)
    .row_highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .block(block);

    let mut state = TableState::default().with_selected(Some(page.selected));
    frame.render_stateful_widget(table, area, &mut state);
}

fn render_delete_confirmation(frame: &mut Frame, username: &str) {
    let area = centered_rect(40, 20, frame.area());
    frame.render_widget(Clear, area);

    let text = vec![
        Line::raw(""),
        Line::from(vec![
            Span::raw("Delete user "),
            Span::styled(username.to_string(), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("?"),
        ]),
        Line::raw(""),
        Line::from(vec![
            Span::styled("[Y]", Style::default().fg(Color::Yellow)),
            Span::raw(" Delete   "),
            Span::styled("[any key]", Style::default().fg(Color::Yellow)),
            Span::raw(" Cancel"),
        ]),
    ];

    let paragraph = Paragraph::new(text).centered().block(
        Block::default()
            .title(" Confirm ")
            .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red)),
    );
    frame.render_widget(paragraph, area);
}
