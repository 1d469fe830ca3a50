//! Dashboard page: server metrics and recent user activity.
//!
//! ```text
//! ┌ Active Users ┐┌ Server ┐┌ Uptime ┐┌ Transfers (24h) ┐┌ Disk ┐
//! │      3       ││ online ││ 3 days ││       128        ││ 42 GB│
//! └──────────────┘└────────┘└────────┘└──────────────────┘└──────┘
//! ┌ Recent Users ───────────────────────────────────────────────┐
//! │  A  alice   ● online   Now        12   [Completo]           │
//! └─────────────────────────────────────────────────────────────┘
//! ```

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Row, Table},
    Frame,
};

use ftpm_client::{DashboardStats, QueryState};

use crate::domain::App;
use crate::ui::widgets::{avatar, badge, render_metric_card, MetricCard};

use super::{render_alert, section_block};

/// Render the dashboard page.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let failure = app.stats.error();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(if failure.is_some() { 3 } else { 0 }), // Error alert
            Constraint::Length(4),                                      // Metric cards
            Constraint::Min(5),                                         // Recent users
        ])
        .split(area);

    if let Some(failure) = failure {
        render_alert(
            frame,
            chunks[0],
            "Failed to load dashboard statistics",
            &failure.message,
        );
    }
    render_cards(frame, chunks[1], &app.stats);
    render_recent_users(frame, chunks[2], app);
}

fn cards(stats: &QueryState<DashboardStats>) -> [MetricCard; 5] {
    let loading = stats.is_loading();
    let Some(stats) = stats.data() else {
        return [
            MetricCard::new("Active Users", "-", Color::Green),
            MetricCard::new("Server", "-", Color::Cyan),
            MetricCard::new("Uptime", "-", Color::Blue),
            MetricCard::new("Transfers (24h)", "-", Color::Magenta),
            MetricCard::new("Disk Usage", "-", Color::LightRed),
        ]
        .map(|card| card.loading(loading));
    };

    let share = match stats.total_users {
        Some(total) if total > 0 => format!(
            "{}% of {}",
            (stats.active_users as f64 / total as f64 * 100.0).round(),
            total
        ),
        _ => "connected now".to_string(),
    };
    let server_color = if stats.server_status == "online" {
        Color::Cyan
    } else {
        Color::Red
    };

    [
        MetricCard::new("Active Users", stats.active_users.to_string(), Color::Green)
            .subtitle(share),
        MetricCard::new("Server", stats.server_status.clone(), server_color)
            .subtitle(stats.server_version.clone()),
        MetricCard::new("Uptime", stats.uptime.clone(), Color::Blue),
        MetricCard::new("Transfers (24h)", stats.transfers_24h.to_string(), Color::Magenta),
        MetricCard::new(
            "Disk Usage",
            format!("{:.1} / {:.0} GB", stats.disk_used_gb, stats.disk_total_gb),
            Color::LightRed,
        )
        .subtitle(format!("{:.0}% used", stats.disk_usage_percent)),
    ]
}

fn render_cards(frame: &mut Frame, area: Rect, stats: &QueryState<DashboardStats>) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 5); 5])
        .split(area);

    for (card, column) in cards(stats).iter().zip(columns.iter()) {
        render_metric_card(frame, *column, card);
    }
}

fn render_recent_users(frame: &mut Frame, area: Rect, app: &App) {
    let block = section_block("Recent Users");

    let users = match &app.recent_users {
        QueryState::Loading => {
            let text = Paragraph::new(Line::styled(
                "Loading...",
                Style::default().fg(Color::DarkGray),
            ));
            frame.render_widget(text.block(block), area);
            return;
        }
        QueryState::Error(failure) => {
            let text = Paragraph::new(Line::styled(
                format!("Failed to load recent users: {}", failure.message),
                Style::default().fg(Color::Red),
            ));
            frame.render_widget(text.block(block), area);
            return;
        }
        QueryState::Success(snapshot) => &snapshot.data,
    };

    if users.is_empty() {
        let text = Paragraph::new(Line::styled(
            "No recent activity.",
            Style::default().fg(Color::DarkGray),
        ));
        frame.render_widget(text.block(block), area);
        return;
    }

    let header = Row::new(["User", "Status", "Last access", "Transfers", "Permissions"])
        .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD));

    let rows = users.iter().map(|user| {
        Row::new(vec![
            Line::from(vec![
                avatar::span(&user.name),
                Span::raw(" "),
                Span::raw(user.name.clone()),
            ]),
            Line::from(badge::status(&user.status)),
            Line::raw(user.last_access.clone()),
            Line::raw(user.transfers.to_string()),
            Line::from(badge::permission(
                user.permissions.as_deref().unwrap_or("Completo"),
            )),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Min(16),
            Constraint::Length(12),
            Constraint::Length(14),
            Constraint::Length(10),
            Constraint::Length(14),
        ],
    )
    .header(header)
    .block(block);

    frame.render_widget(table, area);
}
