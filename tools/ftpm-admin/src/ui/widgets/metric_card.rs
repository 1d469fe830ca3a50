//! Metric card: title, headline value and an optional subtitle.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Placeholder drawn instead of the value while loading.
pub const SKELETON: &str = "░░░░░░";

/// Content of one card.
#[derive(Debug, Clone)]
pub struct MetricCard {
    pub title: &'static str,
    pub value: String,
    pub subtitle: Option<String>,
    pub color: Color,
    /// Draw [`SKELETON`] instead of `value`.
    pub loading: bool,
}

impl MetricCard {
    pub fn new(title: &'static str, value: impl Into<String>, color: Color) -> Self {
        Self {
            title,
            value: value.into(),
            subtitle: None,
            color,
            loading: false,
        }
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }
}

/// Render a card filling `area`.
pub fn render_metric_card(frame: &mut Frame, area: Rect, card: &MetricCard) {
    let value = if card.loading {
        Span::styled(SKELETON, Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(
            card.value.clone(),
            Style::default().fg(card.color).add_modifier(Modifier::BOLD),
        )
    };

    let mut text = vec![Line::from(value)];
    if let Some(subtitle) = &card.subtitle {
        text.push(Line::styled(
            subtitle.clone(),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let paragraph = Paragraph::new(text).centered().block(
        Block::default()
            .title(format!(" {} ", card.title))
            .title_style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(card.color)),
    );

    frame.render_widget(paragraph, area);
}
