//! Text progress bar and status line helpers.

use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};

/// Render a simple progress bar.
pub fn render_progress_bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

/// Get color for progress bar based on percentage.
pub fn progress_bar_color(percent: f64) -> Style {
    let color = if percent >= 90.0 {
        Color::Red
    } else if percent >= 70.0 {
        Color::Yellow
    } else {
        Color::Green
    };
    Style::default().fg(color)
}

/// `label ........ value` with a coloured indicator in front.
pub fn status_item(label: &str, value: String, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled("● ", Style::default().fg(color)),
        Span::raw(format!("{:<10}", label)),
        Span::styled(value, Style::default().fg(color)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_bar_width() {
        assert_eq!(render_progress_bar(0.0, 4), "░░░░");
        assert_eq!(render_progress_bar(50.0, 4), "██░░");
        assert_eq!(render_progress_bar(250.0, 4), "████");
        assert_eq!(progress_bar_color(95.0).fg, Some(Color::Red));
    }
}
