//! Permission and status badges.

use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
};

/// Style of a value with no colour of its own.
pub const MUTED: Style = Style::new().fg(Color::DarkGray);

/// Colour for a permission level. Unknown values are muted.
pub fn permission_style(permission: &str) -> Style {
    let color = match permission {
        "Completo" => Color::Magenta,
        "Escrita" => Color::Yellow,
        "Leitura" => Color::Blue,
        "admin" => Color::Cyan,
        "read-write" => Color::Green,
        "read-only" => Color::Gray,
        // "write-only" included
        _ => return MUTED,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

/// Colour for an account or session status. Unknown values are muted.
pub fn status_style(status: &str) -> Style {
    match status {
        "active" | "online" | "Ativo" => Style::default().fg(Color::Green),
        "suspended" => Style::default().fg(Color::Red),
        _ => MUTED,
    }
}

pub fn permission(permission: &str) -> Span<'static> {
    Span::styled(format!("[{}]", permission), permission_style(permission))
}

pub fn status(status: &str) -> Span<'static> {
    let indicator = match status {
        "inactive" | "offline" => '○',
        _ => '●',
    };
    Span::styled(format!("{} {}", indicator, status), status_style(status))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_permissions_are_coloured() {
        assert_eq!(permission_style("Completo").fg, Some(Color::Magenta));
        assert_eq!(permission_style("Escrita").fg, Some(Color::Yellow));
        assert_eq!(permission_style("Leitura").fg, Some(Color::Blue));
        assert_eq!(permission_style("read-write").fg, Some(Color::Green));
        // Write-only accounts share the muted style.
        assert_eq!(permission_style("write-only"), MUTED);
    }

    #[test]
    fn test_unknown_values_fall_back_to_muted() {
        assert_eq!(permission_style("superuser"), MUTED);
        assert_eq!(permission_style(""), MUTED);
        assert_eq!(status_style("banned"), MUTED);
        assert_eq!(permission("superuser").content, "[superuser]");
    }

    #[test]
    fn test_status_colours() {
        assert_eq!(status_style("Ativo").fg, Some(Color::Green));
        assert_eq!(status_style("online").fg, Some(Color::Green));
        assert_eq!(status_style("offline"), MUTED);
        assert_eq!(status_style("suspended").fg, Some(Color::Red));
        assert_eq!(status("offline").content, "○ offline");
    }
}
