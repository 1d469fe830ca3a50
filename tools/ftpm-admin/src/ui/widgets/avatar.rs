//! User avatar: the name's initial on a colour derived from the name.

use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
};

/// Initial shown in the avatar, `?` for an empty name.
pub fn initial(name: &str) -> char {
    name.chars()
        .next()
        .and_then(|c| c.to_uppercase().next())
        .unwrap_or('?')
}

/// 32-bit string hash over UTF-16 code units.
///
/// Each step shifts the int32-truncated accumulator but subtracts the full
/// one, so the result can leave the i32 range; i64 holds it exactly.
fn name_hash(name: &str) -> i64 {
    name.encode_utf16().fold(0i64, |hash, unit| {
        let shifted = (hash as i32).wrapping_shl(5) as i64;
        unit as i64 + shifted - hash
    })
}

/// Hue in degrees, `hash mod 360` normalized into `0..360`.
pub fn hue(name: &str) -> u16 {
    name_hash(name).rem_euclid(360) as u16
}

/// Background colour: `hsl(hue, 70%, 70%)`.
pub fn color(name: &str) -> Color {
    let (r, g, b) = hsl_to_rgb(hue(name) as f64, 0.70, 0.70);
    Color::Rgb(r, g, b)
}

/// Avatar as a three-cell span.
pub fn span(name: &str) -> Span<'static> {
    Span::styled(
        format!(" {} ", initial(name)),
        Style::default()
            .fg(Color::White)
            .bg(color(name))
            .add_modifier(Modifier::BOLD),
    )
}

fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (u8, u8, u8) {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let h = h / 60.0;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c / 2.0;
    let channel = |v: f64| ((v + m) * 255.0).round() as u8;
    (channel(r), channel(g), channel(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial() {
        assert_eq!(initial("alice"), 'A');
        assert_eq!(initial("éva"), 'É');
        assert_eq!(initial(""), '?');
    }

    #[test]
    fn test_hue_matches_reference_values() {
        assert_eq!(hue(""), 0);
        assert_eq!(hue("a"), 97);
        assert_eq!(hue("ab"), 225);
        assert_eq!(hue("bob"), 157);
        assert_eq!(hue("administrator_backup_account"), 226);
        // Negative hash wraps into 0..360.
        assert_eq!(hue("joão.silva"), 108);
    }

    #[test]
    fn test_color_is_deterministic_and_spread() {
        assert_eq!(color("alice"), color("alice"));
        assert_ne!(color("bob"), color("carol"));
        assert_eq!(color(""), Color::Rgb(232, 125, 125));
    }
}
