//! Color themes for the rain and its decorations.

use ratatui::style::Color;

/// Color theme for the rain display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorTheme {
    #[default]
    Red,
    Green,
    Cyan,
    Magenta,
    Yellow,
    Blue,
    White,
}

impl ColorTheme {
    /// Cycle to the next color theme.
    pub fn next(self) -> Self {
        match self {
            ColorTheme::Red => ColorTheme::Green,
            ColorTheme::Green => ColorTheme::Cyan,
            ColorTheme::Cyan => ColorTheme::Magenta,
            ColorTheme::Magenta => ColorTheme::Yellow,
            ColorTheme::Yellow => ColorTheme::Blue,
            ColorTheme::Blue => ColorTheme::White,
            ColorTheme::White => ColorTheme::Red,
        }
    }

    /// Look a theme up by its config name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "red" => Some(ColorTheme::Red),
            "green" => Some(ColorTheme::Green),
            "cyan" => Some(ColorTheme::Cyan),
            "magenta" => Some(ColorTheme::Magenta),
            "yellow" => Some(ColorTheme::Yellow),
            "blue" => Some(ColorTheme::Blue),
            "white" => Some(ColorTheme::White),
            _ => None,
        }
    }

    /// Config name of this theme.
    pub fn name(self) -> &'static str {
        match self {
            ColorTheme::Red => "red",
            ColorTheme::Green => "green",
            ColorTheme::Cyan => "cyan",
            ColorTheme::Magenta => "magenta",
            ColorTheme::Yellow => "yellow",
            ColorTheme::Blue => "blue",
            ColorTheme::White => "white",
        }
    }

    /// Full-intensity RGB for a freshly drawn glyph.
    pub fn base_rgb(self) -> (u8, u8, u8) {
        match self {
            ColorTheme::Red => (255, 40, 40),
            ColorTheme::Green => (0, 220, 70),
            ColorTheme::Cyan => (0, 210, 220),
            ColorTheme::Magenta => (220, 60, 220),
            ColorTheme::Yellow => (230, 210, 40),
            ColorTheme::Blue => (60, 110, 255),
            ColorTheme::White => (220, 220, 220),
        }
    }

    /// Trail color at the given intensity (0.0 faded out, 1.0 fresh).
    pub fn trail_color(self, intensity: f32) -> Color {
        let (r, g, b) = self.base_rgb();
        let scale = 0.25 + 0.75 * intensity.clamp(0.0, 1.0);
        Color::Rgb(
            (r as f32 * scale) as u8,
            (g as f32 * scale) as u8,
            (b as f32 * scale) as u8,
        )
    }

    /// Near-white tint for an emphasized glyph head.
    pub fn head_color(self) -> Color {
        let (r, g, b) = self.base_rgb();
        Color::Rgb(
            r.saturating_add(200),
            g.saturating_add(200),
            b.saturating_add(200),
        )
    }

    /// Accent color for UI text in this theme.
    pub fn color(self) -> Color {
        match self {
            ColorTheme::Red => Color::Red,
            ColorTheme::Green => Color::Green,
            ColorTheme::Cyan => Color::Cyan,
            ColorTheme::Magenta => Color::Magenta,
            ColorTheme::Yellow => Color::Yellow,
            ColorTheme::Blue => Color::Blue,
            ColorTheme::White => Color::White,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_cycle_visits_every_theme() {
        let mut theme = ColorTheme::default();
        let mut seen = vec![theme];
        loop {
            theme = theme.next();
            if theme == ColorTheme::default() {
                break;
            }
            seen.push(theme);
        }
        assert_eq!(seen.len(), 7);
    }

    #[test]
    fn test_theme_names_round_trip() {
        let mut theme = ColorTheme::default();
        for _ in 0..7 {
            assert_eq!(ColorTheme::from_name(theme.name()), Some(theme));
            theme = theme.next();
        }
        assert_eq!(ColorTheme::from_name("mauve"), None);
    }

    #[test]
    fn test_trail_color_darkens_with_intensity() {
        let bright = ColorTheme::Green.trail_color(1.0);
        let dim = ColorTheme::Green.trail_color(0.0);
        let (Color::Rgb(_, bg, _), Color::Rgb(_, dg, _)) = (bright, dim) else {
            panic!("expected rgb colors");
        };
        assert!(bg > dg);
    }
}
