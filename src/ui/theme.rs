use ratatui::style::Color;

use crate::config::ColorsConfig;

/// Static styling built once from config at startup and passed by reference
/// into every render function. Nothing here is ever mutated at runtime.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Own-memory segment of the usage bar.
    pub bar_self: Color,
    /// Descendants' segment of the usage bar.
    pub bar_children: Color,
    pub bar_placeholder: Color,
    pub surface_bg: Color,
    pub highlight_bg: Color,
    pub text_primary: Color,
    pub accent: Color,
}

impl Theme {
    pub fn from_config(colors: &ColorsConfig) -> Self {
        let defaults = ColorsConfig::default();
        let pick = |value: &str, fallback: &str| {
            parse_hex_color(value)
                .or_else(|| parse_hex_color(fallback))
                .unwrap_or(Color::Reset)
        };
        Theme {
            bar_self: pick(&colors.bar_self, &defaults.bar_self),
            bar_children: pick(&colors.bar_children, &defaults.bar_children),
            bar_placeholder: pick(&colors.bar_placeholder, &defaults.bar_placeholder),
            surface_bg: pick(&colors.surface, &defaults.surface),
            highlight_bg: pick(&colors.highlight, &defaults.highlight),
            text_primary: pick(&colors.text, &defaults.text),
            accent: pick(&colors.accent, &defaults.accent),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::from_config(&ColorsConfig::default())
    }
}

fn parse_hex_color(s: &str) -> Option<Color> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);
    // Byte slicing below requires ASCII; config input can be anything.
    if s.len() != 6 || !s.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&s[0..2], 16).ok()?;
    let g = u8::from_str_radix(&s[2..4], 16).ok()?;
    let b = u8::from_str_radix(&s[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}
