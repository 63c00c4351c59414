use ratatui::style::Color;
use recall_coach::config::{AppConfig, Theme};

/// Colors used across all views for one theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub accent: Color,
    pub text: Color,
    pub muted: Color,
    pub learner: Color,
}

impl Palette {
    pub fn for_theme(config: &AppConfig, theme: Theme) -> Self {
        let accent = config
            .accent_for(theme)
            .and_then(parse_hex_color)
            .unwrap_or(Color::Cyan);

        match theme {
            Theme::Light => Self {
                accent,
                text: Color::Black,
                muted: Color::Gray,
                learner: Color::Green,
            },
            Theme::Dark => Self {
                accent,
                text: Color::White,
                muted: Color::DarkGray,
                learner: Color::LightGreen,
            },
        }
    }
}

/// Parse `#rrggbb` (leading `#` optional)
pub fn parse_hex_color(value: &str) -> Option<Color> {
    let hex = value.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }

    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use recall_coach::config::APP_CONFIG_DEFAULTS;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#6366f1"), Some(Color::Rgb(0x63, 0x66, 0xf1)));
        assert_eq!(parse_hex_color("818CF8"), Some(Color::Rgb(0x81, 0x8c, 0xf8)));
        assert_eq!(parse_hex_color("#fff"), None);
        assert_eq!(parse_hex_color("#zzzzzz"), None);
    }

    #[test]
    fn test_palette_uses_theme_accent() {
        let light = Palette::for_theme(&APP_CONFIG_DEFAULTS, Theme::Light);
        let dark = Palette::for_theme(&APP_CONFIG_DEFAULTS, Theme::Dark);
        assert_eq!(light.accent, Color::Rgb(0x63, 0x66, 0xf1));
        assert_eq!(dark.accent, Color::Rgb(0x81, 0x8c, 0xf8));
        assert_eq!(dark.text, Color::White);
    }

    #[test]
    fn test_palette_falls_back_without_accent() {
        let config = AppConfig {
            accent: None,
            accent_dark: None,
            ..APP_CONFIG_DEFAULTS
        };
        assert_eq!(Palette::for_theme(&config, Theme::Dark).accent, Color::Cyan);
    }
}
