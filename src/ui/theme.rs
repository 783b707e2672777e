use std::fs;

use ratatui::style::Color;
use rust_embed::Embed;
use serde::{Deserialize, Serialize};

#[derive(Embed)]
#[folder = "assets/themes/"]
struct ThemeAssets;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThemeColors {
    pub bg: String,
    pub fg: String,
    pub text_muted: String,
    pub accent: String,
    pub accent_alt: String,
    pub border: String,
    pub border_focused: String,
    pub header_bg: String,
    pub header_fg: String,
    pub bar_filled: String,
    pub bar_empty: String,
    pub selected_bg: String,
    pub error: String,
    pub warning: String,
    pub success: String,
}

impl Theme {
    pub fn load(name: &str) -> Option<Self> {
        // User themes shadow bundled ones
        if let Some(config_dir) = dirs::config_dir() {
            let user_theme_path = config_dir
                .join("eduplanner")
                .join("themes")
                .join(format!("{name}.toml"));
            if let Ok(content) = fs::read_to_string(&user_theme_path) {
                match toml::from_str::<Theme>(&content) {
                    Ok(theme) => return Some(theme),
                    Err(err) => tracing::warn!(path = %user_theme_path.display(), %err, "ignoring bad user theme"),
                }
            }
        }

        let filename = format!("{name}.toml");
        let file = ThemeAssets::get(&filename)?;
        let content = std::str::from_utf8(file.data.as_ref()).ok()?;
        toml::from_str::<Theme>(content).ok()
    }

    pub fn available_themes() -> Vec<String> {
        ThemeAssets::iter()
            .filter_map(|f| f.strip_suffix(".toml").map(|n| n.to_string()))
            .collect()
    }

    /// Name of the theme the `t` key switches to.
    pub fn toggled_name(&self) -> &'static str {
        if self.name == "light" { "dark" } else { "light" }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::load("dark").unwrap_or_else(|| Self {
            name: "dark".to_string(),
            colors: ThemeColors::default(),
        })
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            bg: "#0b0f1a".to_string(),
            fg: "#e2e8f0".to_string(),
            text_muted: "#94a3b8".to_string(),
            accent: "#4c9aff".to_string(),
            accent_alt: "#8b5cf6".to_string(),
            border: "#334155".to_string(),
            border_focused: "#4c9aff".to_string(),
            header_bg: "#1e293b".to_string(),
            header_fg: "#e2e8f0".to_string(),
            bar_filled: "#4c9aff".to_string(),
            bar_empty: "#1e293b".to_string(),
            selected_bg: "#1d2a4d".to_string(),
            error: "#f87171".to_string(),
            warning: "#fbbf24".to_string(),
            success: "#4ade80".to_string(),
        }
    }
}

impl ThemeColors {
    pub fn parse_color(hex: &str) -> Color {
        let hex = hex.trim_start_matches('#');
        if hex.len() == 6 {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return Color::Rgb(r, g, b);
            }
        }
        Color::White
    }

    pub fn bg(&self) -> Color { Self::parse_color(&self.bg) }
    pub fn fg(&self) -> Color { Self::parse_color(&self.fg) }
    pub fn text_muted(&self) -> Color { Self::parse_color(&self.text_muted) }
    pub fn accent(&self) -> Color { Self::parse_color(&self.accent) }
    pub fn accent_alt(&self) -> Color { Self::parse_color(&self.accent_alt) }
    pub fn border(&self) -> Color { Self::parse_color(&self.border) }
    pub fn border_focused(&self) -> Color { Self::parse_color(&self.border_focused) }
    pub fn header_bg(&self) -> Color { Self::parse_color(&self.header_bg) }
    pub fn header_fg(&self) -> Color { Self::parse_color(&self.header_fg) }
    pub fn bar_filled(&self) -> Color { Self::parse_color(&self.bar_filled) }
    pub fn bar_empty(&self) -> Color { Self::parse_color(&self.bar_empty) }
    pub fn selected_bg(&self) -> Color { Self::parse_color(&self.selected_bg) }
    pub fn error(&self) -> Color { Self::parse_color(&self.error) }
    pub fn warning(&self) -> Color { Self::parse_color(&self.warning) }
    pub fn success(&self) -> Color { Self::parse_color(&self.success) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_themes_load() {
        let mut names = Theme::available_themes();
        names.sort();
        assert_eq!(names, vec!["dark".to_string(), "light".to_string()]);
        for name in names {
            assert_eq!(Theme::load(&name).unwrap().name, name);
        }
    }

    #[test]
    fn test_unknown_theme_is_none() {
        assert!(Theme::load("no-such-theme").is_none());
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(ThemeColors::parse_color("#4c9aff"), Color::Rgb(0x4c, 0x9a, 0xff));
        assert_eq!(ThemeColors::parse_color("nonsense"), Color::White);
    }

    #[test]
    fn test_toggled_name() {
        let dark = Theme::load("dark").unwrap();
        let light = Theme::load("light").unwrap();
        assert_eq!(dark.toggled_name(), "light");
        assert_eq!(light.toggled_name(), "dark");
    }
}
