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
    pub dim: String,
    pub accent: String,
    pub border: String,
    pub header_bg: String,
    pub header_fg: String,
    pub card_bg: String,
    pub card_fg: String,
    pub correct: String,
    pub correct_bg: String,
    pub incorrect: String,
    pub incorrect_bg: String,
    pub selection: String,
    pub bar_filled: String,
    pub bar_empty: String,
    pub success: String,
    pub warning: String,
    pub error: String,
}

impl Theme {
    /// User themes (config dir) shadow the bundled ones of the same name.
    pub fn load(name: &str) -> Option<Self> {
        if let Some(config_dir) = dirs::config_dir() {
            let user_theme_path = config_dir
                .join("vocadrill")
                .join("themes")
                .join(format!("{name}.toml"));
            if let Ok(content) = fs::read_to_string(&user_theme_path)
                && let Ok(theme) = toml::from_str::<Theme>(&content)
            {
                return Some(theme);
            }
        }

        let filename = format!("{name}.toml");
        if let Some(file) = ThemeAssets::get(&filename)
            && let Ok(content) = std::str::from_utf8(file.data.as_ref())
            && let Ok(theme) = toml::from_str::<Theme>(content)
        {
            return Some(theme);
        }

        None
    }

    pub fn available_themes() -> Vec<String> {
        ThemeAssets::iter()
            .filter_map(|f| f.strip_suffix(".toml").map(|n| n.to_string()))
            .collect()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::load("catppuccin-mocha").unwrap_or_else(|| Self {
            name: "default".to_string(),
            colors: ThemeColors::default(),
        })
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            bg: "#1e1e2e".to_string(),
            fg: "#cdd6f4".to_string(),
            dim: "#585b70".to_string(),
            accent: "#89b4fa".to_string(),
            border: "#45475a".to_string(),
            header_bg: "#313244".to_string(),
            header_fg: "#cdd6f4".to_string(),
            card_bg: "#313244".to_string(),
            card_fg: "#cdd6f4".to_string(),
            correct: "#a6e3a1".to_string(),
            correct_bg: "#2e3b2e".to_string(),
            incorrect: "#f38ba8".to_string(),
            incorrect_bg: "#45273a".to_string(),
            selection: "#f9e2af".to_string(),
            bar_filled: "#89b4fa".to_string(),
            bar_empty: "#313244".to_string(),
            success: "#a6e3a1".to_string(),
            warning: "#f9e2af".to_string(),
            error: "#f38ba8".to_string(),
        }
    }
}

impl ThemeColors {
    pub fn parse_color(hex: &str) -> Color {
        let hex = hex.trim_start_matches('#');
        if hex.len() == 6
            && let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            )
        {
            return Color::Rgb(r, g, b);
        }
        Color::Reset
    }

    pub fn bg(&self) -> Color {
        Self::parse_color(&self.bg)
    }

    pub fn fg(&self) -> Color {
        Self::parse_color(&self.fg)
    }

    pub fn dim(&self) -> Color {
        Self::parse_color(&self.dim)
    }

    pub fn accent(&self) -> Color {
        Self::parse_color(&self.accent)
    }

    pub fn border(&self) -> Color {
        Self::parse_color(&self.border)
    }

    pub fn header_bg(&self) -> Color {
        Self::parse_color(&self.header_bg)
    }

    pub fn header_fg(&self) -> Color {
        Self::parse_color(&self.header_fg)
    }

    pub fn card_bg(&self) -> Color {
        Self::parse_color(&self.card_bg)
    }

    pub fn card_fg(&self) -> Color {
        Self::parse_color(&self.card_fg)
    }

    pub fn correct(&self) -> Color {
        Self::parse_color(&self.correct)
    }

    pub fn correct_bg(&self) -> Color {
        Self::parse_color(&self.correct_bg)
    }

    pub fn incorrect(&self) -> Color {
        Self::parse_color(&self.incorrect)
    }

    pub fn incorrect_bg(&self) -> Color {
        Self::parse_color(&self.incorrect_bg)
    }

    pub fn selection(&self) -> Color {
        Self::parse_color(&self.selection)
    }

    pub fn bar_filled(&self) -> Color {
        Self::parse_color(&self.bar_filled)
    }

    pub fn bar_empty(&self) -> Color {
        Self::parse_color(&self.bar_empty)
    }

    pub fn success(&self) -> Color {
        Self::parse_color(&self.success)
    }

    pub fn warning(&self) -> Color {
        Self::parse_color(&self.warning)
    }

    pub fn error(&self) -> Color {
        Self::parse_color(&self.error)
    }
}
