use colored::{Color, Colorize};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: HashMap<String, ColorConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorConfig {
    pub foreground: Option<String>,
    pub style: Vec<String>,
}

impl ColorConfig {
    fn new(foreground: &str, style: &[&str]) -> Self {
        Self {
            foreground: Some(foreground.to_string()),
            style: style.iter().map(|s| s.to_string()).collect(),
        }
    }
}

pub struct ThemeManager {
    themes: HashMap<String, Theme>,
    current_theme: String,
}

impl ThemeManager {
    pub fn new() -> Self {
        let mut manager = Self {
            themes: HashMap::new(),
            current_theme: "default".to_string(),
        };

        manager.load_default_themes();
        manager
    }

    pub fn set_theme(&mut self, theme_name: &str) -> bool {
        if self.themes.contains_key(theme_name) {
            self.current_theme = theme_name.to_string();
            true
        } else {
            false
        }
    }

    pub fn apply_style(&self, text: &str, style_name: &str) -> String {
        // "default" always exists; themes missing a style fall back to it
        let color_config = self
            .themes
            .get(&self.current_theme)
            .and_then(|theme| theme.colors.get(style_name))
            .or_else(|| {
                self.themes
                    .get("default")
                    .and_then(|theme| theme.colors.get(style_name))
            });

        let Some(color_config) = color_config else {
            return text.to_string();
        };

        let mut styled_text = text.to_string();

        if let Some(color) = color_config.foreground.as_deref().and_then(parse_color) {
            styled_text = styled_text.color(color).to_string();
        }

        for style in &color_config.style {
            styled_text = match style.as_str() {
                "bold" => styled_text.bold().to_string(),
                "italic" => styled_text.italic().to_string(),
                "underline" => styled_text.underline().to_string(),
                "dimmed" => styled_text.dimmed().to_string(),
                "reversed" => styled_text.reversed().to_string(),
                _ => styled_text,
            };
        }

        styled_text
    }

    fn load_default_themes(&mut self) {
        let default_colors = HashMap::from([
            ("mark_x".to_string(), ColorConfig::new("red", &["bold"])),
            ("mark_o".to_string(), ColorConfig::new("blue", &["bold"])),
            ("empty".to_string(), ColorConfig::new("bright_black", &[])),
            ("grid".to_string(), ColorConfig::new("bright_black", &["dimmed"])),
            ("coordinate".to_string(), ColorConfig::new("yellow", &[])),
            ("highlight".to_string(), ColorConfig::new("green", &["bold", "reversed"])),
            ("status".to_string(), ColorConfig::new("white", &["bold"])),
            ("error".to_string(), ColorConfig::new("red", &["bold"])),
            ("success".to_string(), ColorConfig::new("green", &["bold"])),
            ("warning".to_string(), ColorConfig::new("yellow", &["bold"])),
            ("info".to_string(), ColorConfig::new("blue", &[])),
        ]);

        self.themes.insert("default".to_string(), Theme {
            name: "default".to_string(),
            colors: default_colors,
        });

        let dark_colors = HashMap::from([
            ("mark_x".to_string(), ColorConfig::new("bright_red", &["bold"])),
            ("mark_o".to_string(), ColorConfig::new("bright_cyan", &["bold"])),
            ("grid".to_string(), ColorConfig::new("white", &["dimmed"])),
            ("status".to_string(), ColorConfig::new("bright_white", &["bold"])),
            ("highlight".to_string(), ColorConfig::new("bright_green", &["bold", "reversed"])),
        ]);

        self.themes.insert("dark".to_string(), Theme {
            name: "dark".to_string(),
            colors: dark_colors,
        });

        let light_colors = HashMap::from([
            ("mark_x".to_string(), ColorConfig::new("magenta", &["bold"])),
            ("mark_o".to_string(), ColorConfig::new("blue", &["bold"])),
            ("grid".to_string(), ColorConfig::new("black", &[])),
            ("status".to_string(), ColorConfig::new("black", &["bold"])),
        ]);

        self.themes.insert("light".to_string(), Theme {
            name: "light".to_string(),
            colors: light_colors,
        });
    }
}

impl Default for ThemeManager {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_color(color_name: &str) -> Option<Color> {
    match color_name.to_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "white" => Some(Color::White),
        "bright_black" => Some(Color::BrightBlack),
        "bright_red" => Some(Color::BrightRed),
        "bright_green" => Some(Color::BrightGreen),
        "bright_yellow" => Some(Color::BrightYellow),
        "bright_blue" => Some(Color::BrightBlue),
        "bright_magenta" => Some(Color::BrightMagenta),
        "bright_cyan" => Some(Color::BrightCyan),
        "bright_white" => Some(Color::BrightWhite),
        _ => None,
    }
}
