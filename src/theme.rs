// src/theme.rs

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;
use tui::style::Color;

use crate::app::config::config_dir;
use crate::error::Result;

/// Colors used by the typing screen and the results view.
/// Every field has a default and can be overridden in `theme.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Theme {
    pub background: ThemeColor,
    pub foreground: ThemeColor,
    pub border: ThemeColor,
    pub title_accent: ThemeColor,

    pub letter_pending: ThemeColor,
    pub letter_correct: ThemeColor,
    pub letter_wrong: ThemeColor,
    pub cursor_bg: ThemeColor,
    pub cursor_fg: ThemeColor,
    pub overlay: ThemeColor,

    pub tab_active: ThemeColor,
    pub tab_inactive: ThemeColor,
    pub stats_label: ThemeColor,
    pub stats_value: ThemeColor,

    pub chart_line: ThemeColor,
    pub chart_axis: ThemeColor,
    pub error: ThemeColor,
}

/// Represents a color that can be serialized to/from TOML
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ThemeColor {
    /// Named color like "red", "blue", "yellow"
    Named(String),
    /// RGB color as [r, g, b] array
    Rgb([u8; 3]),
    /// Indexed color (0-255)
    Indexed(u8),
}

fn named(name: &str) -> ThemeColor {
    ThemeColor::Named(name.to_string())
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: named("reset"),
            foreground: named("white"),
            border: named("white"),
            title_accent: named("light_blue"),

            letter_pending: named("gray"),
            letter_correct: named("green"),
            letter_wrong: named("red"),
            cursor_bg: named("yellow"),
            cursor_fg: named("black"),
            overlay: named("dark_gray"),

            tab_active: named("yellow"),
            tab_inactive: named("white"),
            stats_label: named("gray"),
            stats_value: named("yellow"),

            chart_line: named("cyan"),
            chart_axis: named("white"),
            error: named("red"),
        }
    }
}

impl ThemeColor {
    /// Convert ThemeColor to tui::style::Color
    pub fn to_tui_color(&self) -> Color {
        match self {
            ThemeColor::Named(name) => match name.to_lowercase().as_str() {
                "reset" => Color::Reset,
                "black" => Color::Black,
                "red" => Color::Red,
                "green" => Color::Green,
                "yellow" => Color::Yellow,
                "blue" => Color::Blue,
                "magenta" => Color::Magenta,
                "cyan" => Color::Cyan,
                "gray" | "grey" => Color::Gray,
                "dark_gray" | "dark_grey" => Color::DarkGray,
                "light_red" => Color::LightRed,
                "light_green" => Color::LightGreen,
                "light_yellow" => Color::LightYellow,
                "light_blue" => Color::LightBlue,
                "light_magenta" => Color::LightMagenta,
                "light_cyan" => Color::LightCyan,
                "white" => Color::White,
                _ => Color::White,
            },
            ThemeColor::Rgb([r, g, b]) => Color::Rgb(*r, *g, *b),
            ThemeColor::Indexed(index) => Color::Indexed(*index),
        }
    }
}

impl Theme {
    /// Load `theme.toml` from the config directory. Missing or broken files
    /// fall back to the defaults.
    pub fn load() -> Self {
        match config_dir() {
            Ok(dir) => Self::load_from(&dir.join("theme.toml")),
            Err(err) => {
                warn!(error = %err, "using default theme");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::read(path) {
            Ok(theme) => theme,
            Err(err) => {
                warn!(error = %err, path = %path.display(), "malformed theme, using defaults");
                Self::default()
            }
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|source| crate::error::TypistError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })
    }
}
