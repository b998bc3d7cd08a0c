use std::path::{Path, PathBuf};

use crossterm::event::KeyCode;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub colors: ColorsConfig,
    pub keybinds: KeybindsConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Content cells inside the usage bar, excluding the brackets.
    pub bar_width: usize,
    pub log_file: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            bar_width: 24,
            log_file: "ncmu.log".to_string(),
        }
    }
}

/// Gruvbox by default, matching the two bar segments to the palette's blue
/// and green.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ColorsConfig {
    pub bar_self: String,
    pub bar_children: String,
    pub bar_placeholder: String,
    pub surface: String,
    pub highlight: String,
    pub text: String,
    pub accent: String,
}

impl Default for ColorsConfig {
    fn default() -> Self {
        ColorsConfig {
            bar_self: "#83a598".to_string(),
            bar_children: "#b8bb26".to_string(),
            bar_placeholder: "#504945".to_string(),
            surface: "#3c3836".to_string(),
            highlight: "#504945".to_string(),
            text: "#ebdbb2".to_string(),
            accent: "#83a598".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct KeybindsConfig {
    pub quit: String,
    pub descend: String,
    pub ascend: String,
    pub refresh: String,
    pub help: String,
}

impl Default for KeybindsConfig {
    fn default() -> Self {
        KeybindsConfig {
            quit: "q".to_string(),
            descend: "Enter".to_string(),
            ascend: "Escape".to_string(),
            refresh: "r".to_string(),
            help: "?".to_string(),
        }
    }
}

/// Parse a keybind string from config into a crossterm key code.
pub fn parse_key(s: &str) -> Option<KeyCode> {
    match s {
        "Enter" => Some(KeyCode::Enter),
        "Escape" | "Esc" => Some(KeyCode::Esc),
        "Tab" => Some(KeyCode::Tab),
        "Backspace" => Some(KeyCode::Backspace),
        "Space" => Some(KeyCode::Char(' ')),
        _ => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(KeyCode::Char(c)),
                _ => None,
            }
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("ncmu").join("config.toml"))
}

pub fn load_config() -> Config {
    match config_path() {
        Some(path) if path.exists() => load_config_from_path(&path),
        _ => Config::default(),
    }
}

pub fn load_config_from_path(path: &Path) -> Config {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).unwrap_or_default(),
        Err(_) => Config::default(),
    }
}
