//src/config.rs
use comfy_table::Color;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;
use thiserror::Error;

const CONFIG_FILE_NAME: &str = "config.toml";
pub(crate) const APP_DIR: &str = "fittrack";
const CONFIG_ENV_VAR: &str = "FITTRACK_CONFIG_DIR"; // Environment variable name

/// Day names a fresh config starts with.
pub const DEFAULT_DAYS: [&str; 6] = ["Push", "Pull", "Legs", "Upper", "Lower", "Cardio"];

#[derive(Error, Debug)]
pub enum Error {
    #[error("Could not determine configuration directory.")]
    CannotDetermineConfigDir,
    #[error("I/O error accessing config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file (TOML): {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("Failed to serialize config data (TOML): {0}")]
    TomlSerialize(#[from] toml::ser::Error),
    #[error("Invalid color name: {0}")]
    InvalidColor(String),
}

// Define standard colors using strum for easy iteration/parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum StandardColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    DarkGrey,
    DarkRed,
    DarkGreen,
    DarkYellow,
    DarkBlue,
    DarkMagenta,
    DarkCyan,
    Grey,
}

impl From<StandardColor> for Color {
    fn from(value: StandardColor) -> Self {
        match value {
            StandardColor::Black => Self::Black,
            StandardColor::Red => Self::Red,
            StandardColor::Green => Self::Green,
            StandardColor::Yellow => Self::Yellow,
            StandardColor::Blue => Self::Blue,
            StandardColor::Magenta => Self::Magenta,
            StandardColor::Cyan => Self::Cyan,
            StandardColor::White => Self::White,
            StandardColor::DarkGrey => Self::DarkGrey,
            StandardColor::DarkRed => Self::DarkRed,
            StandardColor::DarkGreen => Self::DarkGreen,
            StandardColor::DarkYellow => Self::DarkYellow,
            StandardColor::DarkBlue => Self::DarkBlue,
            StandardColor::DarkMagenta => Self::DarkMagenta,
            StandardColor::DarkCyan => Self::DarkCyan,
            StandardColor::Grey => Self::Grey,
        }
    }
}

/// Parses a colour name case-insensitively ("darkblue", "DarkBlue", ...).
pub fn parse_color(color_str: &str) -> Result<StandardColor, Error> {
    StandardColor::iter()
        .find(|color| format!("{color:?}").eq_ignore_ascii_case(color_str.trim()))
        .ok_or_else(|| Error::InvalidColor(color_str.to_string()))
}

/// Header colours used by the table renderer, one per theme.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ThemeColors {
    pub light_header: String,
    pub dark_header: String,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            light_header: "DarkBlue".to_string(),
            dark_header: "Yellow".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)] // Missing fields fall back to defaults
pub struct Config {
    /// Configured workout days, in display order. Append-only through the CLI.
    pub days: Vec<String>,
    /// Index into `days` of the day currently being edited.
    pub active_day: usize,

    // Theming (tables must come last for TOML serialization)
    pub theme: ThemeColors,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            days: DEFAULT_DAYS.iter().map(ToString::to_string).collect(),
            active_day: 0,
            theme: ThemeColors::default(),
        }
    }
}

impl Config {
    /// Drops blank and duplicate day names, falls back to the default days when
    /// nothing usable is left, and resets an out-of-range `active_day` to 0.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        let mut days: Vec<String> = Vec::with_capacity(self.days.len());
        for day in self.days.drain(..) {
            let trimmed = day.trim();
            if !trimmed.is_empty() && !days.iter().any(|d| d == trimmed) {
                days.push(trimmed.to_string());
            }
        }
        if days.is_empty() {
            days = Self::default().days;
        }
        if self.active_day >= days.len() {
            self.active_day = 0;
        }
        self.days = days;
        self
    }
}

/// Determines the path to the configuration file.
/// Exposed at crate root as `get_config_path_util`
pub fn get_config_path() -> Result<PathBuf, Error> {
    let config_dir_path = if let Ok(path_str) = std::env::var(CONFIG_ENV_VAR) {
        let path = PathBuf::from(path_str);
        if !path.is_dir() {
            tracing::warn!(
                "{} points to '{}', which is not a directory. Trying to create it.",
                CONFIG_ENV_VAR,
                path.display()
            );
            fs::create_dir_all(&path)?;
        }
        path
    } else {
        let base_config_dir = dirs::config_dir().ok_or(Error::CannotDetermineConfigDir)?;
        base_config_dir.join(APP_DIR)
    };

    if !config_dir_path.exists() {
        fs::create_dir_all(&config_dir_path)?;
    }

    Ok(config_dir_path.join(CONFIG_FILE_NAME))
}

/// Loads the configuration from the TOML file at the given path, writing a default
/// file first if none exists.
pub fn load(config_path: &Path) -> Result<Config, Error> {
    if config_path.exists() {
        let config_content = fs::read_to_string(config_path)?;
        let config: Config = toml::from_str(&config_content)?;
        Ok(config.normalized())
    } else {
        let default_config = Config::default();
        save(config_path, &default_config)?;
        Ok(default_config)
    }
}

/// Saves the configuration to the TOML file.
pub fn save(config_path: &Path, config: &Config) -> Result<(), Error> {
    if let Some(parent_dir) = config_path.parent() {
        if !parent_dir.as_os_str().is_empty() && !parent_dir.exists() {
            fs::create_dir_all(parent_dir)?;
        }
    }
    let config_content = toml::to_string_pretty(config)?;
    fs::write(config_path, config_content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_color_ignores_case() {
        assert_eq!(parse_color("darkblue").unwrap(), StandardColor::DarkBlue);
        assert_eq!(parse_color(" Yellow ").unwrap(), StandardColor::Yellow);
        assert!(matches!(parse_color("mauve"), Err(Error::InvalidColor(_))));
    }

    #[test]
    fn normalized_cleans_days_and_pointer() {
        let config = Config {
            days: vec![
                " Arms ".to_string(),
                "".to_string(),
                "Arms".to_string(),
                "arms".to_string(),
            ],
            active_day: 7,
            ..Default::default()
        }
        .normalized();
        assert_eq!(config.days, vec!["Arms", "arms"]);
        assert_eq!(config.active_day, 0);
    }

    #[test]
    fn normalized_falls_back_to_default_days() {
        let config = Config {
            days: vec!["   ".to_string()],
            active_day: 3,
            ..Default::default()
        }
        .normalized();
        assert_eq!(config.days, DEFAULT_DAYS);
        assert_eq!(config.active_day, 3);
    }

    #[test]
    fn load_creates_default_file_and_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);

        let created = load(&path).unwrap();
        assert!(path.exists());
        assert_eq!(created, Config::default());

        let mut changed = created;
        changed.days.push("Arms".to_string());
        changed.active_day = 6;
        changed.theme.dark_header = "Cyan".to_string();
        save(&path, &changed).unwrap();

        assert_eq!(load(&path).unwrap(), changed);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let config: Config = toml::from_str("active_day = 2\n").unwrap();
        assert_eq!(config.days, DEFAULT_DAYS);
        assert_eq!(config.active_day, 2);
        assert_eq!(config.theme, ThemeColors::default());
    }
}
