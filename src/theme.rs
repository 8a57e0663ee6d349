//src/theme.rs
use comfy_table::Color;
use strum_macros::{AsRefStr, Display};

use crate::config::{parse_color, StandardColor, ThemeColors};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Reads the stored preference. Only the exact strings "light" and "dark" are
    /// accepted; anything else (or nothing) gives the default theme.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("light") => Self::Light,
            Some("dark") => Self::Dark,
            Some(other) => {
                tracing::warn!(value = other, "ignoring unknown theme preference");
                Self::default()
            }
            None => Self::default(),
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Table header colour for this theme. Unknown colour names in the config fall
    /// back to the theme's built-in colour.
    pub fn header_color(self, colors: &ThemeColors) -> Color {
        let (configured, fallback) = match self {
            Self::Light => (&colors.light_header, StandardColor::DarkBlue),
            Self::Dark => (&colors.dark_header, StandardColor::Yellow),
        };
        parse_color(configured).unwrap_or(fallback).into()
    }
}
