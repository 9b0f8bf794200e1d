//! Light/dark theme for the preview
//!
//! The theme is resolved once into a [`ThemeContext`] and handed to
//! whoever draws. A stored preference wins over the system preference.

use serde::{Deserialize, Serialize};
use tiny_skia::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    /// Parses a theme name, case-insensitively
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    /// Infers the terminal's preference from a `COLORFGBG` value
    ///
    /// The variable looks like `15;0` (foreground;background). A background
    /// index of 0-6 or 8 is a dark terminal.
    pub fn from_colorfgbg(value: &str) -> Option<Self> {
        let background = value.rsplit(';').next()?.trim().parse::<u8>().ok()?;
        match background {
            0..=6 | 8 => Some(Theme::Dark),
            _ => Some(Theme::Light),
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Light => Palette {
                background: Color::from_rgba8(255, 255, 255, 255),
                frame: Color::from_rgba8(132, 204, 22, 255),
                cell: Color::from_rgba8(241, 245, 249, 255),
                cell_border: Color::from_rgba8(203, 213, 225, 255),
                label: Color::from_rgba8(226, 232, 240, 255),
                text: Color::from_rgba8(17, 24, 39, 255),
            },
            Theme::Dark => Palette {
                background: Color::from_rgba8(15, 23, 42, 255),
                frame: Color::from_rgba8(163, 230, 53, 255),
                cell: Color::from_rgba8(30, 41, 59, 255),
                cell_border: Color::from_rgba8(71, 85, 105, 255),
                label: Color::from_rgba8(51, 65, 85, 255),
                text: Color::from_rgba8(255, 255, 255, 255),
            },
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Theme::Light => f.write_str("light"),
            Theme::Dark => f.write_str("dark"),
        }
    }
}

/// Colors used by the preview renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub frame: Color,
    pub cell: Color,
    pub cell_border: Color,
    pub label: Color,
    pub text: Color,
}

/// Resolved theme plus where it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeContext {
    stored: Option<Theme>,
    system: Theme,
}

impl ThemeContext {
    /// # Arguments
    /// * `stored` - Preference saved in the settings file, if any
    /// * `system` - Preference reported by the environment
    pub fn new(stored: Option<Theme>, system: Theme) -> Self {
        Self { stored, system }
    }

    /// Detects the system preference from the process environment
    pub fn detect(stored: Option<Theme>) -> Self {
        let system = std::env::var("COLORFGBG")
            .ok()
            .and_then(|value| Theme::from_colorfgbg(&value))
            .unwrap_or(Theme::Light);
        Self::new(stored, system)
    }

    /// The theme in effect
    pub fn theme(&self) -> Theme {
        self.stored.unwrap_or(self.system)
    }

    pub fn palette(&self) -> Palette {
        self.theme().palette()
    }

    /// Records an explicit choice; it overrides the system preference
    pub fn set(&mut self, theme: Theme) {
        self.stored = Some(theme);
    }

    /// The explicit choice, if one was made
    pub fn stored(&self) -> Option<Theme> {
        self.stored
    }
}
