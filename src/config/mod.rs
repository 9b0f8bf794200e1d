//! Configuration module for gridsmith
//!
//! Bounds and variant presets for the generator, the light/dark theme
//! context, and the optional JSON settings file.

pub mod grid;
pub mod settings;
pub mod theme;

pub use grid::{GridBounds, ToolVariant};
pub use settings::{Settings, SettingsError, SettingsStore};
pub use theme::{Palette, Theme, ThemeContext};
