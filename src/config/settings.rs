//! Settings file
//!
//! A small JSON document next to the user's other dotfiles. Every field is
//! optional; a missing file is the same as an empty one. Only the theme
//! preference is ever written back. Grid state is never persisted.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::grid::{GridBounds, ToolVariant};
use crate::config::theme::Theme;

/// Environment variable naming the settings file
pub const SETTINGS_ENV: &str = "GRIDSMITH_SETTINGS";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read settings from {}: {source}", .path.display())]
    Read { path: PathBuf, source: std::io::Error },
    #[error("failed to write settings to {}: {source}", .path.display())]
    Write { path: PathBuf, source: std::io::Error },
    #[error("settings file {} is not valid JSON: {source}", .path.display())]
    Parse { path: PathBuf, source: serde_json::Error },
    #[error("failed to encode settings: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Generator flavour; defaults to the extended tool
    pub variant: ToolVariant,
    /// Upper bound for both gap fields, in pixels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_gap_px: Option<u32>,
    /// Saved light/dark choice
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    /// TrueType/OpenType font used for preview labels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_path: Option<PathBuf>,
}

impl Settings {
    /// Bounds derived from these settings
    pub fn bounds(&self) -> GridBounds {
        match self.max_gap_px {
            Some(max_gap) => GridBounds::with_max_gap(max_gap),
            None => GridBounds::default(),
        }
    }
}

/// Loads and saves [`Settings`] at a fixed path
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Picks the path from an explicit argument, then `GRIDSMITH_SETTINGS`
    pub fn locate(explicit: Option<PathBuf>) -> Option<Self> {
        explicit
            .or_else(|| std::env::var_os(SETTINGS_ENV).map(PathBuf::from))
            .map(Self::new)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the settings file
    ///
    /// # Returns
    /// Defaults when the file does not exist, the parsed settings otherwise
    pub fn load(&self) -> Result<Settings, SettingsError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no settings file, using defaults");
                return Ok(Settings::default());
            }
            Err(source) => {
                return Err(SettingsError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        if raw.trim().is_empty() {
            return Ok(Settings::default());
        }

        serde_json::from_str(&raw).map_err(|source| SettingsError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Writes the settings file, replacing any previous content
    pub fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        let encoded = serde_json::to_string_pretty(settings)?;
        fs::write(&self.path, encoded).map_err(|source| SettingsError::Write {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), "settings saved");
        Ok(())
    }

    /// Persists a theme choice, keeping the other fields as they are on disk
    pub fn save_theme(&self, theme: Theme) -> Result<(), SettingsError> {
        let mut settings = self.load()?;
        settings.theme = Some(theme);
        self.save(&settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn settings_file(dir: &TempDir, contents: Option<&str>) -> PathBuf {
        let path = dir.path().join("gridsmith.json");
        if let Some(contents) = contents {
            fs::write(&path, contents).unwrap();
        }
        path
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::new(settings_file(&dir, None));
        let settings = store.load().unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.bounds(), GridBounds::default());
    }

    #[test]
    fn empty_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::new(settings_file(&dir, Some("  \n")));
        assert_eq!(store.load().unwrap(), Settings::default());
    }

    #[test]
    fn parses_partial_document() {
        let dir = TempDir::new().unwrap();
        let path = settings_file(&dir, Some(r#"{ "variant": "basic", "max_gap_px": 48 }"#));

        let settings = SettingsStore::new(&path).load().unwrap();
        assert_eq!(settings.variant, ToolVariant::Basic);
        assert_eq!(settings.bounds().max_gap_px, 48);
        assert_eq!(settings.theme, None);
    }

    #[test]
    fn rejects_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = settings_file(&dir, Some("{ variant: "));

        let err = SettingsStore::new(&path).load().unwrap_err();
        assert!(matches!(err, SettingsError::Parse { .. }));
    }

    #[test]
    fn save_theme_preserves_other_fields() {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::new(settings_file(&dir, Some(r#"{ "variant": "basic" }"#)));
        store.save_theme(Theme::Dark).unwrap();

        let settings = store.load().unwrap();
        assert_eq!(settings.variant, ToolVariant::Basic);
        assert_eq!(settings.theme, Some(Theme::Dark));
    }

    #[test]
    fn locate_prefers_explicit_path() {
        let store = SettingsStore::locate(Some(PathBuf::from("explicit.json"))).unwrap();
        assert_eq!(store.path(), Path::new("explicit.json"));
    }
}
