//! Layout engine settings and persistence
//!
//! Provides [`LayoutSettings`], the small set of tunables the engine
//! and its adapter honor, with JSON persistence under the platform
//! config directory. Out-of-range values loaded from disk are repaired
//! to defaults rather than rejected, so a hand-edited file cannot put
//! the engine into a degenerate state.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Settings file name inside the application config directory.
const SETTINGS_FILE: &str = "layout.json";

/// Application directory under the platform config root.
const APP_DIR: &str = "termgrid";

/// Errors that can occur while loading or saving settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Filesystem error reading or writing the settings file.
    #[error("settings I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The settings file is not valid JSON.
    #[error("settings parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// No platform config directory is available.
    #[error("no config directory available on this platform")]
    NoConfigDir,
}

/// Tunables for the split layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutSettings {
    /// Minimum fraction of the container a panel may occupy. Split
    /// ratios are clamped to `[min, 1 - min]`.
    #[serde(default = "default_min_panel_fraction")]
    pub min_panel_fraction: f64,

    /// Ratio assigned to a freshly created split.
    #[serde(default = "default_split_ratio")]
    pub default_split_ratio: f64,

    /// Debounce interval, in milliseconds, the embedder should apply
    /// before asking panel hosts to re-fit after a geometry change.
    #[serde(default = "default_refit_debounce_ms")]
    pub refit_debounce_ms: u64,
}

fn default_min_panel_fraction() -> f64 {
    crate::split::MIN_PANEL_FRACTION
}

fn default_split_ratio() -> f64 {
    crate::split::DEFAULT_SPLIT_RATIO
}

fn default_refit_debounce_ms() -> u64 {
    50
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            min_panel_fraction: default_min_panel_fraction(),
            default_split_ratio: default_split_ratio(),
            refit_debounce_ms: default_refit_debounce_ms(),
        }
    }
}

impl LayoutSettings {
    /// Clamps a split ratio to the configured valid range.
    #[must_use]
    pub fn clamp_ratio(&self, ratio: f64) -> f64 {
        ratio.clamp(self.min_panel_fraction, 1.0 - self.min_panel_fraction)
    }

    /// Loads settings from the default location, falling back to
    /// defaults if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if no config directory exists, or the file
    /// exists but cannot be read or parsed.
    pub fn load() -> Result<Self, SettingsError> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads settings from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let contents = fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&contents)?;
        Ok(settings.sanitized())
    }

    /// Saves settings to a specific file, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Saves settings to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if no config directory exists or the file
    /// cannot be written.
    pub fn save(&self) -> Result<(), SettingsError> {
        self.save_to(&Self::default_path()?)
    }

    /// Returns the default settings file path.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::NoConfigDir`] if the platform exposes
    /// no config directory.
    pub fn default_path() -> Result<PathBuf, SettingsError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR).join(SETTINGS_FILE))
            .ok_or(SettingsError::NoConfigDir)
    }

    /// Repairs out-of-range values back to defaults.
    #[must_use]
    fn sanitized(mut self) -> Self {
        if !(self.min_panel_fraction > 0.0 && self.min_panel_fraction < 0.5) {
            warn!(
                value = self.min_panel_fraction,
                "min_panel_fraction out of range, using default"
            );
            self.min_panel_fraction = default_min_panel_fraction();
        }
        if !(self.default_split_ratio > 0.0 && self.default_split_ratio < 1.0) {
            warn!(
                value = self.default_split_ratio,
                "default_split_ratio out of range, using default"
            );
            self.default_split_ratio = default_split_ratio();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_in_range() {
        let settings = LayoutSettings::default();
        assert!(settings.min_panel_fraction > 0.0);
        assert!(settings.min_panel_fraction < 0.5);
        assert!((settings.default_split_ratio - 0.5).abs() < f64::EPSILON);
        assert_eq!(settings.refit_debounce_ms, 50);
    }

    #[test]
    fn clamp_ratio_respects_min_fraction() {
        let settings = LayoutSettings::default();
        assert!((settings.clamp_ratio(1.5) - 0.9).abs() < f64::EPSILON);
        assert!((settings.clamp_ratio(-0.2) - 0.1).abs() < f64::EPSILON);
        assert!((settings.clamp_ratio(0.5) - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.json");

        let settings = LayoutSettings {
            min_panel_fraction: 0.15,
            default_split_ratio: 0.4,
            refit_debounce_ms: 75,
        };
        settings.save_to(&path).unwrap();

        let loaded = LayoutSettings::load_from(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn load_repairs_out_of_range_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.json");
        fs::write(
            &path,
            r#"{"min_panel_fraction": 0.8, "default_split_ratio": -1.0}"#,
        )
        .unwrap();

        let loaded = LayoutSettings::load_from(&path).unwrap();
        assert!((loaded.min_panel_fraction - 0.1).abs() < f64::EPSILON);
        assert!((loaded.default_split_ratio - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.json");
        fs::write(&path, "{}").unwrap();

        let loaded = LayoutSettings::load_from(&path).unwrap();
        assert_eq!(loaded, LayoutSettings::default());
    }

    #[test]
    fn load_rejects_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.json");
        fs::write(&path, "not json").unwrap();

        assert!(matches!(
            LayoutSettings::load_from(&path),
            Err(SettingsError::Parse(_))
        ));
    }
}
