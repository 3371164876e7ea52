//! TOML persistence for [`Settings`].
//!
//! Settings live at `~/.config/tabshamer/settings.toml`. First access
//! writes the defaults so the file is always there to edit.

use std::path::PathBuf;

use crate::error::SettingsError;
use crate::settings::Settings;

use super::data_dir;

/// Storage for user settings.
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Open the store at the default location.
    ///
    /// # Errors
    /// Returns an error if the data directory cannot be resolved.
    pub fn open() -> Result<Self, SettingsError> {
        let path = data_dir()
            .map_err(|e| SettingsError::DataDir(e.to_string()))?
            .join("settings.toml");
        Ok(Self { path })
    }

    /// Create a store with a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load settings from disk, writing and returning defaults if the file
    /// does not exist yet.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be parsed, or if
    /// defaults cannot be written.
    pub fn load(&self) -> Result<Settings, SettingsError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => {
                toml::from_str(&content).map_err(|e| SettingsError::LoadFailed {
                    path: self.path.clone(),
                    message: e.to_string(),
                })
            }
            Err(_) => {
                let settings = Settings::default();
                self.save(&settings)?;
                Ok(settings)
            }
        }
    }

    /// Persist settings to disk. The record is overwritten wholesale.
    ///
    /// # Errors
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        let content = toml::to_string_pretty(settings).map_err(|e| SettingsError::SaveFailed {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&self.path, content).map_err(|e| SettingsError::SaveFailed {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }

    /// Path to the settings file.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}
