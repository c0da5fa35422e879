//! Persisted user settings
//!
//! A small JSON file in the platform configuration directory holding the
//! recorder's address and the preferred recording quality. A missing or
//! unreadable file is never an error: the defaults apply.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use dvr_api::models::DEFAULT_QUALITY;

const APP_DIR: &str = "dvr-remote";
const FILE_NAME: &str = "settings.json";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("No configuration directory on this platform")]
    NoConfigDir,

    #[error("Failed to write settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode settings: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Recorder host or IP address
    #[serde(default)]
    pub device_host: Option<String>,

    /// Recording quality sent with new reservations
    #[serde(default = "default_quality")]
    pub quality: u32,
}

fn default_quality() -> u32 {
    DEFAULT_QUALITY
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            device_host: None,
            quality: DEFAULT_QUALITY,
        }
    }
}

impl Settings {
    /// `<config dir>/dvr-remote/settings.json`, when the platform has one
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(FILE_NAME))
    }

    /// Load from the default location
    pub fn load() -> Self {
        Self::default_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    pub fn load_from(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "no settings file, using defaults");
                return Self::default();
            }
        };

        serde_json::from_str(&content).unwrap_or_else(|e| {
            debug!(path = %path.display(), error = %e, "unreadable settings file, using defaults");
            Self::default()
        })
    }

    /// Save to the default location, returning the path written
    pub fn save(&self) -> Result<PathBuf, SettingsError> {
        let path = Self::default_path().ok_or(SettingsError::NoConfigDir)?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn with_device_host(mut self, host: impl Into<String>) -> Self {
        self.device_host = Some(host.into());
        self
    }

    pub fn with_quality(mut self, quality: u32) -> Self {
        self.quality = quality;
        self
    }
}
