//! Application settings and paths.
//!
//! Settings are read from an XDG-compliant location and never written.

use crate::error::{ConfigError, ConfigResult};
use crate::scanner::ScanConfig;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Application directory paths following the XDG Base Directory Specification.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Configuration directory (~/.config/portprobe)
    pub config_dir: PathBuf,
}

impl Paths {
    /// Locate the XDG directories. Nothing is created on disk.
    pub fn discover() -> ConfigResult<Self> {
        let project = ProjectDirs::from("com", "portprobe", "portprobe")
            .ok_or(ConfigError::DirectoryNotFound)?;

        Ok(Self {
            config_dir: project.config_dir().to_path_buf(),
        })
    }

    /// Get the path to the settings file.
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }
}

/// Application-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Maximum probes in flight.
    pub concurrency: usize,
    /// Connect timeout in milliseconds.
    pub connect_timeout_ms: u64,
    /// Banner read timeout in milliseconds.
    pub read_timeout_ms: u64,
    /// Ranges whose `end - start` exceeds this ask for confirmation.
    pub confirm_threshold: u16,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            concurrency: 400,
            connect_timeout_ms: 1000,
            read_timeout_ms: 2000,
            confirm_threshold: 1000,
        }
    }
}

impl AppSettings {
    /// Load settings from the default location, falling back to defaults
    /// when no settings file exists.
    pub fn load() -> ConfigResult<Self> {
        let file = Paths::discover()?.settings_file();

        if !file.exists() {
            debug!(path = %file.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }

        Self::load_from(&file)
    }

    /// Load settings from a specific file.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let settings: Self =
            serde_json::from_str(&content).map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;
        settings.validate()?;

        debug!(path = %path.display(), ?settings, "loaded settings");
        Ok(settings)
    }

    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.concurrency == 0 {
            return Err(ConfigError::InvalidValue(
                "concurrency must be at least 1".to_string(),
            ));
        }
        if self.connect_timeout_ms == 0 || self.read_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue(
                "timeouts must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Engine configuration derived from these settings.
    pub fn scan_config(&self) -> ScanConfig {
        ScanConfig::default()
            .with_concurrency(self.concurrency)
            .with_connect_timeout(Duration::from_millis(self.connect_timeout_ms))
            .with_read_timeout(Duration::from_millis(self.read_timeout_ms))
    }
}
