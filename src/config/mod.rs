//
//  homebox-cli
//  config/mod.rs
//
//  Copyright (c) 2025 homebox-cli contributors. All rights reserved.
//

//! # Configuration Module
//!
//! Persistent settings for the CLI, stored as TOML in the platform config
//! directory:
//!
//! - **Linux**: `~/.config/hbx/config.toml`
//! - **macOS**: `~/Library/Application Support/hbx/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\hbx\config.toml`
//!
//! ## Example Configuration File
//!
//! ```toml
//! base_url = "https://homebox.example.com"
//! username = "demo@example.com"
//! timeout_secs = 30
//! download_dir = "/home/demo/Downloads/homebox"
//! ```
//!
//! Environment variables override the file: `HBX_BASE_URL`, `HBX_USERNAME`,
//! `HBX_SERVICE`, and `HBX_TIMEOUT` each shadow the matching field. The
//! password is never stored here; it lives in the OS keyring (see
//! [`crate::auth::KeyringStore`]).

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Error, Result};

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Persistent CLI settings.
///
/// All fields are optional in the file; missing keys fall back to defaults
/// so a hand-written partial config still loads.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// The Homebox server URL, with or without the `/api/v1` suffix.
    #[serde(default)]
    pub base_url: Option<String>,

    /// The account to log in as. The matching password is looked up in the
    /// OS keyring under this username.
    #[serde(default)]
    pub username: Option<String>,

    /// Keyring service name override. Useful when juggling credentials for
    /// several Homebox servers on one machine.
    #[serde(default)]
    pub service: Option<String>,

    /// Request timeout in seconds.
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Directory attachment downloads land in. Defaults to the platform
    /// Downloads directory.
    #[serde(default)]
    pub download_dir: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from the default path, then applies environment
    /// overrides. A missing file yields the defaults rather than an error.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        let mut config = if path.exists() {
            Self::load_from(&path)?
        } else {
            debug!(path = %path.display(), "no config file, using defaults");
            Self::default()
        };
        config.apply_env();
        Ok(config)
    }

    /// Loads configuration from an explicit path, without env overrides.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))
    }

    /// Writes the configuration to the default path, creating parent
    /// directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Writes the configuration to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// The platform-specific path of the configuration file.
    pub fn path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "hbx")
            .ok_or_else(|| Error::Config("cannot determine config directory".to_string()))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Shadows file values with `HBX_*` environment variables.
    fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("HBX_BASE_URL") {
            self.base_url = Some(url);
        }
        if let Ok(username) = std::env::var("HBX_USERNAME") {
            self.username = Some(username);
        }
        if let Ok(service) = std::env::var("HBX_SERVICE") {
            self.service = Some(service);
        }
        if let Ok(timeout) = std::env::var("HBX_TIMEOUT") {
            if let Ok(secs) = timeout.parse() {
                self.timeout_secs = Some(secs);
            }
        }
    }

    /// The effective request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    /// The effective keyring service name.
    pub fn service_name(&self) -> &str {
        self.service
            .as_deref()
            .unwrap_or(crate::auth::DEFAULT_SERVICE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = Config {
            base_url: Some("https://homebox.example.com".to_string()),
            username: Some("demo@example.com".to_string()),
            service: None,
            timeout_secs: Some(10),
            download_dir: Some(PathBuf::from("/tmp/dl")),
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "base_url = \"http://box.local:7745\"\n").unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.base_url.as_deref(), Some("http://box.local:7745"));
        assert!(loaded.username.is_none());
        assert_eq!(loaded.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "base_url = [broken").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/config.toml");

        Config::default().save_to(&path).unwrap();
        assert!(path.exists());
    }
}
