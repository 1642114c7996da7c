//! Tutor configuration file.
//!
//! A tiny JSON document stored next to the progress file
//! (`~/.config/clitutor/config.json` on most platforms). Every field is
//! optional; a missing file yields defaults and an unreadable one is logged
//! and ignored. A couple of environment variables override file values so a
//! single run can be tweaked without editing the file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use crate::path_processing::{config_file_path, expand_tilde};

/// Environment variable allowing callers to override the config file path.
pub const CONFIG_PATH_ENV: &str = "CLITUTOR_CONFIG_PATH";
/// Environment variable overriding `execution_delay_ms`.
pub const EXECUTION_DELAY_ENV: &str = "CLITUTOR_EXECUTION_DELAY_MS";
/// Environment variable overriding `theme`.
pub const THEME_ENV: &str = "CLITUTOR_THEME";

/// Default filename for the JSON payload.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Simulated execution delay used when nothing else is configured.
pub const DEFAULT_EXECUTION_DELAY_MS: u64 = 1000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TutorConfig {
    /// Milliseconds the simulated execution waits before printing output.
    pub execution_delay_ms: u64,
    /// Theme identifier understood by the TUI (e.g., "dracula", "nord").
    pub theme: Option<String>,
    /// Explicit location of the progress file.
    pub progress_path: Option<String>,
}

impl Default for TutorConfig {
    fn default() -> Self {
        Self {
            execution_delay_ms: DEFAULT_EXECUTION_DELAY_MS,
            theme: None,
            progress_path: None,
        }
    }
}

impl TutorConfig {
    /// Load the config from the default location and apply environment overrides.
    pub fn load() -> Self {
        let mut config = Self::load_from(&default_config_path());
        config.apply_env_overrides();
        config
    }

    /// Load from an explicit path without environment overrides. Problems are
    /// logged and yield defaults.
    pub fn load_from(path: &Path) -> Self {
        match Self::read(path) {
            Ok(config) => config.unwrap_or_default(),
            Err(error) => {
                warn!(path = %path.display(), error = %error, "Failed to load config file; using defaults");
                Self::default()
            }
        }
    }

    /// Read the file at `path`. `Ok(None)` when it does not exist.
    pub fn read(path: &Path) -> Result<Option<Self>, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(error.into()),
        };
        Ok(Some(serde_json::from_str(&content)?))
    }

    pub fn execution_delay(&self) -> Duration {
        Duration::from_millis(self.execution_delay_ms)
    }

    /// Configured progress file location with `~` expanded.
    pub fn progress_path(&self) -> Option<PathBuf> {
        self.progress_path
            .as_deref()
            .filter(|path| !path.trim().is_empty())
            .map(expand_tilde)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(raw) = std::env::var(EXECUTION_DELAY_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(delay) => self.execution_delay_ms = delay,
                Err(_) => warn!(value = %raw, "Ignoring invalid {}", EXECUTION_DELAY_ENV),
            }
        }
        if let Ok(theme) = std::env::var(THEME_ENV)
            && !theme.trim().is_empty()
        {
            self.theme = Some(theme.trim().to_string());
        }
    }
}

/// Get the default path for the config file.
pub fn default_config_path() -> PathBuf {
    config_file_path(CONFIG_PATH_ENV, CONFIG_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let config = TutorConfig::load_from(&dir.path().join("absent.json"));
        assert_eq!(config, TutorConfig::default());
        assert_eq!(config.execution_delay(), Duration::from_millis(1000));
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"theme": "nord"}"#).unwrap();

        let config = TutorConfig::load_from(&path);
        assert_eq!(config.theme.as_deref(), Some("nord"));
        assert_eq!(config.execution_delay_ms, DEFAULT_EXECUTION_DELAY_MS);
    }

    #[test]
    fn invalid_json_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(TutorConfig::load_from(&path), TutorConfig::default());
    }

    #[test]
    fn read_reports_what_went_wrong() {
        let dir = tempdir().unwrap();
        assert!(TutorConfig::read(&dir.path().join("absent.json")).unwrap().is_none());

        let path = dir.path().join("config.json");
        fs::write(&path, "[1, 2]").unwrap();
        assert!(matches!(TutorConfig::read(&path), Err(ConfigError::Serialization(_))));
        assert!(matches!(TutorConfig::read(dir.path()), Err(ConfigError::Io(_))));
    }

    #[test]
    fn env_overrides_apply_on_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"execution_delay_ms": 500, "theme": "nord"}"#).unwrap();
        let path_str = path.to_string_lossy().to_string();

        temp_env::with_vars(
            [
                (CONFIG_PATH_ENV, Some(path_str.as_str())),
                (EXECUTION_DELAY_ENV, Some("0")),
                (THEME_ENV, Some("dracula")),
            ],
            || {
                let config = TutorConfig::load();
                assert_eq!(config.execution_delay_ms, 0);
                assert_eq!(config.theme.as_deref(), Some("dracula"));
            },
        );
    }

    #[test]
    fn blank_progress_path_is_ignored() {
        let config = TutorConfig {
            progress_path: Some("  ".into()),
            ..TutorConfig::default()
        };
        assert!(config.progress_path().is_none());
    }
}
