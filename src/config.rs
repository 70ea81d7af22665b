//! Configuration loading for runwatch.
//!
//! The only setting is the backend address. Resolution order, highest
//! precedence first:
//!
//! 1. `--server` command-line flag
//! 2. `RUNWATCH_SERVER` environment variable
//! 3. `server_url` in `~/.config/runwatch/config.toml`
//! 4. built-in default (`http://localhost:8080`, the backend's default
//!    listen address)

use crate::error::{Result, RunwatchError};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// The base config directory name under ~/.config/
const CONFIG_DIR_NAME: &str = "runwatch";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Environment variable overriding the configured server URL.
pub const SERVER_ENV_VAR: &str = "RUNWATCH_SERVER";

/// Address the backend serves on unless configured otherwise.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the pipeline backend.
    #[serde(default = "default_server_url")]
    pub server_url: String,
}

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
        }
    }
}

impl Config {
    /// Resolve the effective configuration, applying the precedence order
    /// documented at the top of this module.
    pub fn resolve(flag_override: Option<String>) -> Result<Self> {
        if let Some(url) = flag_override {
            return Ok(Self { server_url: url });
        }
        if let Ok(url) = env::var(SERVER_ENV_VAR) {
            if !url.is_empty() {
                return Ok(Self { server_url: url });
            }
        }
        match config_file_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific TOML file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| {
            RunwatchError::Config(format!("invalid config file {}: {}", path.display(), e))
        })
    }
}

/// Path of the user config file, if a config directory exists on this
/// platform.
pub fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join(CONFIG_FILE_NAME);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_default_config_points_at_localhost() {
        assert_eq!(Config::default().server_url, "http://localhost:8080");
    }

    #[test]
    fn test_load_from_reads_server_url() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, r#"server_url = "http://ci.internal:9090""#);
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.server_url, "http://ci.internal:9090");
    }

    #[test]
    fn test_load_from_empty_file_uses_default_url() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "");
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.server_url, DEFAULT_SERVER_URL);
    }

    #[test]
    fn test_load_from_invalid_toml_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "server_url = [not toml");
        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, RunwatchError::Config(_)));
    }

    #[test]
    fn test_env_var_overrides_file_but_not_flag() {
        env::set_var(SERVER_ENV_VAR, "http://env:5555");

        let from_env = Config::resolve(None).unwrap();
        assert_eq!(from_env.server_url, "http://env:5555");

        let from_flag = Config::resolve(Some("http://flag:1234".to_string())).unwrap();
        assert_eq!(from_flag.server_url, "http://flag:1234");

        // An empty value counts as unset and must not become the URL.
        env::set_var(SERVER_ENV_VAR, "");
        let fallback = Config::resolve(None).unwrap();
        assert_ne!(fallback.server_url, "");

        env::remove_var(SERVER_ENV_VAR);
    }

    #[test]
    fn test_flag_override_wins() {
        let config = Config::resolve(Some("http://flag:1234".to_string())).unwrap();
        assert_eq!(config.server_url, "http://flag:1234");
    }
}
