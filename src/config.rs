//! Configuration file handling
//!
//! Settings live in `config.toml` under the XDG config directory
//! (`~/.config/docli/` on Linux). Every field is optional; a missing default
//! file yields `Config::default()`.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::{DropletDefaults, Endpoints, DEFAULT_BASE_URL};
use crate::cache::{CacheManager, DEFAULT_TTL_SECONDS};

/// Environment variable consulted for the API token
pub const TOKEN_ENV: &str = "DIGITALOCEAN_TOKEN";

/// Errors that can occur while loading or using configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Neither the config file nor the environment supplied a token
    #[error("No API token configured; set DIGITALOCEAN_TOKEN or `token` in the config file")]
    MissingToken,

    /// No cache directory was configured and none could be derived
    #[error("Could not determine a cache directory")]
    NoCacheDir,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API bearer token
    pub token: Option<String>,
    /// Versioned API base URL
    pub api_base_url: String,
    /// Lifetime of cached responses
    pub cache_ttl_seconds: u64,
    /// Override for the XDG cache directory
    pub cache_dir: Option<PathBuf>,
    /// Defaults merged into every droplet creation request
    pub droplet_defaults: DropletDefaults,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            token: None,
            api_base_url: DEFAULT_BASE_URL.to_string(),
            cache_ttl_seconds: DEFAULT_TTL_SECONDS,
            cache_dir: None,
            droplet_defaults: DropletDefaults::default(),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("api_base_url", &self.api_base_url)
            .field("cache_ttl_seconds", &self.cache_ttl_seconds)
            .field("cache_dir", &self.cache_dir)
            .field("droplet_defaults", &self.droplet_defaults)
            .finish()
    }
}

impl Config {
    /// Load configuration from `path`, or from the default location
    ///
    /// An explicit path must exist. The default path is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Default configuration file path (`<XDG config>/docli/config.toml`)
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "docli").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Replaces the file token with `token` when one is given and non-empty
    pub fn with_token_override(mut self, token: Option<String>) -> Self {
        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            self.token = Some(token);
        }
        self
    }

    pub fn token(&self) -> Result<&str, ConfigError> {
        self.token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::MissingToken)
    }

    pub fn endpoints(&self) -> Endpoints {
        Endpoints::with_base_url(self.api_base_url.as_str())
    }

    /// Builds the on-disk response cache from `cache_dir` and `cache_ttl_seconds`
    pub fn cache_manager(&self) -> Result<CacheManager, ConfigError> {
        let manager = match &self.cache_dir {
            Some(dir) => CacheManager::with_dir(dir.clone()),
            None => CacheManager::new().ok_or(ConfigError::NoCacheDir)?,
        };
        Ok(manager.with_ttl(Duration::from_secs(self.cache_ttl_seconds)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(contents: &str) -> (TempDir, PathBuf) {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let path = dir.path().join("config.toml");
        fs::write(&path, contents).expect("Failed to write config");
        (dir, path)
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.token.is_none());
        assert_eq!(config.api_base_url, DEFAULT_BASE_URL);
        assert_eq!(config.cache_ttl_seconds, DEFAULT_TTL_SECONDS);
        assert_eq!(config.droplet_defaults, DropletDefaults::default());
    }

    #[test]
    fn test_load_full_file() {
        let (_dir, path) = write_config(
            r#"
token = "secret"
api_base_url = "http://localhost:9000/v2"
cache_ttl_seconds = 60

[droplet_defaults]
region = "nyc3"
size = "s-1vcpu-1gb"
image = "ubuntu-22-04-x64"
tags = ["web"]
ssh_keys = ["1234"]
"#,
        );

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.token().unwrap(), "secret");
        assert_eq!(config.endpoints().droplets(), "http://localhost:9000/v2/droplets");
        assert_eq!(config.cache_ttl_seconds, 60);
        assert_eq!(config.droplet_defaults.region.as_deref(), Some("nyc3"));
        assert_eq!(config.droplet_defaults.ssh_keys, vec!["1234".to_string()]);
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let (_dir, path) = write_config("token = \"abc\"\n");
        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.api_base_url, DEFAULT_BASE_URL);
        assert_eq!(config.cache_ttl_seconds, DEFAULT_TTL_SECONDS);
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let dir = TempDir::new().unwrap();
        let err = Config::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_load_invalid_toml_fails() {
        let (_dir, path) = write_config("token = [unclosed");
        let err = Config::load(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_token_override_wins_over_file() {
        let config = Config {
            token: Some("from-file".to_string()),
            ..Default::default()
        };
        let config = config.with_token_override(Some("from-env".to_string()));
        assert_eq!(config.token().unwrap(), "from-env");
    }

    #[test]
    fn test_empty_token_override_is_ignored() {
        let config = Config {
            token: Some("from-file".to_string()),
            ..Default::default()
        };
        let config = config.with_token_override(Some("  ".to_string()));
        assert_eq!(config.token().unwrap(), "from-file");
    }

    #[test]
    fn test_missing_token() {
        let err = Config::default().token().unwrap_err();
        assert!(matches!(err, ConfigError::MissingToken));
        assert!(err.to_string().contains(TOKEN_ENV));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = Config {
            token: Some("super-secret".to_string()),
            ..Default::default()
        };
        let printed = format!("{config:?}");
        assert!(!printed.contains("super-secret"));
        assert!(printed.contains("<redacted>"));
    }

    #[test]
    fn test_cache_manager_uses_configured_dir() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            cache_dir: Some(dir.path().to_path_buf()),
            ..Default::default()
        };
        let manager = config.cache_manager().unwrap();
        assert_eq!(manager.cache_dir(), dir.path());
    }
}
