//! Configuration types and loading for the crm system.
//!
//! The main entry point is [`CrmConfig`]. Configuration is loaded with
//! [`load_config`], which layers built-in defaults, an optional YAML file and
//! `CRM_`-prefixed environment variables (`CRM_SERVER__BIND=0.0.0.0:8080`),
//! and saved with [`save_config`].

use std::net::SocketAddr;
use std::path::Path;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Prefix of environment variables that override file values.
pub const ENV_PREFIX: &str = "CRM_";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read or written.
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// The configuration file contained invalid YAML.
    #[error("failed to parse config file: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Merging the configuration layers failed.
    #[error("failed to load configuration: {0}")]
    Layered(#[from] Box<figment::Error>),

    /// A configuration value was invalid.
    #[error("invalid configuration value for key '{key}': {reason}")]
    InvalidValue {
        /// The configuration key that had an invalid value.
        key: String,
        /// A description of why the value is invalid.
        reason: String,
    },
}

/// A specialized `Result` type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// HTTP server section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Socket address the API listens on.
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:5000".to_string()
}

/// Record store section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path of the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> String {
    "crm.db".to_string()
}

/// API client section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the API, including the `/api` prefix.
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
        }
    }
}

fn default_api_url() -> String {
    "http://localhost:5000/api".to_string()
}

/// Logging section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_log_filter() -> String {
    "crm=info".to_string()
}

// ---------------------------------------------------------------------------
// Main config struct
// ---------------------------------------------------------------------------

/// The full crm configuration, corresponding to `crm.yaml`.
///
/// All fields use `serde` defaults so that a partially-specified YAML file
/// will be deserialized correctly with sensible default values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CrmConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub client: ClientConfig,

    #[serde(default)]
    pub log: LogConfig,
}

impl CrmConfig {
    /// Parses `server.bind` as a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        self.server
            .bind
            .parse()
            .map_err(|e| ConfigError::InvalidValue {
                key: "server.bind".into(),
                reason: format!("{e}"),
            })
    }

    /// Returns the API base URL without a trailing slash.
    pub fn api_url(&self) -> &str {
        self.client.api_url.trim_end_matches('/')
    }

    /// Checks values that serde cannot.
    pub fn validate(&self) -> Result<()> {
        self.bind_addr()?;
        let url = self.client.api_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                key: "client.api_url".into(),
                reason: format!("expected an http(s) URL, got {url:?}"),
            });
        }
        if self.database.path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "database.path".into(),
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Builds the layered provider: defaults, then the YAML file (if given and
/// present), then `CRM_*` environment variables.
pub fn figment(path: Option<&Path>) -> Figment {
    let mut figment = Figment::from(Serialized::defaults(CrmConfig::default()));
    if let Some(path) = path {
        figment = figment.merge(Yaml::file(path));
    }
    figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
}

/// Loads configuration, layering the optional YAML file and the environment
/// over the defaults.
///
/// A missing file is not an error and yields the defaults (plus environment).
///
/// # Errors
///
/// Returns [`ConfigError::Layered`] if a layer cannot be parsed, or
/// [`ConfigError::InvalidValue`] if the merged values fail validation.
pub fn load_config(path: Option<&Path>) -> Result<CrmConfig> {
    let config: CrmConfig = figment(path).extract().map_err(Box::new)?;
    config.validate()?;
    Ok(config)
}

/// Reads only the YAML file, without environment overrides.
///
/// An empty or missing file yields the defaults.
pub fn read_config_file(path: &Path) -> Result<CrmConfig> {
    if !path.exists() {
        return Ok(CrmConfig::default());
    }
    let content = std::fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(CrmConfig::default());
    }
    Ok(serde_yaml::from_str(&content)?)
}

/// Saves configuration as YAML, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`ConfigError::ReadError`] on I/O failure or [`ConfigError::ParseError`]
/// if serialization fails.
pub fn save_config(path: &Path, config: &CrmConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let yaml = serde_yaml::to_string(config)?;
    std::fs::write(path, yaml)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    #[test]
    fn test_default_config() {
        let cfg = CrmConfig::default();
        assert_eq!(cfg.server.bind, "127.0.0.1:5000");
        assert_eq!(cfg.database.path, "crm.db");
        assert_eq!(cfg.client.api_url, "http://localhost:5000/api");
        assert_eq!(cfg.log.filter, "crm=info");
        cfg.validate().unwrap();
    }

    #[test]
    fn test_load_missing_file_returns_default() {
        let path = PathBuf::from("/nonexistent/path/crm.yaml");
        let cfg = read_config_file(&path).unwrap();
        assert_eq!(cfg, CrmConfig::default());
    }

    #[test]
    fn test_deserialize_partial_yaml() {
        let yaml = "server:\n  bind: 0.0.0.0:8080\n";
        let cfg: CrmConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.server.bind, "0.0.0.0:8080");
        assert_eq!(cfg.database.path, "crm.db");
    }

    #[test]
    fn test_roundtrip_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("crm.yaml");

        let mut cfg = CrmConfig::default();
        cfg.database.path = "/var/lib/crm/data.db".to_string();
        cfg.client.api_url = "https://crm.example.com/api".to_string();

        save_config(&path, &cfg).unwrap();
        let loaded = read_config_file(&path).unwrap();
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn test_figment_layers_yaml_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crm.yaml");
        std::fs::write(&path, "database:\n  path: other.db\nlog:\n  filter: crm=debug\n").unwrap();

        let cfg: CrmConfig = figment(Some(&path)).extract().unwrap();
        assert_eq!(cfg.database.path, "other.db");
        assert_eq!(cfg.log.filter, "crm=debug");
        assert_eq!(cfg.server.bind, "127.0.0.1:5000");
    }

    #[test]
    fn test_invalid_bind_rejected() {
        let mut cfg = CrmConfig::default();
        cfg.server.bind = "not-an-address".to_string();
        let err = cfg.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "server.bind"));
    }

    #[test]
    fn test_invalid_api_url_rejected() {
        let mut cfg = CrmConfig::default();
        cfg.client.api_url = "localhost:5000".to_string();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_api_url_trims_trailing_slash() {
        let mut cfg = CrmConfig::default();
        cfg.client.api_url = "http://h/api/".to_string();
        assert_eq!(cfg.api_url(), "http://h/api");
    }
}
