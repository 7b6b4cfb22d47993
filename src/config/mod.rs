//
//  workflow-api
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Settings come from an optional TOML file in the platform config directory,
//! then the environment variables the workflow runtime injects override them.
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/wfapi/config.toml`
//! - **macOS**: `~/Library/Application Support/wfapi/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\wfapi\config\config.toml`
//!
//! ## Example Configuration File
//!
//! ```toml
//! [api]
//! host = "https://workflow.example.com/api/1.0"
//! token = "eyJ0eXAiOiJKV1Qi..."
//! verify_tls = false
//!
//! [logging]
//! level = "warning"
//! collection = "Logging - Ellucian Workflow"
//! ```
//!
//! ## Environment Overrides
//!
//! | Variable | Setting |
//! |----------|---------|
//! | `API_HOST` | `api.host` |
//! | `API_TOKEN` | `api.token` |
//! | `API_VERIFY_TLS` | `api.verify_tls` |
//! | `LOG_LEVEL` | `logging.level` |
//! | `LOG_COLLECTION` | `logging.collection` |

mod file;

pub use file::*;

use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::logging::LogLevel;

/// Name of the collection log entries are written to unless configured otherwise.
pub const DEFAULT_LOG_COLLECTION: &str = "Logging - Ellucian Workflow";

/// Complete client configuration.
///
/// # Example
///
/// ```rust,no_run
/// use workflow_api::Config;
///
/// let config = Config::load()?;
/// println!("API host: {:?}", config.api.host);
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// API connection settings
    #[serde(default)]
    pub api: ApiSettings,

    /// Collection log sink settings
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Connection settings for the workflow-platform API.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ApiSettings {
    /// Base URI every endpoint is appended to
    #[serde(default)]
    pub host: Option<String>,

    /// Bearer token sent with every request
    #[serde(default)]
    pub token: Option<String>,

    /// Verify TLS certificates.
    ///
    /// Off by default because deployed platform instances commonly run with
    /// self-signed certificates. Clients log a warning while it is off.
    #[serde(default)]
    pub verify_tls: bool,
}

/// Settings for the collection-backed log sink.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingSettings {
    /// Least urgent level that is still written
    #[serde(default)]
    pub level: LogLevel,

    /// Name of the collection that receives log entries
    #[serde(default = "default_log_collection")]
    pub collection: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            collection: default_log_collection(),
        }
    }
}

fn default_log_collection() -> String {
    DEFAULT_LOG_COLLECTION.to_string()
}

impl Config {
    /// Loads the config file (if present) and applies environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Loads configuration from `path` without consulting the environment.
    ///
    /// A missing file yields the default configuration.
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        match read_config_file(path)? {
            Some(content) => Self::parse(&content)
                .with_context(|| format!("Failed to parse config file {}", path.display())),
            None => Ok(Self::default()),
        }
    }

    /// Parses a TOML configuration document.
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Builds configuration from the environment alone.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    /// Overrides settings with values found through `lookup`.
    ///
    /// `lookup` maps an environment variable name to its value. Empty values
    /// are ignored. An unrecognized `LOG_LEVEL` falls back to `error`.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(host) = get("API_HOST") {
            self.api.host = Some(host);
        }
        if let Some(token) = get("API_TOKEN") {
            self.api.token = Some(token);
        }
        if let Some(verify) = get("API_VERIFY_TLS") {
            self.api.verify_tls = matches!(
                verify.to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }
        if let Some(level) = get("LOG_LEVEL") {
            self.logging.level = LogLevel::from_setting(&level);
        }
        if let Some(collection) = get("LOG_COLLECTION") {
            self.logging.collection = collection;
        }
    }

    /// Returns the configured API host.
    ///
    /// # Errors
    ///
    /// Returns an error if no host is configured.
    pub fn api_host(&self) -> Result<&str> {
        self.api
            .host
            .as_deref()
            .context("API host is not configured. Set API_HOST or api.host in the config file.")
    }

    /// Returns the path of the config file in the platform config directory.
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", crate::APP_NAME).map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.api.host.is_none());
        assert!(!config.api.verify_tls);
        assert_eq!(config.logging.level, LogLevel::Error);
        assert_eq!(config.logging.collection, DEFAULT_LOG_COLLECTION);
        assert!(config.api_host().is_err());
    }

    #[test]
    fn test_parse_toml() {
        let config = Config::parse(
            r#"
            [api]
            host = "https://wf.example.com/api/1.0"
            token = "secret"
            verify_tls = true

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.api_host().unwrap(), "https://wf.example.com/api/1.0");
        assert_eq!(config.api.token.as_deref(), Some("secret"));
        assert!(config.api.verify_tls);
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.logging.collection, DEFAULT_LOG_COLLECTION);
    }

    #[test]
    fn test_env_overrides_file() {
        let mut config = Config::parse("[api]\nhost = \"https://file.example.com\"\n").unwrap();
        config.apply_env(env(&[
            ("API_HOST", "https://env.example.com"),
            ("API_TOKEN", "t0k3n"),
            ("LOG_LEVEL", "info"),
            ("LOG_COLLECTION", "Audit"),
            ("API_VERIFY_TLS", "TRUE"),
        ]));

        assert_eq!(config.api.host.as_deref(), Some("https://env.example.com"));
        assert_eq!(config.api.token.as_deref(), Some("t0k3n"));
        assert_eq!(config.logging.level, LogLevel::Info);
        assert_eq!(config.logging.collection, "Audit");
        assert!(config.api.verify_tls);
    }

    #[test]
    fn test_unknown_log_level_falls_back_to_error() {
        let mut config = Config::default();
        config.logging.level = LogLevel::Info;
        config.apply_env(env(&[("LOG_LEVEL", "verbose")]));
        assert_eq!(config.logging.level, LogLevel::Error);
    }

    #[test]
    fn test_empty_env_values_are_ignored() {
        let mut config = Config::parse("[api]\nhost = \"https://file.example.com\"\n").unwrap();
        config.apply_env(env(&[("API_HOST", "  ")]));
        assert_eq!(config.api.host.as_deref(), Some("https://file.example.com"));
    }

    #[test]
    fn test_load_from_file_and_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());

        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[logging]\nlevel = \"warning\"\ncollection = \"Ops log\"").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.logging.level, LogLevel::Warning);
        assert_eq!(config.logging.collection, "Ops log");
    }

    #[test]
    fn test_load_from_rejects_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api\nhost = ").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
