//! Configuration management for the catalog browser core.
//!
//! Settings come from an optional `config.toml` in the working directory,
//! overridden by the `CATALOG_API_URL` and `DATABASE_URL` environment
//! variables. A missing file means defaults; a malformed file is an error.

/// Database connection management
pub mod database;

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Application settings for the remote API and the local cache
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Base URL of the upstream catalog API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// `SeaORM` database URL for the local cache
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            database_url: default_database_url(),
        }
    }
}

fn default_api_base_url() -> String {
    "https://fakestoreapi.com".to_string()
}

fn default_database_url() -> String {
    "sqlite://data/catalog.sqlite?mode=rwc".to_string()
}

/// Parses a TOML document into an [`AppConfig`]
///
/// # Errors
/// Returns an error if the TOML syntax is invalid or a field has the
/// wrong type.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads configuration from a TOML file, falling back to defaults when the
/// file does not exist.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    debug!("Attempting to load configuration from: {:?}", path_ref);
    match std::fs::read_to_string(path_ref) {
        Ok(contents) => parse_config(&contents),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("No config file at {:?}; using defaults.", path_ref);
            Ok(AppConfig::default())
        }
        Err(e) => Err(Error::Config {
            message: format!("Failed to read config file {path_ref:?}: {e}"),
        }),
    }
}

/// Loads the application configuration from `./config.toml` and applies the
/// environment overrides `CATALOG_API_URL` and `DATABASE_URL`.
///
/// # Errors
/// Returns an error if the config file exists but is unreadable or
/// malformed.
pub fn load_app_configuration() -> Result<AppConfig> {
    let mut config = load_config("config.toml")?;
    if let Ok(url) = std::env::var("CATALOG_API_URL") {
        config.api_base_url = url;
    }
    if let Ok(url) = std::env::var("DATABASE_URL") {
        config.database_url = url;
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
            api_base_url = "https://store.example.com"
            database_url = "sqlite://cache/test.sqlite"
        "#;

        let config = parse_config(toml_str).unwrap();
        assert_eq!(config.api_base_url, "https://store.example.com");
        assert_eq!(config.database_url, "sqlite://cache/test.sqlite");
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.api_base_url, "https://fakestoreapi.com");
        assert_eq!(config.database_url, "sqlite://data/catalog.sqlite?mode=rwc");
    }

    #[test]
    fn test_malformed_config_is_a_config_error() {
        let result = parse_config("api_base_url = [not a string");
        assert!(matches!(result.unwrap_err(), Error::Config { message: _ }));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = load_config("definitely/not/a/real/config.toml").unwrap();
        assert_eq!(config.api_base_url, default_api_base_url());
        assert_eq!(config.database_url, default_database_url());
    }
}
