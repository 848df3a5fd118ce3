//! Database connection management for the local cache.
//!
//! Resolves the configured `SeaORM` URL, prepares the filesystem location
//! for file-backed `SQLite` databases, and opens the connection. Table
//! creation lives with the store, next to the entity it serves.

use crate::{config::AppConfig, errors::Result};
use sea_orm::{Database, DatabaseConnection};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Opens the cache database configured in `config`.
///
/// For file-backed `SQLite` URLs the parent directory is created first, so
/// a fresh installation can connect without manual setup.
///
/// # Errors
/// Returns an error if the directory cannot be created or the connection
/// fails.
pub async fn create_connection(config: &AppConfig) -> Result<DatabaseConnection> {
    ensure_sqlite_parent_dir_exists(&config.database_url)?;

    Database::connect(&config.database_url)
        .await
        .map_err(Into::into)
}

fn ensure_sqlite_parent_dir_exists(database_url: &str) -> Result<()> {
    let Some(path) = sqlite_path(database_url) else {
        return Ok(());
    };

    let Some(parent) = path.parent() else {
        return Ok(());
    };

    if !parent.as_os_str().is_empty() && !parent.exists() {
        debug!("Creating database directory {:?}.", parent);
        std::fs::create_dir_all(parent)?;
    }

    Ok(())
}

/// Extracts the filesystem path from a `SQLite` URL, `None` for in-memory
/// databases and non-`SQLite` URLs.
fn sqlite_path(database_url: &str) -> Option<PathBuf> {
    if database_url == "sqlite::memory:" || !database_url.starts_with("sqlite:") {
        return None;
    }

    let path = database_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:")
        .split('?')
        .next()
        .unwrap_or_default();

    if path.is_empty() || path.starts_with(':') {
        return None;
    }

    Some(Path::new(path).to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store;

    #[tokio::test]
    async fn test_create_connection_in_memory() -> Result<()> {
        let config = AppConfig {
            database_url: "sqlite::memory:".to_string(),
            ..AppConfig::default()
        };

        let db = create_connection(&config).await?;
        store::ensure_schema(&db).await?;
        Ok(())
    }

    #[test]
    fn test_sqlite_path_extraction() {
        assert_eq!(
            sqlite_path("sqlite://data/catalog.sqlite?mode=rwc"),
            Some(PathBuf::from("data/catalog.sqlite"))
        );
        assert_eq!(sqlite_path("sqlite::memory:"), None);
        assert_eq!(sqlite_path("sqlite://:memory:"), None);
        assert_eq!(sqlite_path("postgres://localhost/catalog"), None);
    }
}
