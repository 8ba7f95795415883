#![cfg(test)]
use std::path::PathBuf;
use std::sync::Arc;

use configs::DatabaseSettings;

use crate::db_handle::DbHandle;

/// Private in-memory SQLite database. One connection, so every statement
/// sees the same database.
pub fn memory_settings() -> DatabaseSettings {
    DatabaseSettings {
        url: Some("sqlite::memory:".into()),
        max_connections: 1,
        min_connections: 1,
        ..Default::default()
    }
}

/// Nothing listens on port 1, so connecting fails fast.
pub fn unreachable_settings() -> DatabaseSettings {
    DatabaseSettings {
        url: Some("mysql://nobody@127.0.0.1:1/suivi".into()),
        connect_timeout_secs: 1,
        acquire_timeout_secs: 1,
        ..Default::default()
    }
}

/// SQLite file inside a directory that does not exist yet, so connecting
/// fails until the caller creates `dir`.
pub fn sqlite_in_missing_dir(tag: &str) -> (PathBuf, DatabaseSettings) {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    let dir = std::env::temp_dir().join(format!("suivi-{tag}-{}-{nanos}", std::process::id()));
    let url = format!("sqlite://{}?mode=rwc", dir.join("suivi.db").display());
    let settings = DatabaseSettings {
        url: Some(url),
        max_connections: 1,
        min_connections: 1,
        connect_timeout_secs: 1,
        acquire_timeout_secs: 1,
        ..Default::default()
    };
    (dir, settings)
}

/// Handle over a fresh in-memory database; acquiring it applies the schema.
pub async fn migrated_handle() -> Result<Arc<DbHandle>, anyhow::Error> {
    let handle = Arc::new(DbHandle::new(memory_settings()));
    handle.acquire().await?;
    Ok(handle)
}
