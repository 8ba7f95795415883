//! Lazily created, explicitly owned connection pool.
//!
//! The pool is built on first use, migrated, and discarded with
//! [`DbHandle::reset`] after a storage failure; the next caller builds a
//! fresh one.

use configs::DatabaseSettings;
use sea_orm::{DatabaseConnection, DbErr};
use tokio::sync::RwLock;
use tracing::{info, warn};

pub struct DbHandle {
    settings: DatabaseSettings,
    pool: RwLock<Option<DatabaseConnection>>,
}

impl DbHandle {
    pub fn new(settings: DatabaseSettings) -> Self {
        Self { settings, pool: RwLock::new(None) }
    }

    pub fn settings(&self) -> &DatabaseSettings {
        &self.settings
    }

    /// Current pool, creating and migrating it if none is cached.
    pub async fn acquire(&self) -> Result<DatabaseConnection, DbErr> {
        if let Some(db) = self.pool.read().await.as_ref() {
            return Ok(db.clone());
        }
        let mut slot = self.pool.write().await;
        // another task may have connected while we waited for the write lock
        if let Some(db) = slot.as_ref() {
            return Ok(db.clone());
        }
        let db = models::db::connect(&self.settings).await?;
        // a pool is only cached once the schema is in place
        if let Err(e) = models::db::migrate(&db).await {
            if let Err(close_err) = db.close().await {
                warn!(error = %close_err, "closing unmigrated pool failed");
            }
            return Err(e);
        }
        info!(max_connections = self.settings.max_connections, "connection pool created");
        *slot = Some(db.clone());
        Ok(db)
    }

    /// Drop the cached pool and close its connections.
    pub async fn reset(&self) {
        let taken = self.pool.write().await.take();
        if let Some(db) = taken {
            if let Err(e) = db.close().await {
                warn!(error = %e, "closing discarded pool failed");
            }
            info!("connection pool discarded");
        }
    }

    pub async fn is_connected(&self) -> bool {
        self.pool.read().await.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{memory_settings, sqlite_in_missing_dir, unreachable_settings};
    use sea_orm::{EntityTrait, PaginatorTrait};

    #[tokio::test]
    async fn pool_is_created_lazily_and_reused() -> anyhow::Result<()> {
        let handle = DbHandle::new(memory_settings());
        assert!(!handle.is_connected().await);
        let a = handle.acquire().await?;
        assert!(handle.is_connected().await);
        let b = handle.acquire().await?;
        a.ping().await?;
        b.ping().await?;
        Ok(())
    }

    #[tokio::test]
    async fn reset_discards_and_next_acquire_recreates() -> anyhow::Result<()> {
        let handle = DbHandle::new(memory_settings());
        handle.acquire().await?;
        handle.reset().await;
        assert!(!handle.is_connected().await);
        handle.acquire().await?.ping().await?;
        assert!(handle.is_connected().await);
        Ok(())
    }

    #[tokio::test]
    async fn fresh_pool_gets_the_schema() -> anyhow::Result<()> {
        let handle = DbHandle::new(memory_settings());
        let db = handle.acquire().await?;
        assert_eq!(models::suivi::Entity::find().count(&db).await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn database_appearing_later_is_migrated_on_acquire() -> anyhow::Result<()> {
        let (dir, settings) = sqlite_in_missing_dir("late");
        let handle = DbHandle::new(settings);
        assert!(handle.acquire().await.is_err());
        assert!(!handle.is_connected().await);

        std::fs::create_dir_all(&dir)?;
        let db = handle.acquire().await?;
        assert_eq!(models::suivi::Entity::find().count(&db).await?, 0);
        handle.reset().await;
        std::fs::remove_dir_all(&dir)?;
        Ok(())
    }

    #[tokio::test]
    async fn unreachable_server_leaves_nothing_cached() {
        let handle = DbHandle::new(unreachable_settings());
        assert!(handle.acquire().await.is_err());
        assert!(!handle.is_connected().await);
    }
}
