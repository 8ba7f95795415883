use std::time::Duration;

use configs::DatabaseSettings;
use migration::MigratorTrait;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};
use tracing::info;

/// Pool options derived from the settings.
pub fn connect_options(settings: &DatabaseSettings) -> ConnectOptions {
    let mut opt = ConnectOptions::new(settings.connection_url());
    opt.max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .connect_timeout(Duration::from_secs(settings.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(settings.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(settings.idle_timeout_secs))
        .sqlx_logging(settings.sqlx_logging);
    opt
}

/// Open a connection pool.
pub async fn connect(settings: &DatabaseSettings) -> Result<DatabaseConnection, DbErr> {
    Database::connect(connect_options(settings)).await
}

/// `CREATE DATABASE IF NOT EXISTS` on the MySQL server.
///
/// Only applies when the URL is assembled from host/user/database; an
/// explicit `url` is expected to point at an existing database.
pub async fn create_database_if_missing(settings: &DatabaseSettings) -> Result<bool, DbErr> {
    let Some(server_url) = settings.server_url() else {
        return Ok(false);
    };
    let mut opt = ConnectOptions::new(server_url);
    opt.max_connections(1)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(settings.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(settings.acquire_timeout_secs))
        .sqlx_logging(settings.sqlx_logging);
    let server = Database::connect(opt).await?;
    let sql = format!("CREATE DATABASE IF NOT EXISTS {}", quote_ident(&settings.database));
    let backend = server.get_database_backend();
    let res = server.execute(Statement::from_string(backend, sql)).await;
    server.close().await?;
    res?;
    info!(database = %settings.database, "database ensured");
    Ok(true)
}

/// Apply pending migrations (creates the `suivi` table when absent).
pub async fn migrate(db: &DatabaseConnection) -> Result<(), DbErr> {
    migration::Migrator::up(db, None).await?;
    info!("schema 'suivi' verified");
    Ok(())
}

fn quote_ident(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{EntityTrait, PaginatorTrait};

    fn memory() -> DatabaseSettings {
        DatabaseSettings {
            url: Some("sqlite::memory:".into()),
            max_connections: 1,
            min_connections: 1,
            ..Default::default()
        }
    }

    #[test]
    fn identifiers_are_backtick_quoted() {
        assert_eq!(quote_ident("suivi"), "`suivi`");
        assert_eq!(quote_ident("we`ird"), "`we``ird`");
    }

    #[tokio::test]
    async fn explicit_url_skips_database_creation() -> anyhow::Result<()> {
        assert!(!create_database_if_missing(&memory()).await?);
        Ok(())
    }

    #[tokio::test]
    async fn migrate_creates_empty_table_and_is_repeatable() -> anyhow::Result<()> {
        let db = connect(&memory()).await?;
        migrate(&db).await?;
        migrate(&db).await?;
        let count = crate::suivi::Entity::find().count(&db).await?;
        assert_eq!(count, 0);
        Ok(())
    }
}
