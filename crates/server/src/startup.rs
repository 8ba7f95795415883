use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::AppConfig;
use service::DbHandle;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    let raw = format!("{}:{}", cfg.server.host, cfg.server.port);
    raw.parse().map_err(|_| StartupError::BindAddr(raw))
}

/// Make sure the database and the `suivi` table exist.
///
/// Failures are logged and leave the handle without a pool; the server
/// keeps running and reports itself degraded until a later acquire
/// connects and migrates.
pub async fn provision(handle: &DbHandle) -> bool {
    let settings = handle.settings();
    if settings.provision_database_on_startup {
        if let Err(e) = models::db::create_database_if_missing(settings).await {
            warn!(database = %settings.database, error = %e, "could not create database");
        }
    }
    match handle.acquire().await {
        Ok(_) => true,
        Err(e) => {
            error!(error = %e, "database not ready at startup");
            false
        }
    }
}

/// Router with static assets when the configured directory exists.
pub async fn build_app(cfg: &AppConfig, state: AppState) -> Router {
    let static_dir = match cfg.server.static_dir.as_deref() {
        Some(dir) if common::env::static_dir_available(dir).await => Some(dir),
        _ => None,
    };
    routes::build_router(state, build_cors(), static_dir)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "ctrl-c handler unavailable");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

/// Provision storage, then serve until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let handle = Arc::new(DbHandle::new(cfg.database.clone()));
    if provision(&handle).await {
        info!("database ready");
    }

    let app = build_app(&cfg, AppState::from_handle(Arc::clone(&handle))).await;

    let addr = bind_addr(&cfg)?;
    let listener = TcpListener::bind(addr).await.map_err(StartupError::from)?;
    info!(%addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    handle.reset().await;
    info!("server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use configs::DatabaseSettings;

    #[test]
    fn bind_addr_rejects_garbage_host() {
        let mut cfg = AppConfig::default();
        cfg.server.host = "not a host".into();
        assert!(matches!(bind_addr(&cfg), Err(StartupError::BindAddr(_))));
        cfg.server.host = "127.0.0.1".into();
        cfg.server.port = 9000;
        assert_eq!(bind_addr(&cfg).unwrap().port(), 9000);
    }

    #[tokio::test]
    async fn provision_creates_table_on_fresh_database() {
        let handle = DbHandle::new(DatabaseSettings {
            url: Some("sqlite::memory:".into()),
            max_connections: 1,
            min_connections: 1,
            ..Default::default()
        });
        assert!(provision(&handle).await);
        assert!(handle.is_connected().await);
        // second run finds the table already there
        assert!(provision(&handle).await);
    }

    #[tokio::test]
    async fn health_stays_degraded_until_schema_exists() -> anyhow::Result<()> {
        let dir = std::env::temp_dir().join(format!("suivi-startup-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        let handle = Arc::new(DbHandle::new(DatabaseSettings {
            url: Some(format!("sqlite://{}?mode=rwc", dir.join("suivi.db").display())),
            max_connections: 1,
            min_connections: 1,
            connect_timeout_secs: 1,
            acquire_timeout_secs: 1,
            ..Default::default()
        }));
        assert!(!provision(&handle).await);

        let state = AppState::from_handle(Arc::clone(&handle));
        assert_eq!(
            state.suivi.health_check().await,
            service::HealthReport::Degraded { reason: "db_not_ready" }
        );

        std::fs::create_dir_all(&dir)?;
        assert_eq!(state.suivi.health_check().await, service::HealthReport::Ok);
        assert!(state.suivi.list(models::DateRange::all()).await?.is_empty());
        handle.reset().await;
        std::fs::remove_dir_all(&dir)?;
        Ok(())
    }

    #[tokio::test]
    async fn provision_failure_is_not_fatal() {
        let handle = DbHandle::new(DatabaseSettings {
            url: Some("mysql://nobody@127.0.0.1:1/suivi".into()),
            connect_timeout_secs: 1,
            acquire_timeout_secs: 1,
            ..Default::default()
        });
        assert!(!provision(&handle).await);
        assert!(!handle.is_connected().await);
    }
}
