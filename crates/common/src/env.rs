//! Environment/runtime helpers
//!
//! Sanity checks on optional directories at startup.

use tracing::warn;

/// Whether the static frontend directory exists; warns when it does not.
pub async fn static_dir_available(frontend_dir: &str) -> bool {
    match tokio::fs::metadata(frontend_dir).await {
        Ok(meta) if meta.is_dir() => true,
        _ => {
            warn!(%frontend_dir, "frontend assets directory not found; only the JSON API is served");
            false
        }
    }
}
