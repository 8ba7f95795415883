use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use models::errors::ModelError;
use service::ServiceError;
use thiserror::Error;
use tracing::error;

/// JSON error body: a stable reason code plus a human-readable message.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self { status, code, message: message.into() }
    }

    /// Translate a service failure. Storage and internal details are logged
    /// with the operation and id, and replaced by a fixed message.
    pub fn from_service(op: &'static str, id: Option<i32>, err: ServiceError) -> Self {
        match err {
            ServiceError::Model(e @ ModelError::MissingFields(_)) => {
                Self::new(StatusCode::BAD_REQUEST, "missing_fields", e.to_string())
            }
            ServiceError::Model(e) => Self::new(StatusCode::BAD_REQUEST, "validation_failed", e.to_string()),
            ServiceError::NotFound(msg) => Self::new(StatusCode::NOT_FOUND, "not_found", msg),
            ServiceError::StorageNotReady(detail) => {
                error!(op, id = ?id, error = %detail, "database not ready");
                Self::new(StatusCode::SERVICE_UNAVAILABLE, "db_not_ready", "database is not ready")
            }
            ServiceError::StorageUnavailable(detail) => {
                error!(op, id = ?id, error = %detail, "database unavailable");
                Self::new(StatusCode::SERVICE_UNAVAILABLE, "db_unavailable", "database is unavailable")
            }
            ServiceError::Internal(detail) => {
                error!(op, id = ?id, error = %detail, "internal error");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", "internal server error")
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rej: JsonRejection) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "invalid_body", rej.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rej: PathRejection) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "invalid_id", rej.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rej: QueryRejection) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "invalid_query", rej.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({"error": self.code, "message": self.message});
        (self.status, Json(body)).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid bind address {0}")]
    BindAddr(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_details_do_not_leak() {
        let e = ApiError::from_service("list", None, ServiceError::StorageUnavailable("Access denied for user 'root'".into()));
        assert_eq!(e.status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(e.code, "db_unavailable");
        assert!(!e.message.contains("root"));
    }

    #[test]
    fn missing_fields_have_their_own_code() {
        let e = ApiError::from_service("create", None, ServiceError::Model(ModelError::MissingFields(vec!["km"])));
        assert_eq!(e.status, StatusCode::BAD_REQUEST);
        assert_eq!(e.code, "missing_fields");
        assert_eq!(e.message, "missing fields: km");
    }

    #[test]
    fn not_found_maps_to_404() {
        let e = ApiError::from_service("delete", Some(3), ServiceError::not_found("suivi", 3));
        assert_eq!(e.status, StatusCode::NOT_FOUND);
        assert_eq!(e.code, "not_found");
    }
}
