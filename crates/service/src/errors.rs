use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
    #[error("not found: {0}")]
    NotFound(String),
    /// The pool could not be created.
    #[error("storage not ready: {0}")]
    StorageNotReady(String),
    /// The storage layer failed or rejected the statement.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn not_found(entity: &str, id: i32) -> Self { Self::NotFound(format!("{} {} not found", entity, id)) }

    /// Failures after which cached connection state must be discarded.
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::StorageNotReady(_) | Self::StorageUnavailable(_))
    }
}

impl From<sea_orm::DbErr> for ServiceError {
    fn from(err: sea_orm::DbErr) -> Self {
        use sea_orm::DbErr;
        match err {
            DbErr::ConnectionAcquire(_) | DbErr::Conn(_) | DbErr::Exec(_) | DbErr::Query(_) => {
                Self::StorageUnavailable(err.to_string())
            }
            other => Self::Internal(other.to_string()),
        }
    }
}
