use std::sync::Arc;

use service::{DbHandle, DynSuiviService, SeaOrmSuiviRepository, SuiviRepository, SuiviService};

#[derive(Clone)]
pub struct AppState {
    pub suivi: Arc<DynSuiviService>,
}

impl AppState {
    /// State backed by the database behind `handle`.
    pub fn from_handle(handle: Arc<DbHandle>) -> Self {
        Self::with_repository(Arc::new(SeaOrmSuiviRepository::new(handle)))
    }

    pub fn with_repository(repo: Arc<dyn SuiviRepository>) -> Self {
        Self { suivi: Arc::new(SuiviService::new(repo)) }
    }
}
