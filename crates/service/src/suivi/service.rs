use std::sync::Arc;

use models::{suivi, DateRange, SuiviDraft};
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::errors::ServiceError;
use crate::suivi::repository::SuiviRepository;

/// Sums shown under the session table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SuiviTotals {
    pub count: u64,
    pub duree: i64,
    pub km: i64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HealthReport {
    Ok,
    Degraded { reason: &'static str },
}

/// Tracking Record Service: validation, the duration rule, and the
/// reset-on-failure policy over a [`SuiviRepository`].
pub struct SuiviService<R: SuiviRepository + ?Sized> {
    repo: Arc<R>,
}

pub type DynSuiviService = SuiviService<dyn SuiviRepository>;

impl<R: SuiviRepository + ?Sized> SuiviService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// On a storage failure the repository drops its cached pool so the
    /// next call reconnects. Nothing is retried here.
    async fn settle<T>(&self, op: &'static str, res: Result<T, ServiceError>) -> Result<T, ServiceError> {
        if let Err(e) = &res {
            if e.is_storage() {
                warn!(op, error = %e, "storage failure; discarding connection state");
                self.repo.reset().await;
            }
        }
        res
    }

    #[instrument(skip(self, draft))]
    pub async fn create(&self, draft: &SuiviDraft) -> Result<i32, ServiceError> {
        let fields = draft.validate()?;
        let res = self.repo.insert(&fields).await;
        let created = self.settle("create", res).await?;
        info!(id = created.id, duree = created.duree, km = created.km, "suivi created");
        Ok(created.id)
    }

    #[instrument(skip(self))]
    pub async fn list(&self, range: DateRange) -> Result<Vec<suivi::Model>, ServiceError> {
        let res = self.repo.list(&range).await;
        self.settle("list", res).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<suivi::Model, ServiceError> {
        let res = self.repo.get(id).await;
        self.settle("get", res).await?.ok_or_else(|| ServiceError::not_found("suivi", id))
    }

    #[instrument(skip(self, draft))]
    pub async fn update(&self, id: i32, draft: &SuiviDraft) -> Result<suivi::Model, ServiceError> {
        let fields = draft.validate()?;
        let res = self.repo.update(id, &fields).await;
        let updated = self.settle("update", res).await?.ok_or_else(|| ServiceError::not_found("suivi", id))?;
        info!(id, duree = updated.duree, "suivi updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let res = self.repo.delete(id).await;
        if !self.settle("delete", res).await? {
            return Err(ServiceError::not_found("suivi", id));
        }
        info!(id, "suivi deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn totals(&self, range: DateRange) -> Result<SuiviTotals, ServiceError> {
        let rows = self.list(range).await?;
        Ok(rows.iter().fold(SuiviTotals::default(), |acc, m| SuiviTotals {
            count: acc.count + 1,
            duree: acc.duree + i64::from(m.duree),
            km: acc.km + i64::from(m.km),
        }))
    }

    /// Never fails: an unreachable store is reported as degraded.
    pub async fn health_check(&self) -> HealthReport {
        let res = self.repo.ping().await;
        match self.settle("health", res).await {
            Ok(()) => HealthReport::Ok,
            Err(ServiceError::StorageNotReady(_)) => HealthReport::Degraded { reason: "db_not_ready" },
            Err(_) => HealthReport::Degraded { reason: "db_unavailable" },
        }
    }
}
