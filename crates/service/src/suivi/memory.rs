//! In-memory repository for tests and local demos.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use models::{suivi, DateRange, SuiviFields};
use tokio::sync::Mutex;

use super::repository::SuiviRepository;
use crate::errors::ServiceError;

#[derive(Default)]
struct Rows {
    last_id: i32,
    by_id: BTreeMap<i32, suivi::Model>,
}

/// Rows live in a map keyed by id; `set_offline(true)` makes every call
/// fail like an unreachable database.
#[derive(Default)]
pub struct InMemorySuiviRepository {
    rows: Mutex<Rows>,
    offline: AtomicBool,
    resets: AtomicUsize,
}

impl InMemorySuiviRepository {
    pub fn new() -> Self { Self::default() }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// How many times cached state was discarded.
    pub fn reset_count(&self) -> usize {
        self.resets.load(Ordering::SeqCst)
    }

    fn check_online(&self) -> Result<(), ServiceError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(ServiceError::StorageUnavailable("in-memory store is offline".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl SuiviRepository for InMemorySuiviRepository {
    async fn list(&self, range: &DateRange) -> Result<Vec<suivi::Model>, ServiceError> {
        self.check_online()?;
        let rows = self.rows.lock().await;
        let mut out: Vec<_> = rows.by_id.values().filter(|m| range.contains(m.date)).cloned().collect();
        // ids iterate ascending, so a stable sort keeps insertion order per date
        out.sort_by_key(|m| m.date);
        Ok(out)
    }

    async fn get(&self, id: i32) -> Result<Option<suivi::Model>, ServiceError> {
        self.check_online()?;
        Ok(self.rows.lock().await.by_id.get(&id).cloned())
    }

    async fn insert(&self, fields: &SuiviFields) -> Result<suivi::Model, ServiceError> {
        self.check_online()?;
        let mut rows = self.rows.lock().await;
        rows.last_id += 1;
        let model = fields.clone().into_model(rows.last_id);
        rows.by_id.insert(model.id, model.clone());
        Ok(model)
    }

    async fn update(&self, id: i32, fields: &SuiviFields) -> Result<Option<suivi::Model>, ServiceError> {
        self.check_online()?;
        let mut rows = self.rows.lock().await;
        match rows.by_id.get_mut(&id) {
            Some(slot) => {
                *slot = fields.clone().into_model(id);
                Ok(Some(slot.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        self.check_online()?;
        Ok(self.rows.lock().await.by_id.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<(), ServiceError> {
        self.check_online()
    }

    async fn reset(&self) {
        self.resets.fetch_add(1, Ordering::SeqCst);
    }
}
