use std::sync::Arc;

use async_trait::async_trait;
use models::{suivi, DateRange, SuiviFields};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use crate::{db_handle::DbHandle, errors::ServiceError};

/// Persistence boundary for tracking records.
#[async_trait]
pub trait SuiviRepository: Send + Sync {
    /// Records within `range`, by date then id.
    async fn list(&self, range: &DateRange) -> Result<Vec<suivi::Model>, ServiceError>;
    async fn get(&self, id: i32) -> Result<Option<suivi::Model>, ServiceError>;
    async fn insert(&self, fields: &SuiviFields) -> Result<suivi::Model, ServiceError>;
    /// Overwrite every column of `id`; `None` when no such record exists.
    async fn update(&self, id: i32, fields: &SuiviFields) -> Result<Option<suivi::Model>, ServiceError>;
    /// Returns true if a record was deleted.
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
    /// Trivial liveness probe.
    async fn ping(&self) -> Result<(), ServiceError>;
    /// Discard cached connection state after a storage failure.
    async fn reset(&self) {}
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmSuiviRepository {
    handle: Arc<DbHandle>,
}

impl SeaOrmSuiviRepository {
    pub fn new(handle: Arc<DbHandle>) -> Self { Self { handle } }

    async fn db(&self) -> Result<DatabaseConnection, ServiceError> {
        self.handle
            .acquire()
            .await
            .map_err(|e| ServiceError::StorageNotReady(e.to_string()))
    }
}

#[async_trait]
impl SuiviRepository for SeaOrmSuiviRepository {
    async fn list(&self, range: &DateRange) -> Result<Vec<suivi::Model>, ServiceError> {
        let db = self.db().await?;
        let mut select = suivi::Entity::find();
        if let Some(d) = range.debut { select = select.filter(suivi::Column::Date.gte(d)); }
        if let Some(f) = range.fin { select = select.filter(suivi::Column::Date.lte(f)); }
        let rows = select
            .order_by_asc(suivi::Column::Date)
            .order_by_asc(suivi::Column::Id)
            .all(&db)
            .await?;
        Ok(rows)
    }

    async fn get(&self, id: i32) -> Result<Option<suivi::Model>, ServiceError> {
        let db = self.db().await?;
        Ok(suivi::Entity::find_by_id(id).one(&db).await?)
    }

    async fn insert(&self, fields: &SuiviFields) -> Result<suivi::Model, ServiceError> {
        let db = self.db().await?;
        Ok(fields.to_new_active_model().insert(&db).await?)
    }

    async fn update(&self, id: i32, fields: &SuiviFields) -> Result<Option<suivi::Model>, ServiceError> {
        let db = self.db().await?;
        // single UPDATE; sqlx-mysql reports matched rows, so an unchanged row still counts
        let res = suivi::Entity::update_many()
            .set(fields.to_new_active_model())
            .filter(suivi::Column::Id.eq(id))
            .exec(&db)
            .await?;
        if res.rows_affected == 0 {
            return Ok(None);
        }
        Ok(Some(fields.clone().into_model(id)))
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        let db = self.db().await?;
        let res = suivi::Entity::delete_by_id(id).exec(&db).await?;
        Ok(res.rows_affected > 0)
    }

    async fn ping(&self) -> Result<(), ServiceError> {
        let db = self.db().await?;
        Ok(db.ping().await?)
    }

    async fn reset(&self) {
        self.handle.reset().await;
    }
}
