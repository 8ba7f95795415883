//! Service layer for the tracking records.
//! - Validation and the duration rule run before any storage access.
//! - Storage sits behind `SuiviRepository`; the SeaORM implementation owns
//!   its pool through a `DbHandle`.

pub mod errors;
pub mod db_handle;
pub mod suivi;
#[cfg(test)]
pub mod test_support;

pub use db_handle::DbHandle;
pub use errors::ServiceError;
pub use suivi::{
    memory::InMemorySuiviRepository,
    repository::{SeaOrmSuiviRepository, SuiviRepository},
    service::{DynSuiviService, HealthReport, SuiviService, SuiviTotals},
};
