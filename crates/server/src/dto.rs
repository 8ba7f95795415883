//! Wire shapes of the JSON API.

use models::duration::{format_date, format_time};
use models::suivi;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// A stored session as returned by `/donnees`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SuiviRecord {
    pub id: i32,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`
    pub heure_debut: String,
    /// `HH:MM`
    pub heure_fin: String,
    /// Minutes, derived from the time span.
    pub duree: i32,
    pub km: i32,
}

impl From<suivi::Model> for SuiviRecord {
    fn from(m: suivi::Model) -> Self {
        Self {
            id: m.id,
            date: format_date(m.date),
            heure_debut: format_time(m.heure_debut),
            heure_fin: format_time(m.heure_fin),
            duree: m.duree,
            km: m.km,
        }
    }
}

/// Request body of create/update, for the OpenAPI document only.
#[derive(ToSchema)]
pub struct SuiviInputDoc {
    pub date: String,
    pub heure_debut: String,
    pub heure_fin: String,
    pub km: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Created { pub id: i32 }

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Success { pub success: bool }

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct Totals {
    pub count: u64,
    pub duree: i64,
    pub km: i64,
}

impl From<service::SuiviTotals> for Totals {
    fn from(t: service::SuiviTotals) -> Self {
        Self { count: t.count, duree: t.duree, km: t.km }
    }
}

/// Optional inclusive date bounds.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RangeQuery {
    /// First date included, `YYYY-MM-DD`.
    pub debut: Option<String>,
    /// Last date included, `YYYY-MM-DD`.
    pub fin: Option<String>,
}

#[derive(ToSchema)]
pub struct HealthDoc {
    pub status: String,
    pub error: Option<String>,
}

#[derive(ToSchema)]
pub struct ErrorDoc {
    pub error: String,
    pub message: String,
}
