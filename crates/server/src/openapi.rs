use utoipa::OpenApi;

use crate::dto::{Created, ErrorDoc, HealthDoc, SuiviInputDoc, SuiviRecord, Success, Totals};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::suivi::create,
        crate::routes::suivi::list,
        crate::routes::suivi::get_one,
        crate::routes::suivi::update,
        crate::routes::suivi::remove,
        crate::routes::suivi::totals,
    ),
    components(
        schemas(
            SuiviRecord,
            SuiviInputDoc,
            Created,
            Success,
            Totals,
            HealthDoc,
            ErrorDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "suivi")
    )
)]
pub struct ApiDoc;
