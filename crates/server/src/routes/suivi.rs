use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use models::{DateRange, SuiviDraft};

use crate::dto::{Created, RangeQuery, SuiviRecord, Success, Totals};
use crate::errors::ApiError;
use crate::state::AppState;

fn range_of(query: Result<Query<RangeQuery>, QueryRejection>) -> Result<DateRange, ApiError> {
    let Query(q) = query?;
    DateRange::parse(q.debut.as_deref(), q.fin.as_deref())
        .map_err(|e| ApiError::from_service("range", None, e.into()))
}

#[utoipa::path(
    post, path = "/ajouter", tag = "suivi",
    request_body = crate::dto::SuiviInputDoc,
    responses(
        (status = 200, description = "Created", body = Created),
        (status = 400, description = "Missing or invalid fields", body = crate::dto::ErrorDoc),
        (status = 503, description = "Database unavailable", body = crate::dto::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<SuiviDraft>, JsonRejection>,
) -> Result<Json<Created>, ApiError> {
    let Json(draft) = payload?;
    let id = state
        .suivi
        .create(&draft)
        .await
        .map_err(|e| ApiError::from_service("create", None, e))?;
    Ok(Json(Created { id }))
}

#[utoipa::path(
    get, path = "/donnees", tag = "suivi",
    params(RangeQuery),
    responses(
        (status = 200, description = "Records ordered by date", body = [SuiviRecord]),
        (status = 400, description = "Invalid range", body = crate::dto::ErrorDoc),
        (status = 503, description = "Database unavailable", body = crate::dto::ErrorDoc)
    )
)]
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<RangeQuery>, QueryRejection>,
) -> Result<Json<Vec<SuiviRecord>>, ApiError> {
    let range = range_of(query)?;
    let rows = state
        .suivi
        .list(range)
        .await
        .map_err(|e| ApiError::from_service("list", None, e))?;
    Ok(Json(rows.into_iter().map(SuiviRecord::from).collect()))
}

#[utoipa::path(
    get, path = "/donnees/{id}", tag = "suivi",
    params(("id" = i32, Path, description = "Record id")),
    responses(
        (status = 200, description = "OK", body = SuiviRecord),
        (status = 404, description = "Not Found", body = crate::dto::ErrorDoc)
    )
)]
pub async fn get_one(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<SuiviRecord>, ApiError> {
    let Path(id) = id?;
    let rec = state
        .suivi
        .get(id)
        .await
        .map_err(|e| ApiError::from_service("get", Some(id), e))?;
    Ok(Json(rec.into()))
}

#[utoipa::path(
    put, path = "/modifier/{id}", tag = "suivi",
    params(("id" = i32, Path, description = "Record id")),
    request_body = crate::dto::SuiviInputDoc,
    responses(
        (status = 200, description = "Updated", body = Success),
        (status = 400, description = "Missing or invalid fields", body = crate::dto::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::dto::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<SuiviDraft>, JsonRejection>,
) -> Result<Json<Success>, ApiError> {
    let Path(id) = id?;
    let Json(draft) = payload?;
    state
        .suivi
        .update(id, &draft)
        .await
        .map_err(|e| ApiError::from_service("update", Some(id), e))?;
    Ok(Json(Success { success: true }))
}

#[utoipa::path(
    delete, path = "/supprimer/{id}", tag = "suivi",
    params(("id" = i32, Path, description = "Record id")),
    responses(
        (status = 200, description = "Deleted", body = Success),
        (status = 404, description = "Not Found", body = crate::dto::ErrorDoc)
    )
)]
pub async fn remove(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<Success>, ApiError> {
    let Path(id) = id?;
    state
        .suivi
        .delete(id)
        .await
        .map_err(|e| ApiError::from_service("delete", Some(id), e))?;
    Ok(Json(Success { success: true }))
}

#[utoipa::path(
    get, path = "/totaux", tag = "suivi",
    params(RangeQuery),
    responses(
        (status = 200, description = "Sums over the range", body = Totals),
        (status = 400, description = "Invalid range", body = crate::dto::ErrorDoc)
    )
)]
pub async fn totals(
    State(state): State<AppState>,
    query: Result<Query<RangeQuery>, QueryRejection>,
) -> Result<Json<Totals>, ApiError> {
    let range = range_of(query)?;
    let t = state
        .suivi
        .totals(range)
        .await
        .map_err(|e| ApiError::from_service("totals", None, e))?;
    Ok(Json(t.into()))
}
