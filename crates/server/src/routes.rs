use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;
use service::HealthReport;

use crate::openapi::ApiDoc;
use crate::state::AppState;

pub mod suivi;

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses(
        (status = 200, description = "Database reachable", body = crate::dto::HealthDoc),
        (status = 503, description = "Database unreachable", body = crate::dto::HealthDoc)
    )
)]
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<Health>) {
    match state.suivi.health_check().await {
        HealthReport::Ok => (StatusCode::OK, Json(Health::ok())),
        HealthReport::Degraded { reason } => (StatusCode::SERVICE_UNAVAILABLE, Json(Health::degraded(reason))),
    }
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the application router. When `static_dir` is given, paths that
/// match no route are served from it, falling back to its `index.html`.
pub fn build_router(state: AppState, cors: CorsLayer, static_dir: Option<&str>) -> Router {
    let api = Router::new()
        .route("/ajouter", post(suivi::create))
        .route("/donnees", get(suivi::list))
        .route("/donnees/:id", get(suivi::get_one))
        .route("/modifier/:id", put(suivi::update))
        .route("/supprimer/:id", delete(suivi::remove))
        .route("/totaux", get(suivi::totals))
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .with_state(state);

    let app = match static_dir {
        Some(dir) => {
            let index = ServeFile::new(format!("{}/index.html", dir.trim_end_matches('/')));
            api.fallback_service(ServeDir::new(dir).fallback(index))
        }
        None => api,
    };

    app.layer(cors).layer(
        TraceLayer::new_for_http()
            .make_span_with(
                DefaultMakeSpan::new()
                    .level(Level::INFO)
                    .include_headers(false),
            )
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(
                DefaultOnResponse::new()
                    .level(Level::INFO)
                    .include_headers(false),
            )
            // 5xx responses
            .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
    )
}
