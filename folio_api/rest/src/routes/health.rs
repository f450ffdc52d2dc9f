use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use folio_core_health_contracts::{HealthFeatureService, HealthStatus};
use serde::Serialize;

pub const LIVENESS_MESSAGE: &str = "Portfolio backend is running";

pub fn router(service: Arc<impl HealthFeatureService>) -> Router<()> {
    Router::new()
        .route("/", routing::get(liveness))
        .route("/health", routing::get(health))
        .with_state(service)
}

async fn liveness() -> &'static str {
    LIVENESS_MESSAGE
}

#[derive(Serialize)]
struct HealthResponse {
    http: bool,
    database: bool,
}

async fn health(service: State<Arc<impl HealthFeatureService>>) -> Response {
    let HealthStatus { database } = service.get_status().await;

    let status = if database {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    let response = HealthResponse {
        http: true,
        database,
    };

    (status, Json(response)).into_response()
}
