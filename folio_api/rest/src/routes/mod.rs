use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::models::ApiError;

pub mod contact;
pub mod health;

pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

/// Log `err` and respond with a generic 500 that does not reveal its details.
pub fn internal_server_error(err: impl Into<anyhow::Error>) -> Response {
    let err = err.into();
    tracing::error!("internal server error: {err:#}");
    error(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_SERVER_ERROR)
}

pub fn error(code: StatusCode, error: &'static str) -> Response {
    (code, Json(ApiError { error })).into_response()
}
