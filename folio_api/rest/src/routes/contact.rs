use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use folio_core_contact_contracts::{
    ContactFeatureService, ContactSubmitError, ContactValidationError,
};

use super::{error, internal_server_error};
use crate::{
    extractors::payload::Payload,
    models::contact::{ApiContactSubmission, ApiContactSuccess},
};

pub const ALL_FIELDS_REQUIRED: &str = "All fields are required";
pub const MESSAGE_RECEIVED: &str = "Message received!";

pub fn router(service: Arc<impl ContactFeatureService>) -> Router<()> {
    Router::new()
        .route("/api/contact", routing::post(submit_message))
        .with_state(service)
}

async fn submit_message(
    service: State<Arc<impl ContactFeatureService>>,
    Payload(submission): Payload<ApiContactSubmission>,
) -> Response {
    match service.submit_message(submission.into()).await {
        Ok(_) => (
            StatusCode::CREATED,
            Json(ApiContactSuccess {
                success: true,
                message: MESSAGE_RECEIVED,
            }),
        )
            .into_response(),
        Err(ContactSubmitError::Validation(ContactValidationError::MissingFields(_))) => {
            error(StatusCode::BAD_REQUEST, ALL_FIELDS_REQUIRED)
        }
        Err(ContactSubmitError::Persistence(err)) => internal_server_error(err),
    }
}
