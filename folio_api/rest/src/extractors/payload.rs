use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Form, Json,
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::routes::error;

pub const INVALID_REQUEST_BODY: &str = "Invalid request body";
pub const REQUEST_BODY_TOO_LARGE: &str = "Request body too large";

/// Request body sent either as JSON or as a url-encoded form.
///
/// Requests with any other (or no) content type, as well as empty bodies,
/// yield `T::default()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Payload<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = PayloadRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match content_type(req.headers()) {
            Some(ContentType::Json) => {
                let body = Bytes::from_request(req, state)
                    .await
                    .map_err(|rejection| PayloadRejection {
                        status: rejection.status(),
                        detail: rejection.body_text(),
                    })?;
                if body.is_empty() {
                    return Ok(Self(T::default()));
                }
                Json::<T>::from_bytes(&body)
                    .map(|Json(value)| Self(value))
                    .map_err(|rejection| PayloadRejection {
                        status: rejection.status(),
                        detail: rejection.body_text(),
                    })
            }
            Some(ContentType::Form) => Form::<T>::from_request(req, state)
                .await
                .map(|Form(value)| Self(value))
                .map_err(|rejection| PayloadRejection {
                    status: rejection.status(),
                    detail: rejection.body_text(),
                }),
            None => Ok(Self(T::default())),
        }
    }
}

enum ContentType {
    Json,
    Form,
}

fn content_type(headers: &HeaderMap) -> Option<ContentType> {
    let content_type = headers.get(CONTENT_TYPE)?.to_str().ok()?;
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    if mime == "application/json" || mime.ends_with("+json") {
        Some(ContentType::Json)
    } else if mime == "application/x-www-form-urlencoded" {
        Some(ContentType::Form)
    } else {
        None
    }
}

#[derive(Debug)]
pub struct PayloadRejection {
    status: StatusCode,
    detail: String,
}

impl IntoResponse for PayloadRejection {
    fn into_response(self) -> Response {
        debug!(status = %self.status, "rejecting request body: {}", self.detail);
        match self.status {
            StatusCode::PAYLOAD_TOO_LARGE => {
                error(StatusCode::PAYLOAD_TOO_LARGE, REQUEST_BODY_TOO_LARGE)
            }
            _ => error(StatusCode::BAD_REQUEST, INVALID_REQUEST_BODY),
        }
    }
}
