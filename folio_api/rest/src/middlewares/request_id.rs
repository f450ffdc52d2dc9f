//! Tag every request with an ID that is echoed in the `X-Request-Id` response
//! header. An ID set by the reverse proxy in front of the server is kept so
//! that both logs can be correlated.

use axum::{
    extract::Request,
    http::HeaderValue,
    middleware::{from_fn, Next},
    response::{IntoResponse, Response},
    Router,
};
use base64::{display::Base64Display, engine::general_purpose::URL_SAFE_NO_PAD};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

const MAX_FORWARDED_LENGTH: usize = 64;

pub fn add<S: Clone + Send + Sync + 'static>(router: Router<S>) -> Router<S> {
    router.layer(from_fn(middleware))
}

async fn middleware(mut request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(RequestId::forwarded)
        .unwrap_or_else(RequestId::generate);

    request.extensions_mut().insert(request_id.clone());
    let response = next.run(request).await;
    ([(REQUEST_ID_HEADER, request_id.0)], response).into_response()
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestId(String);

impl RequestId {
    fn generate() -> Self {
        let uuid = Uuid::now_v7();
        Self(Base64Display::new(uuid.as_bytes(), &URL_SAFE_NO_PAD).to_string())
    }

    fn forwarded(value: &HeaderValue) -> Option<Self> {
        let value = value.to_str().ok()?;
        let valid = !value.is_empty()
            && value.len() <= MAX_FORWARDED_LENGTH
            && value.bytes().all(|b| b.is_ascii_graphic());
        valid.then(|| Self(value.into()))
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique() {
        let a = RequestId::generate();
        let b = RequestId::generate();
        assert_ne!(a, b);
        assert_eq!(a.0.len(), 22);
    }

    #[test]
    fn forwarded() {
        let ok = HeaderValue::from_static("3f2b-abc_123");
        assert_eq!(
            RequestId::forwarded(&ok),
            Some(RequestId("3f2b-abc_123".into()))
        );

        let too_long = "x".repeat(MAX_FORWARDED_LENGTH + 1);
        for value in ["", "with space", too_long.as_str()] {
            let value = HeaderValue::from_str(value).unwrap();
            assert_eq!(RequestId::forwarded(&value), None);
        }
    }
}
