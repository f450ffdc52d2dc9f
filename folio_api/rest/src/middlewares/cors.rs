use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Allow browsers on `allowed_origins` to `GET` and `POST` with a
/// `Content-Type` header. A `*` entry allows any origin.
pub fn add<S: Clone + Send + Sync + 'static>(
    allowed_origins: &[HeaderValue],
) -> impl FnOnce(Router<S>) -> Router<S> {
    let origin = if allowed_origins.iter().any(|x| x.as_bytes() == b"*") {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(allowed_origins.iter().cloned())
    };

    let layer = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    move |router| router.layer(layer)
}
