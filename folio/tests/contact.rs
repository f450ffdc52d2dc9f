use std::{
    io::Write,
    sync::{Arc, Mutex},
};

use anyhow::bail;
use axum::{
    body::Body,
    http::{header, HeaderValue, Request, StatusCode},
    Router,
};
use folio_api_rest::{RestServer, RestServerConfig};
use folio_core_contact_impl::ContactFeatureServiceImpl;
use folio_core_health_impl::{HealthFeatureConfig, HealthFeatureServiceImpl};
use folio_models::contact::ContactMessage;
use folio_persistence_contracts::{contact::ContactMessageRepository, Database};
use folio_shared_impl::time::TimeServiceImpl;
use http_body_util::BodyExt;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;
use tracing::{subscriber::DefaultGuard, Level};

/// Message store keeping everything in memory. If `down` is set every
/// operation fails as if the database was unreachable.
#[derive(Debug, Clone, Default)]
struct MemoryStore {
    messages: Arc<Mutex<Vec<ContactMessage>>>,
    down: bool,
}

impl MemoryStore {
    fn down() -> Self {
        Self {
            down: true,
            ..Default::default()
        }
    }

    fn messages(&self) -> Vec<ContactMessage> {
        self.messages.lock().unwrap().clone()
    }
}

impl ContactMessageRepository for MemoryStore {
    async fn create(&self, message: &ContactMessage) -> anyhow::Result<()> {
        if self.down {
            bail!("Server selection timeout: No available servers");
        }
        self.messages.lock().unwrap().push(message.clone());
        Ok(())
    }
}

impl Database for MemoryStore {
    async fn ping(&self) -> anyhow::Result<()> {
        if self.down {
            bail!("Server selection timeout: No available servers");
        }
        Ok(())
    }
}

fn router(store: &MemoryStore) -> Router {
    RestServer::new(
        HealthFeatureServiceImpl::new(
            TimeServiceImpl,
            store.clone(),
            HealthFeatureConfig {
                cache_ttl: Default::default(),
            },
        ),
        ContactFeatureServiceImpl::new(TimeServiceImpl, store.clone()),
        RestServerConfig {
            addr: ([127, 0, 0, 1], 0).into(),
            allowed_origins: vec![HeaderValue::from_static("http://localhost:3000")],
        },
    )
    .router()
}

async fn post(store: &MemoryStore, body: Value) -> (StatusCode, Value) {
    post_raw(store, body.to_string()).await
}

async fn post_raw(store: &MemoryStore, body: String) -> (StatusCode, Value) {
    let request = Request::post("/api/contact")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap();

    let response = router(store).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn valid_submission_is_stored() {
    let store = MemoryStore::default();

    let before = chrono::Utc::now();
    let (status, body) = post(
        &store,
        json!({"name": "Alice", "email": "a@x.com", "message": "Hi"}),
    )
    .await;
    let after = chrono::Utc::now();

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"success": true, "message": "Message received!"}));

    let messages = store.messages();
    assert_eq!(messages.len(), 1);
    let message = &messages[0];
    assert_eq!(*message.name, "Alice");
    assert_eq!(*message.email, "a@x.com");
    assert_eq!(*message.message, "Hi");
    assert!(before <= message.submitted_at && message.submitted_at <= after);
}

#[tokio::test]
async fn incomplete_submission_is_rejected() {
    for body in [
        json!({"name": "", "email": "a@x.com", "message": "Hi"}),
        json!({"name": "Alice", "message": "Hi"}),
        json!({"name": "Alice", "email": "a@x.com", "message": "   "}),
        json!({}),
    ] {
        let store = MemoryStore::default();

        let (status, body) = post(&store, body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "All fields are required"}));
        assert!(store.messages().is_empty());
    }
}

#[tokio::test]
async fn long_message_is_stored() {
    let store = MemoryStore::default();
    let text = "x".repeat(5000);

    let (status, _) = post(
        &store,
        json!({"name": "Alice", "email": "a@x.com", "message": text}),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let messages = store.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(*messages[0].message, text);
}

#[tokio::test]
async fn empty_body_is_rejected_as_incomplete() {
    let store = MemoryStore::default();

    let (status, body) = post_raw(&store, String::new()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "All fields are required"}));
    assert!(store.messages().is_empty());
}

#[tokio::test]
async fn database_down() {
    let store = MemoryStore::down();
    let (logs, _guard) = capture_logs(Level::INFO);

    let (status, body) = post(
        &store,
        json!({"name": "Alice", "email": "a@x.com", "message": "Hi"}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Internal Server Error"}));
    assert!(store.messages().is_empty());

    let logs = logs.contents();
    assert!(logs.contains("ERROR"), "{logs}");
    assert!(logs.contains("No available servers"), "{logs}");
}

#[tokio::test]
async fn contact_details_are_not_logged() {
    let store = MemoryStore::default();
    let (logs, _guard) = capture_logs(Level::DEBUG);

    let (status, _) = post(
        &store,
        json!({
            "name": "Alice Liddell",
            "email": "alice@wonderland.example",
            "message": "Down the rabbit hole",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let logs = logs.contents();
    assert!(logs.contains("stored contact message"), "{logs}");
    for secret in ["Alice Liddell", "alice@wonderland.example", "rabbit hole"] {
        assert!(!logs.contains(secret), "{secret:?} leaked into logs:\n{logs}");
    }
}

#[tokio::test]
async fn health_reports_database_state() {
    for (store, status, database) in [
        (MemoryStore::default(), StatusCode::OK, true),
        (MemoryStore::down(), StatusCode::INTERNAL_SERVER_ERROR, false),
    ] {
        let response = router(&store)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), status);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(
            serde_json::from_slice::<Value>(&bytes).unwrap(),
            json!({"http": true, "database": database})
        );
    }
}

fn capture_logs(level: Level) -> (LogBuffer, DefaultGuard) {
    let logs = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer({
            let logs = logs.clone();
            move || logs.clone()
        })
        .with_max_level(level)
        .with_ansi(false)
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (logs, guard)
}

#[derive(Debug, Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
