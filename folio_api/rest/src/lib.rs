use std::{future::Future, net::SocketAddr};

use anyhow::Context;
use axum::{extract::DefaultBodyLimit, http::HeaderValue, Router};
use folio_core_contact_contracts::ContactFeatureService;
use folio_core_health_contracts::HealthFeatureService;
use tokio::net::TcpListener;
use tracing::info;

mod extractors;
mod middlewares;
mod models;
mod routes;

/// Largest request body accepted, in bytes.
pub const MAX_BODY_SIZE: usize = 100 * 1024;

#[derive(Debug, Clone)]
pub struct RestServer<Health, Contact> {
    health: Health,
    contact: Contact,
    config: RestServerConfig,
}

#[derive(Debug, Clone)]
pub struct RestServerConfig {
    pub addr: SocketAddr,
    /// Origins allowed to call the API from a browser.
    pub allowed_origins: Vec<HeaderValue>,
}

impl<Health, Contact> RestServer<Health, Contact>
where
    Health: HealthFeatureService,
    Contact: ContactFeatureService,
{
    pub fn new(health: Health, contact: Contact, config: RestServerConfig) -> Self {
        Self {
            health,
            contact,
            config,
        }
    }

    /// Serve requests until `shutdown` resolves, then wait for in-flight
    /// requests to finish.
    pub async fn serve(
        self,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> anyhow::Result<()> {
        let listener = TcpListener::bind(self.config.addr)
            .await
            .with_context(|| format!("Failed to bind to {}", self.config.addr))?;
        info!("Listening on {}", listener.local_addr()?);
        let router = self.router();
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(Into::into)
    }

    pub fn router(self) -> Router<()> {
        Router::new()
            .merge(routes::health::router(self.health.into()))
            .merge(routes::contact::router(self.contact.into()))
            .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
            .with(middlewares::cors::add(&self.config.allowed_origins))
            .with(middlewares::trace::add)
            .with(middlewares::panic_handler::add)
            .with(middlewares::request_id::add)
    }
}

trait RouterExt<S>: Sized {
    fn with(self, f: impl FnOnce(Self) -> Self) -> Self;
}

impl<S> RouterExt<S> for Router<S> {
    fn with(self, f: impl FnOnce(Self) -> Self) -> Self {
        f(self)
    }
}
