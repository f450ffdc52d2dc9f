use std::net::SocketAddr;

use anyhow::Context;
use axum::http::HeaderValue;
use folio_api_rest::RestServerConfig;
use folio_config::Config;
use folio_core_contact_impl::ContactFeatureServiceImpl;
use folio_core_health_impl::{HealthFeatureConfig, HealthFeatureServiceImpl};
use folio_persistence_mongodb::contact::MongoContactMessageRepository;
use folio_shared_impl::time::TimeServiceImpl;
use types::{ContactFeature, ContactRepo, Database, HealthFeature, RestServer, Time};

pub mod types;

/// Constructs the services of the backend and hands them their
/// dependencies.
#[derive(Debug, Clone)]
pub struct Provider {
    config: ConfigProvider,
    database: Database,
}

impl Provider {
    pub fn new(config: ConfigProvider, database: Database) -> Self {
        Self { config, database }
    }

    pub fn rest_server(&self) -> RestServer {
        RestServer::new(
            self.health_feature(),
            self.contact_feature(),
            self.config.rest_server_config.clone(),
        )
    }

    pub fn health_feature(&self) -> HealthFeature {
        HealthFeatureServiceImpl::new(
            self.time(),
            self.database.clone(),
            self.config.health_feature_config.clone(),
        )
    }

    pub fn contact_feature(&self) -> ContactFeature {
        ContactFeatureServiceImpl::new(self.time(), self.contact_repo())
    }

    pub fn contact_repo(&self) -> ContactRepo {
        MongoContactMessageRepository::new(&self.database, &self.config.contact_collection)
    }

    pub fn time(&self) -> Time {
        TimeServiceImpl
    }
}

/// Service configuration derived from the loaded [`Config`].
#[derive(Debug, Clone)]
pub struct ConfigProvider {
    rest_server_config: RestServerConfig,
    health_feature_config: HealthFeatureConfig,
    contact_collection: String,
}

impl ConfigProvider {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        // API
        let allowed_origins = config
            .cors
            .allowed_origins
            .iter()
            .map(|origin| {
                let origin = origin.trim_end_matches('/');
                HeaderValue::from_str(origin)
                    .with_context(|| format!("Invalid CORS origin {origin:?}"))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        let rest_server_config = RestServerConfig {
            addr: SocketAddr::new(config.http.host, config.http.port),
            allowed_origins,
        };

        // Core
        let health_feature_config = HealthFeatureConfig {
            cache_ttl: config.health.cache_ttl.into(),
        };

        Ok(Self {
            rest_server_config,
            health_feature_config,
            contact_collection: config.database.collection.clone(),
        })
    }
}
