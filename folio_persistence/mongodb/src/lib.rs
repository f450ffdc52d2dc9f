use std::time::Duration;

use anyhow::Context;
use folio_persistence_contracts::Database;
use folio_utils::trace_instrument;
use mongodb::{bson::doc, options::ClientOptions, Client};

pub mod contact;

#[derive(Debug, Clone)]
pub struct MongoDatabase {
    client: Client,
    database: mongodb::Database,
}

#[derive(Debug)]
pub struct MongoDatabaseConfig {
    pub url: String,
    /// Database to use if the connection string does not name one.
    pub name: String,
    pub app_name: Option<String>,
    pub server_selection_timeout: Duration,
    pub connect_timeout: Option<Duration>,
    pub max_pool_size: Option<u32>,
}

impl MongoDatabase {
    /// Create a client for the configured deployment.
    ///
    /// The driver connects lazily, so this only fails on an invalid
    /// connection string. Use [`Database::ping`] to verify connectivity.
    pub async fn connect(config: &MongoDatabaseConfig) -> anyhow::Result<Self> {
        let mut options = ClientOptions::parse(&config.url)
            .await
            .context("Failed to parse database connection string")?;
        options.server_selection_timeout = Some(config.server_selection_timeout);
        options.connect_timeout = config.connect_timeout;
        options.max_pool_size = config.max_pool_size;
        if config.app_name.is_some() {
            options.app_name.clone_from(&config.app_name);
        }

        let client = Client::with_options(options).context("Failed to create database client")?;
        let database = client
            .default_database()
            .unwrap_or_else(|| client.database(&config.name));

        Ok(Self { client, database })
    }

    #[cfg(feature = "dummy")]
    pub fn dummy() -> Self {
        use mongodb::options::ServerAddress;

        let options = ClientOptions::builder()
            .hosts(vec![ServerAddress::Tcp {
                host: "localhost".into(),
                port: None,
            }])
            .build();
        let client = Client::with_options(options).unwrap();
        let database = client.database("dummy");
        Self { client, database }
    }

    /// The name of the database this handle operates on.
    pub fn name(&self) -> &str {
        self.database.name()
    }

    /// Drop the whole database. Only meant for tests.
    pub async fn reset(&self) -> anyhow::Result<()> {
        self.database
            .drop()
            .await
            .with_context(|| format!("Failed to drop database {}", self.name()))
    }

    pub async fn shutdown(self) {
        self.client.shutdown().await;
    }

    pub(crate) fn database(&self) -> &mongodb::Database {
        &self.database
    }
}

impl Database for MongoDatabase {
    #[trace_instrument(skip(self))]
    async fn ping(&self) -> anyhow::Result<()> {
        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .context("Failed to ping database")?;
        Ok(())
    }
}
