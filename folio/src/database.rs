use folio_config::DatabaseConfig;
use folio_persistence_mongodb::{MongoDatabase, MongoDatabaseConfig};

pub async fn connect(config: &DatabaseConfig) -> anyhow::Result<MongoDatabase> {
    MongoDatabase::connect(&MongoDatabaseConfig {
        url: config.url.clone(),
        name: config.name.clone(),
        app_name: config.app_name.clone(),
        server_selection_timeout: config.server_selection_timeout.into(),
        connect_timeout: config.connect_timeout.map(Into::into),
        max_pool_size: config.max_pool_size,
    })
    .await
}
