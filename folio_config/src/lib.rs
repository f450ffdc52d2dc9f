use std::{net::IpAddr, path::Path};

use anyhow::Context;
use config::{File, FileFormat};
use serde::Deserialize;
use thiserror::Error;

pub use duration::Duration;

mod duration;

pub const DEFAULT_CONFIG: &str = include_str!("../../config.toml");

/// Environment variable holding colon separated paths of additional config
/// files, layered on top of the defaults in the given order.
pub const CONFIG_PATHS_VAR: &str = "CONFIG_PATHS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("MONGO_URI is not set, refusing to start without a database connection string")]
    MissingDatabaseUri,
    #[error("Invalid value for {var}: {value:?}")]
    InvalidVar { var: &'static str, value: String },
}

/// Load the configuration from the embedded defaults, the files listed in
/// `CONFIG_PATHS` and the process environment.
pub fn load() -> anyhow::Result<Config> {
    let paths = std::env::var(CONFIG_PATHS_VAR)
        .ok()
        .map(|paths| {
            paths
                .split(':')
                .filter(|path| !path.is_empty())
                .map(String::from)
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();

    load_with(&paths, |var| std::env::var(var).ok())
}

/// Load the configuration from the embedded defaults and `paths`, applying
/// overrides from the environment as reported by `env`.
pub fn load_with(
    paths: &[impl AsRef<Path>],
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Config> {
    let builder = config::Config::builder().add_source(File::from_str(
        DEFAULT_CONFIG,
        FileFormat::Toml,
    ));

    let builder = paths.iter().try_fold(builder, |builder, path| {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at {}", path.display()))?;
        let source = File::from_str(&content, FileFormat::Toml);
        anyhow::Ok(builder.add_source(source))
    })?;

    let env = |var: &str| env(var).filter(|value| !value.trim().is_empty());
    let mut builder = builder;

    if let Some(host) = env("HOST") {
        let host = host
            .parse::<IpAddr>()
            .map_err(|_| ConfigError::InvalidVar { var: "HOST", value: host.clone() })?;
        builder = builder.set_override("http.host", host.to_string())?;
    }

    if let Some(port) = env("PORT") {
        let port = port
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidVar { var: "PORT", value: port.clone() })?;
        builder = builder.set_override("http.port", i64::from(port))?;
    }

    if let Some(url) = env("MONGO_URI") {
        builder = builder.set_override("database.url", url)?;
    }

    if let Some(name) = env("MONGO_DB_NAME") {
        builder = builder.set_override("database.name", name)?;
    }

    if let Some(origins) = env("FRONTEND_URL") {
        let origins = origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect::<Vec<_>>();
        builder = builder.set_override("cors.allowed_origins", origins)?;
    }

    let config = builder.build().context("Failed to load config")?;

    if config
        .get_string("database.url")
        .map_or(true, |url| url.trim().is_empty())
    {
        return Err(ConfigError::MissingDatabaseUri.into());
    }

    config
        .try_deserialize()
        .context("Failed to deserialize config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub database: DatabaseConfig,
    pub cors: CorsConfig,
    pub health: HealthConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub name: String,
    pub app_name: Option<String>,
    pub collection: String,
    pub server_selection_timeout: Duration,
    pub connect_timeout: Option<Duration>,
    pub max_pool_size: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct HealthConfig {
    pub cache_ttl: Duration,
}
