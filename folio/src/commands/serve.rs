use folio_config::Config;
use folio_persistence_contracts::Database;
use tokio::signal;
use tracing::{error, info};

use crate::{
    database,
    environment::{ConfigProvider, Provider},
};

pub async fn serve(config: Config) -> anyhow::Result<()> {
    let config_provider = ConfigProvider::new(&config)?;

    info!("Connecting to database");
    let database = database::connect(&config.database).await?;
    match database.ping().await {
        Ok(()) => info!("Connected to database {}", database.name()),
        // Requests fail with 500 until the database becomes reachable.
        Err(err) => error!("Database is not reachable: {err:#}"),
    }

    let provider = Provider::new(config_provider, database.clone());
    let server = provider.rest_server();
    info!(
        "Starting http server on {}:{}",
        config.http.host, config.http.port
    );
    server.serve(shutdown_signal()).await?;

    info!("Closing database connections");
    database.shutdown().await;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(err) => {
                error!("Failed to listen for Ctrl+C: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                info!("Received SIGTERM, shutting down");
            }
            Err(err) => {
                error!("Failed to listen for SIGTERM: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
