use std::path::Path;
use std::str::FromStr;

use anyhow::Context;
use dotenv::dotenv;
use security::RolesConfig;
use storage::{open_store, StorageEngineType};
use tokio::sync::oneshot;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rest_api::{load_server_config, start_server, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = load_server_config(None).context("Failed to load server configuration")?;

    let engine = StorageEngineType::from_str(&config.storage.engine)
        .context("Invalid storage engine in server configuration")?;
    let store = open_store(engine, Path::new(&config.storage.data_directory))
        .context("Failed to open storage engine")?;
    info!(%engine, "storage engine ready");

    let roles = RolesConfig::from_yaml_file(&config.roles_file)
        .with_context(|| format!("Failed to load roles file: {}", config.roles_file))?;

    let state = AppState::new(
        store,
        roles,
        config.jwt_secret.as_bytes().to_vec(),
        config.jwt_ttl_secs,
    );

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_tx.send(());
        }
    });

    start_server(&config, state, shutdown_rx).await
}
