use std::sync::Arc;

use attendance_engine::api::{AppState, create_router};
use attendance_engine::config::ConfigLoader;
use attendance_engine::source::{InMemoryStore, SeedData};
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_DIR: &str = "./config/default";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config_dir =
        std::env::var("ATTENDANCE_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let config = ConfigLoader::load(&config_dir)?;

    let store = match config.seed_data_path() {
        Some(path) => InMemoryStore::load_seed(path)?,
        None => InMemoryStore::new(SeedData::default()),
    };
    let store = Arc::new(store);

    let bind_address = config.server().bind_address.clone();
    info!(
        organization = %config.organization().name,
        config_dir = %config_dir,
        bind_address = %bind_address,
        "Starting attendance engine"
    );

    let router = create_router(AppState::new(config, store.clone(), store));
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
