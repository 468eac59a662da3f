use anyhow::{Context, Result};
use droughtwatch::{AppState, DroughtWatchConfig, logging, web};

#[tokio::main]
async fn main() -> Result<()> {
    let config = DroughtWatchConfig::load()?;
    logging::init(&config.logging)?;

    tracing::info!("Starting DroughtWatch v{}", droughtwatch::VERSION);

    let state = AppState::from_config(&config).context("Failed to build providers")?;
    web::run(&config.server, state).await
}
