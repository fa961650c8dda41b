//! Restaurant back-office server
//!
//! Configuration is read from the YAML file named by `RESTAURANT_CONFIG`
//! and the environment (see [`restaurant::config`]).

use anyhow::Result;
use restaurant::config::AppConfig;
use restaurant::logging::init_tracing;
use restaurant::server::ServerBuilder;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;
    init_tracing(&config.logging.filter);

    tracing::info!(
        backend = ?config.storage.backend,
        timeout_secs = config.server.request_timeout_secs,
        "starting restaurant-rs"
    );

    ServerBuilder::from_config(&config)
        .await?
        .serve(&config.server.bind_address())
        .await
}
