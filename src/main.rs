//! OfficeHub notification server.
//!
//! Loads configuration, initializes logging and hands off to the API
//! crate, which wires the database, services, real-time engine and
//! scheduled jobs together.

use anyhow::Context;
use tracing_subscriber::{EnvFilter, fmt};

use officehub_core::config::{AppConfig, LogFormat};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_configuration().context("Failed to load configuration")?;

    init_logging(&config);
    tracing::info!("Starting OfficeHub v{}", env!("CARGO_PKG_VERSION"));

    officehub_api::run_server(config)
        .await
        .context("Server terminated with an error")?;
    Ok(())
}

/// Load `config/default.toml`, the `OFFICEHUB_ENV` overlay and
/// `OFFICEHUB__*` environment overrides.
fn load_configuration() -> anyhow::Result<AppConfig> {
    let dir = std::env::var("OFFICEHUB_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());
    let env = std::env::var("OFFICEHUB_ENV").unwrap_or_else(|_| "development".to_string());

    Ok(AppConfig::load_from(&dir, &env)?)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.logging.directive()));

    match config.logging.format {
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        LogFormat::Pretty => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}
