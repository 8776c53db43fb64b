//! WeightShare server: temporary public links to weight-tracker snapshots.
//!
//! Main entry point that loads configuration, installs logging, and runs the
//! HTTP server until shutdown.

use weightshare_core::config::AppConfig;
use weightshare_core::error::AppError;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    weightshare_api::telemetry::init_logging(&config.logging);
    tracing::info!("Starting WeightShare v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = weightshare_api::run_server(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file, environment overlay, and variables
fn load_configuration() -> Result<AppConfig, AppError> {
    let config_path = std::env::var("WEIGHTSHARE_CONFIG")
        .unwrap_or_else(|_| "config/default.toml".to_string());
    let env = std::env::var("WEIGHTSHARE_ENV").unwrap_or_else(|_| "development".to_string());

    AppConfig::load_from(&config_path, &env)
}
