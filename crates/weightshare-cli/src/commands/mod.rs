//! CLI command definitions and dispatch.

pub mod list;
pub mod migrate;
pub mod purge;
pub mod serve;
pub mod show;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use weightshare_core::config::AppConfig;
use weightshare_core::error::AppError;
use weightshare_database::ShareStoreManager;
use weightshare_service::ShareError;

/// WeightShare: temporary public links to weight-tracker snapshots
#[derive(Debug, Parser)]
#[command(name = "weightshare", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, global = true, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the WeightShare server
    Serve(serve::ServeArgs),
    /// Apply pending database migrations
    Migrate,
    /// Delete every expired share now
    Purge(purge::PurgeArgs),
    /// Print one live share
    Show(show::ShowArgs),
    /// List the newest live shares
    List(list::ListArgs),
}

impl Cli {
    /// Whether this invocation starts the server
    pub fn is_serve(&self) -> bool {
        matches!(self.command, Commands::Serve(_))
    }

    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Serve(args) => serve::execute(args, &self.config).await,
            Commands::Migrate => migrate::execute(&self.config).await,
            Commands::Purge(args) => purge::execute(args, &self.config).await,
            Commands::Show(args) => show::execute(args, &self.config, self.format).await,
            Commands::List(args) => list::execute(args, &self.config, self.format).await,
        }
    }
}

/// Helper: load configuration from file, `WEIGHTSHARE_ENV` overlay, and environment
pub fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    let env = std::env::var("WEIGHTSHARE_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load_from(config_path, &env)
}

/// Helper: open the configured share store
pub fn open_store(config: &AppConfig) -> Result<ShareStoreManager, AppError> {
    ShareStoreManager::new(&config.database)
}

/// Helper: surface a share error as a CLI failure
pub fn share_error(err: ShareError) -> AppError {
    match err {
        ShareError::InvalidInput(msg) => AppError::validation(msg),
        ShareError::NotFound => AppError::not_found(err.to_string()),
        ShareError::StoreUnavailable => AppError::service_unavailable(err.to_string()),
    }
}
