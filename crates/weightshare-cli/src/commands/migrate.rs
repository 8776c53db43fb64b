//! Database migration command.

use weightshare_core::config::StoreBackend;
use weightshare_core::error::AppError;

use crate::output;

/// Apply all pending migrations
pub async fn execute(config_path: &str) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;

    if config.database.backend == StoreBackend::Memory {
        output::print_warning("In-memory backend selected; nothing to migrate.");
        return Ok(());
    }

    let store = super::open_store(&config)?;
    println!("Running database migrations...");
    store.migrate().await?;
    store.close().await;
    output::print_success("All migrations applied successfully.");
    Ok(())
}
