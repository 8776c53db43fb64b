//! Delete expired shares on demand.

use std::sync::Arc;

use clap::Args;

use weightshare_core::error::AppError;
use weightshare_core::traits::SystemClock;
use weightshare_worker::ExpiredShareSweeper;

use crate::output;

/// Arguments for the purge command
#[derive(Debug, Args)]
pub struct PurgeArgs {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Execute the purge command
pub async fn execute(args: &PurgeArgs, config_path: &str) -> Result<(), AppError> {
    if !args.yes {
        let confirm = dialoguer::Confirm::new()
            .with_prompt("Permanently delete all shares older than 24 hours?")
            .default(false)
            .interact()
            .map_err(|e| AppError::internal(format!("Input error: {}", e)))?;

        if !confirm {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let config = super::load_config(config_path)?;
    let store = super::open_store(&config)?;
    let sweeper = ExpiredShareSweeper::new(store.store(), Arc::new(SystemClock));

    let removed = sweeper.sweep_once().await?;
    store.close().await;
    output::print_success(&format!("Removed {} expired share(s).", removed));
    Ok(())
}
