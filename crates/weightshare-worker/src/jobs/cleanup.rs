//! Expired share cleanup.

use std::sync::Arc;

use tracing;

use weightshare_core::result::AppResult;
use weightshare_core::traits::Clock;
use weightshare_database::store::ShareStore;
use weightshare_entity::share::expiry_cutoff;

/// Physically removes shares whose 24-hour window has closed.
///
/// Readers already hide expired records, so a missed or failed run only
/// delays storage reclamation.
#[derive(Debug, Clone)]
pub struct ExpiredShareSweeper {
    /// Share store
    store: Arc<dyn ShareStore>,
    /// Clock used for the expiry cutoff
    clock: Arc<dyn Clock>,
}

impl ExpiredShareSweeper {
    /// Create a new sweeper
    pub fn new(store: Arc<dyn ShareStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Delete every expired share once and return how many were removed
    pub async fn sweep_once(&self) -> AppResult<u64> {
        let cutoff = expiry_cutoff(self.clock.now());
        tracing::debug!(%cutoff, "Running expired share sweep");

        let removed = self.store.delete_expired(cutoff).await?;
        if removed > 0 {
            tracing::info!(removed, "Swept expired shares");
        }
        Ok(removed)
    }

    /// Run a sweep, logging instead of returning failures
    pub async fn run(&self) {
        if let Err(e) = self.sweep_once().await {
            tracing::warn!(error = %e, "Expired share sweep failed");
        }
    }
}
