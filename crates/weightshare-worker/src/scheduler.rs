//! Cron scheduler for the periodic expiry sweep.

use tokio_cron_scheduler::{Job as CronJob, JobScheduler};
use tracing;

use weightshare_core::error::AppError;

use crate::jobs::ExpiredShareSweeper;

/// Cron-based scheduler that drives [`ExpiredShareSweeper`]
pub struct SweepScheduler {
    /// The underlying job scheduler
    scheduler: JobScheduler,
}

impl std::fmt::Debug for SweepScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SweepScheduler").finish()
    }
}

impl SweepScheduler {
    /// Create a new scheduler
    pub async fn new() -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {}", e)))?;

        Ok(Self { scheduler })
    }

    /// Register the sweep on a six-field cron `schedule` (seconds first)
    pub async fn register_sweep(
        &self,
        schedule: &str,
        sweeper: ExpiredShareSweeper,
    ) -> Result<(), AppError> {
        let job = CronJob::new_async(schedule, move |_uuid, _lock| {
            let sweeper = sweeper.clone();
            Box::pin(async move {
                sweeper.run().await;
            })
        })
        .map_err(|e| {
            AppError::configuration(format!(
                "Invalid sweep schedule '{}': {}",
                schedule, e
            ))
        })?;

        self.scheduler
            .add(job)
            .await
            .map_err(|e| AppError::internal(format!("Failed to add sweep schedule: {}", e)))?;

        tracing::info!(schedule, "Registered: expired share sweep");
        Ok(())
    }

    /// Start the scheduler
    pub async fn start(&self) -> Result<(), AppError> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {}", e)))?;

        tracing::info!("Sweep scheduler started");
        Ok(())
    }

    /// Shutdown the scheduler
    pub async fn shutdown(&mut self) -> Result<(), AppError> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {}", e)))?;

        tracing::info!("Sweep scheduler shut down");
        Ok(())
    }
}
