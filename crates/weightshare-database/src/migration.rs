//! Embedded schema migrations for the `shares` table.

use sqlx::PgPool;
use sqlx::migrate::Migrator;
use tracing::info;

use weightshare_core::error::{AppError, ErrorKind};

static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Bring the share schema up to date. Already-applied migrations are skipped.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    let known = MIGRATOR.iter().count();
    info!(migrations = known, "Applying share schema migrations");

    MIGRATOR.run(pool).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Database,
            format!("Share schema migration failed: {e}"),
            e,
        )
    })?;

    info!("Share schema is up to date");
    Ok(())
}
