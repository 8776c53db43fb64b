//! PostgreSQL connection pool management.

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use weightshare_core::config::DatabaseConfig;
use weightshare_core::error::{AppError, ErrorKind};

/// Wrapper around the sqlx PostgreSQL connection pool.
///
/// One pool is built per process and cloned into every consumer; clones
/// share the same underlying connections.
#[derive(Debug, Clone)]
pub struct DatabasePool {
    /// The underlying sqlx connection pool.
    pool: PgPool,
}

impl DatabasePool {
    /// Build a pool without opening any connection.
    ///
    /// Connections are established on first use. Acquiring one waits at most
    /// `connect_timeout_seconds` before failing.
    pub fn connect_lazy(config: &DatabaseConfig) -> Result<Self, AppError> {
        info!(
            url = %mask_password(&config.url),
            max_connections = config.max_connections,
            acquire_timeout_seconds = config.connect_timeout_seconds,
            "Configuring PostgreSQL pool"
        );

        let pool = pool_options(config).connect_lazy(&config.url).map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Invalid database URL: {e}"),
                e,
            )
        })?;

        Ok(Self { pool })
    }

    /// Return a reference to the underlying sqlx pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Close all connections in the pool.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database pool closed");
    }
}

fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
        .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
}

/// Mask the password portion of a database URL for safe logging.
pub fn mask_password(url: &str) -> String {
    if let Some(at_pos) = url.find('@') {
        if let Some(colon_pos) = url[..at_pos].rfind(':') {
            let scheme_end = url.find("://").map(|p| p + 3).unwrap_or(0);
            if colon_pos > scheme_end {
                return format!("{}:****@{}", &url[..colon_pos], &url[at_pos + 1..]);
            }
        }
    }
    url.to_string()
}
