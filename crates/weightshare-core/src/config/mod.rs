//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section, and every section falls back to its defaults when absent.

pub mod app;
pub mod database;
pub mod logging;
pub mod share;
pub mod worker;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::database::{DatabaseConfig, StoreBackend};
pub use self::logging::LoggingConfig;
pub use self::share::ShareConfig;
pub use self::worker::WorkerConfig;

use crate::error::AppError;

/// Prefix for environment variable overrides, e.g. `WEIGHTSHARE__DATABASE__URL`.
pub const ENV_PREFIX: &str = "WEIGHTSHARE";

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Share store settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Share link settings.
    #[serde(default)]
    pub share: ShareConfig,
    /// Background worker settings.
    #[serde(default)]
    pub worker: WorkerConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from `config/default.toml`.
    ///
    /// See [`AppConfig::load_from`] for the merge order.
    pub fn load(env: &str) -> Result<Self, AppError> {
        Self::load_from("config/default", env)
    }

    /// Load configuration from a base file plus overlays.
    ///
    /// Merges the base file with `{env}.toml` from the same directory and
    /// environment variables prefixed with `WEIGHTSHARE` (separator `__`).
    /// Missing files are skipped.
    pub fn load_from(base: &str, env: &str) -> Result<Self, AppError> {
        let base = base.trim_end_matches(".toml");
        let overlay = overlay_path(base, env);
        let config = config::Config::builder()
            .add_source(config::File::with_name(base).required(false))
            .add_source(config::File::with_name(&overlay).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}

/// `{env}` next to `base`, e.g. `deploy/default` + `production` gives
/// `deploy/production`.
fn overlay_path(base: &str, env: &str) -> String {
    match Path::new(base).parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.join(env).to_string_lossy().into_owned(),
        _ => env.to_string(),
    }
}
