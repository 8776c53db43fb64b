//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use weightshare_core::config::AppConfig;
use weightshare_core::traits::Clock;
use weightshare_database::store::ShareStore;
use weightshare_service::{AccessService, LinkService, ShareService};

use crate::middleware::rate_limit::RateLimiter;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Share store, used directly for health checks
    pub store: Arc<dyn ShareStore>,
    /// Share writer
    pub share_service: Arc<ShareService>,
    /// Share reader
    pub access_service: Arc<AccessService>,
    /// Per-client limiter for share creation
    pub rate_limiter: RateLimiter,
}

impl AppState {
    /// Wire the services around `store`, with `clock` deciding creation
    /// stamps and expiry.
    pub fn new(config: AppConfig, store: Arc<dyn ShareStore>, clock: Arc<dyn Clock>) -> Self {
        let link_service = Arc::new(LinkService::new(config.share.base_url.clone()));
        let share_service = Arc::new(ShareService::new(
            Arc::clone(&store),
            link_service,
            Arc::clone(&clock),
        ));
        let access_service = Arc::new(AccessService::new(Arc::clone(&store), clock));
        let rate_limiter = RateLimiter::new(
            config.share.rate_limit_burst,
            config.share.rate_limit_per_second,
        );

        Self {
            config: Arc::new(config),
            store,
            share_service,
            access_service,
            rate_limiter,
        }
    }
}
