//! Share link configuration.

use serde::{Deserialize, Serialize};

/// Settings for composing share links and guarding the public create route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareConfig {
    /// Public base URL used in share links, e.g. `https://weights.example.com`.
    ///
    /// When unset, links are built from the inbound request's host.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Maximum burst of share creations per client.
    #[serde(default = "default_rate_limit_burst")]
    pub rate_limit_burst: u32,
    /// Sustained share creations per second per client.
    #[serde(default = "default_rate_limit_per_second")]
    pub rate_limit_per_second: f64,
    /// Maximum accepted request body size in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
    /// Key the rate limiter on the first `X-Forwarded-For` hop.
    ///
    /// Only enable behind a proxy that overwrites the header. Otherwise the
    /// socket peer address is used.
    #[serde(default)]
    pub trust_forwarded_for: bool,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            rate_limit_burst: default_rate_limit_burst(),
            rate_limit_per_second: default_rate_limit_per_second(),
            max_body_bytes: default_max_body_bytes(),
            trust_forwarded_for: false,
        }
    }
}

fn default_rate_limit_burst() -> u32 {
    20
}

fn default_rate_limit_per_second() -> f64 {
    0.5
}

fn default_max_body_bytes() -> usize {
    1024 * 1024
}
