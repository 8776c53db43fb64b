//! Background worker configuration.

use serde::{Deserialize, Serialize};

/// Background worker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Whether the expired-share sweep runs inside the server process.
    #[serde(default = "default_true")]
    pub sweep_enabled: bool,
    /// Cron expression (with seconds) for the expired-share sweep.
    #[serde(default = "default_sweep_schedule")]
    pub sweep_schedule: String,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            sweep_enabled: true,
            sweep_schedule: default_sweep_schedule(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_sweep_schedule() -> String {
    "0 */10 * * * *".to_string()
}
