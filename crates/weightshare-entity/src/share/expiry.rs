//! The fixed visibility window of a share record.
//!
//! A record is live while `now - created_at < 24h`. The window is not
//! configurable and cannot be renewed.

use chrono::{DateTime, Duration, Utc};

/// Lifetime of a share record, in hours.
pub const SHARE_TTL_HOURS: i64 = 24;

/// Lifetime of a share record.
pub fn share_ttl() -> Duration {
    Duration::hours(SHARE_TTL_HOURS)
}

/// Records created at or before this instant are expired as of `now`.
pub fn expiry_cutoff(now: DateTime<Utc>) -> DateTime<Utc> {
    now - share_ttl()
}

/// Whether a record created at `created_at` is still visible at `now`.
pub fn is_live(created_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    created_at > expiry_cutoff(now)
}
