//! Share domain entities.

pub mod expiry;
pub mod link;
pub mod model;
pub mod snapshot;

pub use expiry::{SHARE_TTL_HOURS, expiry_cutoff, is_live, share_ttl};
pub use link::ShareLink;
pub use model::ShareRecord;
pub use snapshot::{SnapshotInput, WeightEntry};
