//! # weightshare-entity
//!
//! Domain models for WeightShare: the snapshot a user submits, the
//! immutable share record persisted from it, and the expiry window that
//! bounds its visibility.

pub mod share;

pub use share::{ShareLink, ShareRecord, SnapshotInput, WeightEntry};
