//! # weightshare-service
//!
//! Business logic for WeightShare: the share writer and reader, identifier
//! allocation, and link composition.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod context;
pub mod share;

pub use context::RequestOrigin;
pub use share::{AccessService, LinkService, ShareError, ShareService};
