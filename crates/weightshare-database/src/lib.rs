//! # weightshare-database
//!
//! The [`ShareStore`] abstraction and its two backends: PostgreSQL through
//! a lazily connected sqlx pool, and a process-local map for development
//! and tests.

pub mod connection;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use store::{ShareStore, ShareStoreManager};
