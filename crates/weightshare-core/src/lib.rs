//! # weightshare-core
//!
//! Core crate for WeightShare. Contains configuration schemas, the typed
//! share identifier, the clock abstraction, and the unified error system.
//!
//! This crate has **no** internal dependencies on other WeightShare crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
