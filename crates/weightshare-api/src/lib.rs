//! # weightshare-api
//!
//! HTTP API layer for WeightShare built on Axum.
//!
//! Provides the share endpoints, the human-facing redirect route, health,
//! middleware (rate limiting, CORS, compression, logging), extractors, DTOs,
//! and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;
pub mod telemetry;

pub use app::{build_app, run_server};
pub use error::ApiError;
pub use state::AppState;
