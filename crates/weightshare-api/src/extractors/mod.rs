//! Custom Axum extractors.

pub mod json;
pub mod origin;

pub use json::ApiJson;
pub use origin::InboundOrigin;
