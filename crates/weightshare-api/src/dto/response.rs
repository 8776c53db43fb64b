//! Response DTOs.

use serde::{Deserialize, Serialize};

use weightshare_entity::ShareLink;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response payload.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Body of a successful share creation; link fields sit at the top level.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShareResponse {
    /// Always `true`.
    pub success: bool,
    /// The new share's identifier.
    pub share_id: String,
    /// Absolute URL of the human-facing share page.
    pub share_link: String,
}

impl From<ShareLink> for CreateShareResponse {
    fn from(link: ShareLink) -> Self {
        Self {
            success: true,
            share_id: link.share_id.into_inner(),
            share_link: link.share_link,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` or `degraded`.
    pub status: String,
    /// Server version.
    pub version: String,
    /// `ok` or `unavailable`.
    pub store: String,
}
