//! Share link value object.

use serde::{Deserialize, Serialize};

use weightshare_core::types::ShareId;

/// The result of a successful share creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareLink {
    /// The newly allocated share identifier.
    pub share_id: ShareId,
    /// Fully-qualified public URL of the share.
    pub share_link: String,
}
