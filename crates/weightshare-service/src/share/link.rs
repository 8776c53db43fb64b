//! Share identifier generation and link composition.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;
use rand::rngs::OsRng;

use weightshare_core::types::ShareId;

use super::error::ShareError;
use crate::context::RequestOrigin;

/// Random bytes per identifier (128 bits, 22 base64 characters).
pub const SHARE_ID_BYTES: usize = 16;

/// Path under which the human-facing share route is mounted.
pub const SHARE_PATH: &str = "/share";

/// Generates share identifiers and builds public links for them.
#[derive(Debug, Clone, Default)]
pub struct LinkService {
    /// Configured public base URL, without trailing slash.
    base_url: Option<String>,
}

impl LinkService {
    /// Creates a link service. An empty `base_url` counts as unset.
    pub fn new(base_url: Option<String>) -> Self {
        let base_url = base_url
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty());
        Self { base_url }
    }

    /// Generates a fresh identifier from the operating system's CSPRNG.
    pub fn generate_id(&self) -> ShareId {
        let mut bytes = [0u8; SHARE_ID_BYTES];
        OsRng.fill_bytes(&mut bytes);
        ShareId::new(URL_SAFE_NO_PAD.encode(bytes))
    }

    /// Resolves the base URL for links: configuration first, then the
    /// inbound request.
    pub fn base_for(&self, origin: Option<&RequestOrigin>) -> Result<String, ShareError> {
        if let Some(base) = &self.base_url {
            return Ok(base.clone());
        }
        origin
            .filter(|o| !o.host.trim().is_empty())
            .map(|o| o.base_url().trim_end_matches('/').to_string())
            .ok_or_else(|| {
                ShareError::invalid("Cannot build share link: no base URL configured and no Host header")
            })
    }

    /// `{base}/share/{id}`.
    pub fn compose(base: &str, share_id: &ShareId) -> String {
        format!("{base}{SHARE_PATH}/{share_id}")
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_generated_ids_are_url_safe_and_sized() {
        let links = LinkService::default();
        let id = links.generate_id();
        assert_eq!(id.as_str().len(), 22);
        assert!(ShareId::is_well_formed(id.as_str()));
    }

    #[test]
    fn test_thousand_ids_are_distinct() {
        let links = LinkService::default();
        let ids: HashSet<ShareId> = (0..1000).map(|_| links.generate_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_configured_base_wins_over_request() {
        let links = LinkService::new(Some("https://weights.example.com/".to_string()));
        let origin = RequestOrigin::new("http", "internal:8080");
        assert_eq!(
            links.base_for(Some(&origin)).expect("base"),
            "https://weights.example.com"
        );
    }

    #[test]
    fn test_falls_back_to_request_origin() {
        let links = LinkService::new(Some("  ".to_string()));
        let origin = RequestOrigin::new("https", "localhost:3000");
        assert_eq!(
            links.base_for(Some(&origin)).expect("base"),
            "https://localhost:3000"
        );
    }

    #[test]
    fn test_no_base_and_no_host_is_invalid() {
        let links = LinkService::new(None);
        assert!(matches!(
            links.base_for(None),
            Err(ShareError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_compose() {
        let id = ShareId::new("AbC123");
        assert_eq!(
            LinkService::compose("https://w.example", &id),
            "https://w.example/share/AbC123"
        );
    }
}
