//! Share reader: public, unauthenticated lookup of live snapshots.

use std::sync::Arc;

use tracing::{debug, error};

use weightshare_core::traits::Clock;
use weightshare_core::types::ShareId;
use weightshare_database::store::ShareStore;
use weightshare_entity::share::{ShareRecord, expiry_cutoff};

use super::error::ShareError;

/// Handles public share lookups.
#[derive(Debug, Clone)]
pub struct AccessService {
    /// Share store.
    store: Arc<dyn ShareStore>,
    /// Decides which records have expired.
    clock: Arc<dyn Clock>,
}

impl AccessService {
    /// Creates a new access service.
    pub fn new(store: Arc<dyn ShareStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Returns the live record for `share_id`.
    ///
    /// Only the empty string is rejected as input. Unknown, expired, and
    /// oddly shaped identifiers all yield [`ShareError::NotFound`].
    pub async fn get_share(&self, share_id: &str) -> Result<ShareRecord, ShareError> {
        if share_id.is_empty() {
            return Err(ShareError::invalid("shareId must not be empty"));
        }

        let cutoff = expiry_cutoff(self.clock.now());
        let found = self
            .store
            .find_one(&ShareId::new(share_id), cutoff)
            .await
            .map_err(|e| {
                error!(error = %e, share_id, "Failed to look up share");
                ShareError::StoreUnavailable
            })?;

        match found {
            Some(record) => Ok(record),
            None => {
                debug!(share_id, "No live share");
                Err(ShareError::NotFound)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use pretty_assertions::assert_eq;

    use weightshare_core::traits::ManualClock;
    use weightshare_database::repositories::MemoryShareStore;
    use weightshare_entity::share::{SnapshotInput, WeightEntry};

    use super::*;
    use crate::share::link::LinkService;
    use crate::share::service::ShareService;
    use crate::share::test_support::UnreachableStore;

    struct Fixture {
        writer: ShareService,
        reader: AccessService,
        clock: Arc<ManualClock>,
        store: Arc<MemoryShareStore>,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(MemoryShareStore::new());
        let clock = Arc::new(ManualClock::new(Utc::now()));
        Fixture {
            writer: ShareService::new(
                store.clone(),
                Arc::new(LinkService::new(Some("https://w.example".to_string()))),
                clock.clone(),
            ),
            reader: AccessService::new(store.clone(), clock.clone()),
            clock,
            store,
        }
    }

    fn snapshot() -> SnapshotInput {
        SnapshotInput {
            shared_by: Some("alex".to_string()),
            entries: vec![
                WeightEntry {
                    weight: 80.0,
                    date: "2024-01-01T00:00:00Z".parse().expect("date"),
                },
                WeightEntry {
                    weight: 79.2,
                    date: "2024-01-08T00:00:00Z".parse().expect("date"),
                },
            ],
            start_weight: Some(85.0),
            goal_weight: Some(75.0),
            height: Some(180.0),
            theme: Some("dark".to_string()),
        }
    }

    #[tokio::test]
    async fn test_round_trip_returns_submitted_snapshot() {
        let f = fixture();
        let link = f.writer.create_share(snapshot(), None).await.expect("create");

        let record = f.reader.get_share(link.share_id.as_str()).await.expect("get");
        assert_eq!(record.share_id, link.share_id);
        assert_eq!(record.snapshot(), snapshot());
        assert_eq!(record.created_at, f.clock.now());
    }

    #[tokio::test]
    async fn test_repeated_reads_are_identical() {
        let f = fixture();
        let link = f.writer.create_share(snapshot(), None).await.expect("create");

        let first = f.reader.get_share(link.share_id.as_str()).await.expect("get");
        let second = f.reader.get_share(link.share_id.as_str()).await.expect("get");
        assert_eq!(first, second);
        assert_eq!(f.store.len(), 1);
    }

    #[tokio::test]
    async fn test_visible_until_just_before_24_hours() {
        let f = fixture();
        let link = f.writer.create_share(snapshot(), None).await.expect("create");

        f.clock.advance(Duration::hours(23) + Duration::minutes(59));
        assert!(f.reader.get_share(link.share_id.as_str()).await.is_ok());

        f.clock.advance(Duration::minutes(2));
        assert_eq!(
            f.reader.get_share(link.share_id.as_str()).await,
            Err(ShareError::NotFound)
        );
    }

    #[tokio::test]
    async fn test_expired_and_unknown_are_indistinguishable() {
        let f = fixture();
        let link = f.writer.create_share(snapshot(), None).await.expect("create");
        f.clock.advance(Duration::hours(48));

        let expired = f.reader.get_share(link.share_id.as_str()).await;
        let unknown = f.reader.get_share("does-not-exist").await;
        assert_eq!(expired, Err(ShareError::NotFound));
        assert_eq!(expired, unknown);
    }

    #[tokio::test]
    async fn test_empty_id_is_invalid_input() {
        let f = fixture();
        assert!(matches!(
            f.reader.get_share("").await,
            Err(ShareError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_whitespace_id_is_not_found() {
        let f = fixture();
        f.writer.create_share(snapshot(), None).await.expect("create");
        assert_eq!(f.reader.get_share("  ").await, Err(ShareError::NotFound));
    }

    #[tokio::test]
    async fn test_unreachable_store_is_store_unavailable() {
        let reader = AccessService::new(
            Arc::new(UnreachableStore),
            Arc::new(ManualClock::new(Utc::now())),
        );
        assert_eq!(
            reader.get_share("anything").await,
            Err(ShareError::StoreUnavailable)
        );
    }
}
