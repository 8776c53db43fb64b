//! Share writer: validate a snapshot, allocate an identifier, persist once.

use std::sync::Arc;

use tracing::{error, info, warn};
use validator::Validate;

use weightshare_core::traits::Clock;
use weightshare_database::store::ShareStore;
use weightshare_entity::share::{ShareLink, ShareRecord, SnapshotInput, expiry_cutoff};

use super::error::ShareError;
use super::link::LinkService;
use crate::context::RequestOrigin;

/// Identifier allocations tried before giving up on a create.
pub const MAX_CREATE_ATTEMPTS: u32 = 5;

/// Creates share records and lists live ones.
#[derive(Debug, Clone)]
pub struct ShareService {
    /// Share store.
    store: Arc<dyn ShareStore>,
    /// Identifier and link generation.
    link_service: Arc<LinkService>,
    /// Source of `created_at` stamps.
    clock: Arc<dyn Clock>,
}

impl ShareService {
    /// Creates a new share service.
    pub fn new(
        store: Arc<dyn ShareStore>,
        link_service: Arc<LinkService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            link_service,
            clock,
        }
    }

    /// Persists `snapshot` under a fresh identifier and returns its link.
    ///
    /// Identifier collisions reported by the store are retried with a new
    /// identifier; an existing record is never overwritten.
    pub async fn create_share(
        &self,
        snapshot: SnapshotInput,
        origin: Option<&RequestOrigin>,
    ) -> Result<ShareLink, ShareError> {
        validate_snapshot(&snapshot)?;
        let base = self.link_service.base_for(origin)?;
        let created_at = self.clock.now();

        for attempt in 1..=MAX_CREATE_ATTEMPTS {
            let share_id = self.link_service.generate_id();
            let record = ShareRecord::from_snapshot(share_id.clone(), snapshot.clone(), created_at);

            match self.store.insert_one(&record).await {
                Ok(()) => {
                    info!(
                        share_id = %share_id,
                        entries = record.entries.len(),
                        "Share created"
                    );
                    let share_link = LinkService::compose(&base, &share_id);
                    return Ok(ShareLink {
                        share_id,
                        share_link,
                    });
                }
                Err(e) if e.is_conflict() => {
                    warn!(attempt, share_id = %share_id, "Share id collision, regenerating");
                }
                Err(e) => {
                    error!(error = %e, "Failed to persist share");
                    return Err(ShareError::StoreUnavailable);
                }
            }
        }

        error!(
            attempts = MAX_CREATE_ATTEMPTS,
            "Could not allocate a unique share id"
        );
        Err(ShareError::StoreUnavailable)
    }

    /// Newest live shares, at most `limit`.
    pub async fn list_live(&self, limit: usize) -> Result<Vec<ShareRecord>, ShareError> {
        let cutoff = expiry_cutoff(self.clock.now());
        self.store.find(cutoff, limit).await.map_err(|e| {
            error!(error = %e, "Failed to list shares");
            ShareError::StoreUnavailable
        })
    }
}

/// The single schema check applied to every incoming snapshot.
pub fn validate_snapshot(snapshot: &SnapshotInput) -> Result<(), ShareError> {
    if !snapshot.measurements_are_finite() {
        return Err(ShareError::invalid(
            "Measurements must be finite numbers no greater than 10000",
        ));
    }
    snapshot.validate().map_err(|e| {
        let detail = e.to_string().replace('\n', "; ");
        ShareError::invalid(format!("Invalid snapshot: {detail}"))
    })
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use pretty_assertions::assert_eq;

    use weightshare_core::traits::ManualClock;
    use weightshare_core::types::ShareId;
    use weightshare_database::repositories::MemoryShareStore;
    use weightshare_entity::share::WeightEntry;

    use super::*;
    use crate::share::test_support::{ConflictingStore, UnreachableStore};

    fn service_with(store: Arc<dyn ShareStore>, clock: Arc<ManualClock>) -> ShareService {
        ShareService::new(
            store,
            Arc::new(LinkService::new(Some("https://w.example".to_string()))),
            clock,
        )
    }

    fn example_snapshot() -> SnapshotInput {
        SnapshotInput {
            entries: vec![WeightEntry {
                weight: 80.0,
                date: "2024-01-01T00:00:00Z".parse().expect("date"),
            }],
            start_weight: Some(85.0),
            goal_weight: Some(75.0),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_persists_one_record_with_clock_time() {
        let store = Arc::new(MemoryShareStore::new());
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let service = service_with(store.clone(), clock.clone());

        let link = service
            .create_share(example_snapshot(), None)
            .await
            .expect("create");

        assert_eq!(store.len(), 1);
        assert_eq!(
            link.share_link,
            format!("https://w.example/share/{}", link.share_id)
        );
        let record = store
            .find_one(&link.share_id, clock.now() - Duration::hours(1))
            .await
            .expect("find")
            .expect("present");
        assert_eq!(record.created_at, clock.now());
        assert_eq!(record.snapshot(), example_snapshot());
    }

    #[tokio::test]
    async fn test_sequential_creates_yield_distinct_ids() {
        let store = Arc::new(MemoryShareStore::new());
        let service = service_with(store.clone(), Arc::new(ManualClock::new(Utc::now())));

        let mut ids = std::collections::HashSet::new();
        for _ in 0..1000 {
            let link = service
                .create_share(SnapshotInput::default(), None)
                .await
                .expect("create");
            assert!(ShareId::is_well_formed(link.share_id.as_str()));
            ids.insert(link.share_id);
        }
        assert_eq!(ids.len(), 1000);
        assert_eq!(store.len(), 1000);
    }

    #[tokio::test]
    async fn test_collision_is_retried_with_new_id() {
        let store = Arc::new(ConflictingStore::new(2));
        let service = service_with(store.clone(), Arc::new(ManualClock::new(Utc::now())));

        let link = service
            .create_share(example_snapshot(), None)
            .await
            .expect("create after retries");

        let attempted = store.attempted_ids();
        assert_eq!(attempted.len(), 3);
        assert_eq!(attempted.last(), Some(&link.share_id));
        assert_ne!(attempted[0], link.share_id);
    }

    #[tokio::test]
    async fn test_persistent_collisions_give_up() {
        let store = Arc::new(ConflictingStore::new(u32::MAX));
        let service = service_with(store.clone(), Arc::new(ManualClock::new(Utc::now())));

        let err = service
            .create_share(example_snapshot(), None)
            .await
            .expect_err("exhausted");
        assert_eq!(err, ShareError::StoreUnavailable);
        assert_eq!(store.attempted_ids().len(), MAX_CREATE_ATTEMPTS as usize);
    }

    #[tokio::test]
    async fn test_unreachable_store_is_store_unavailable() {
        let service = service_with(
            Arc::new(UnreachableStore),
            Arc::new(ManualClock::new(Utc::now())),
        );
        let err = service
            .create_share(example_snapshot(), None)
            .await
            .expect_err("store down");
        assert_eq!(err, ShareError::StoreUnavailable);
        assert!(!err.to_string().contains("connection refused"));
    }

    #[tokio::test]
    async fn test_invalid_snapshot_is_rejected_before_writing() {
        let store = Arc::new(MemoryShareStore::new());
        let service = service_with(store.clone(), Arc::new(ManualClock::new(Utc::now())));

        let snapshot = SnapshotInput {
            goal_weight: Some(-3.0),
            ..Default::default()
        };
        let err = service
            .create_share(snapshot, None)
            .await
            .expect_err("invalid");
        assert!(matches!(err, ShareError::InvalidInput(_)));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_missing_host_writes_nothing() {
        let store = Arc::new(MemoryShareStore::new());
        let service = ShareService::new(
            store.clone(),
            Arc::new(LinkService::new(None)),
            Arc::new(ManualClock::new(Utc::now())),
        );
        let err = service
            .create_share(example_snapshot(), None)
            .await
            .expect_err("no base");
        assert!(matches!(err, ShareError::InvalidInput(_)));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_request_origin_used_when_unconfigured() {
        let service = ShareService::new(
            Arc::new(MemoryShareStore::new()),
            Arc::new(LinkService::new(None)),
            Arc::new(ManualClock::new(Utc::now())),
        );
        let origin = RequestOrigin::new("http", "localhost:8080");
        let link = service
            .create_share(example_snapshot(), Some(&origin))
            .await
            .expect("create");
        assert!(link.share_link.starts_with("http://localhost:8080/share/"));
    }

    #[tokio::test]
    async fn test_list_live_skips_expired() {
        let store = Arc::new(MemoryShareStore::new());
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let service = service_with(store.clone(), clock.clone());

        service
            .create_share(example_snapshot(), None)
            .await
            .expect("create");
        clock.advance(Duration::hours(25));
        let fresh = service
            .create_share(example_snapshot(), None)
            .await
            .expect("create");

        let live = service.list_live(10).await.expect("list");
        assert_eq!(live.len(), 1);
        assert_eq!(live[0].share_id, fresh.share_id);
    }
}
