//! In-memory share store backed by a concurrent map.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;

use weightshare_core::error::AppError;
use weightshare_core::result::AppResult;
use weightshare_core::types::ShareId;
use weightshare_entity::share::ShareRecord;

use crate::store::ShareStore;

/// Process-local share store. Contents are lost on restart.
#[derive(Debug, Clone, Default)]
pub struct MemoryShareStore {
    records: Arc<DashMap<ShareId, ShareRecord>>,
}

impl MemoryShareStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records, expired ones included.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records at all.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl ShareStore for MemoryShareStore {
    async fn insert_one(&self, record: &ShareRecord) -> AppResult<()> {
        match self.records.entry(record.share_id.clone()) {
            Entry::Occupied(_) => Err(AppError::conflict(format!(
                "Share id already exists: {}",
                record.share_id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
                Ok(())
            }
        }
    }

    async fn find_one(
        &self,
        share_id: &ShareId,
        created_after: DateTime<Utc>,
    ) -> AppResult<Option<ShareRecord>> {
        Ok(self
            .records
            .get(share_id)
            .filter(|r| r.created_at > created_after)
            .map(|r| r.value().clone()))
    }

    async fn find(
        &self,
        created_after: DateTime<Utc>,
        limit: usize,
    ) -> AppResult<Vec<ShareRecord>> {
        let mut live: Vec<ShareRecord> = self
            .records
            .iter()
            .filter(|r| r.created_at > created_after)
            .map(|r| r.value().clone())
            .collect();
        live.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        live.truncate(limit);
        Ok(live)
    }

    async fn delete_expired(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        let mut removed = 0u64;
        self.records.retain(|_, record| {
            let keep = record.created_at > cutoff;
            if !keep {
                removed += 1;
            }
            keep
        });
        debug!(removed, "Purged expired in-memory shares");
        Ok(removed)
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
