//! Share store trait and the startup-selected backend.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::info;

use weightshare_core::config::{DatabaseConfig, StoreBackend};
use weightshare_core::result::AppResult;
use weightshare_core::types::ShareId;
use weightshare_entity::share::ShareRecord;

use crate::connection::DatabasePool;
use crate::migration;
use crate::repositories::{MemoryShareStore, ShareRepository};

/// Document-style persistence for share records.
///
/// Every read takes an explicit `created_after` bound so that expiry is
/// decided by the caller's clock, not the backend's.
#[async_trait]
pub trait ShareStore: Send + Sync + fmt::Debug + 'static {
    /// Insert a new record.
    ///
    /// Fails with [`ErrorKind::Conflict`](weightshare_core::error::ErrorKind::Conflict)
    /// if a record with the same id already exists; the existing record is
    /// left untouched.
    async fn insert_one(&self, record: &ShareRecord) -> AppResult<()>;

    /// Find the record with exactly this id, if it was created after
    /// `created_after`.
    async fn find_one(
        &self,
        share_id: &ShareId,
        created_after: DateTime<Utc>,
    ) -> AppResult<Option<ShareRecord>>;

    /// Newest records created after `created_after`, at most `limit`.
    async fn find(
        &self,
        created_after: DateTime<Utc>,
        limit: usize,
    ) -> AppResult<Vec<ShareRecord>>;

    /// Delete records created at or before `cutoff`. Returns the count.
    async fn delete_expired(&self, cutoff: DateTime<Utc>) -> AppResult<u64>;

    /// Whether the backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}

/// The process-wide share store, chosen from configuration at startup.
#[derive(Debug, Clone)]
pub struct ShareStoreManager {
    /// The selected backend.
    inner: Arc<dyn ShareStore>,
    /// The PostgreSQL pool, when that backend is selected.
    pool: Option<DatabasePool>,
}

impl ShareStoreManager {
    /// Create the configured backend.
    ///
    /// The PostgreSQL pool is created lazily; no connection is opened here.
    pub fn new(config: &DatabaseConfig) -> AppResult<Self> {
        match config.backend {
            StoreBackend::Postgres => {
                info!("Initializing PostgreSQL share store");
                let pool = DatabasePool::connect_lazy(config)?;
                let repo = ShareRepository::new(pool.pool().clone());
                Ok(Self {
                    inner: Arc::new(repo),
                    pool: Some(pool),
                })
            }
            StoreBackend::Memory => {
                info!("Initializing in-memory share store");
                Ok(Self::from_store(Arc::new(MemoryShareStore::new())))
            }
        }
    }

    /// Wrap an existing store (for testing).
    pub fn from_store(store: Arc<dyn ShareStore>) -> Self {
        Self {
            inner: store,
            pool: None,
        }
    }

    /// Shared handle to the selected backend.
    pub fn store(&self) -> Arc<dyn ShareStore> {
        Arc::clone(&self.inner)
    }

    /// The PostgreSQL pool, if that backend is in use.
    pub fn pool(&self) -> Option<&DatabasePool> {
        self.pool.as_ref()
    }

    /// Apply pending migrations. A no-op for the in-memory backend.
    pub async fn migrate(&self) -> AppResult<()> {
        match &self.pool {
            Some(pool) => migration::run_migrations(pool.pool()).await,
            None => Ok(()),
        }
    }

    /// Close pooled connections, if any.
    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
        }
    }
}

#[async_trait]
impl ShareStore for ShareStoreManager {
    async fn insert_one(&self, record: &ShareRecord) -> AppResult<()> {
        self.inner.insert_one(record).await
    }

    async fn find_one(
        &self,
        share_id: &ShareId,
        created_after: DateTime<Utc>,
    ) -> AppResult<Option<ShareRecord>> {
        self.inner.find_one(share_id, created_after).await
    }

    async fn find(
        &self,
        created_after: DateTime<Utc>,
        limit: usize,
    ) -> AppResult<Vec<ShareRecord>> {
        self.inner.find(created_after, limit).await
    }

    async fn delete_expired(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        self.inner.delete_expired(cutoff).await
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.inner.health_check().await
    }
}
