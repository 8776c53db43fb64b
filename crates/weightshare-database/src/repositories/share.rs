//! PostgreSQL share store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};

use weightshare_core::error::{AppError, ErrorKind};
use weightshare_core::result::AppResult;
use weightshare_core::types::ShareId;
use weightshare_entity::share::{ShareRecord, WeightEntry};

use crate::store::ShareStore;

/// Hard ceiling on rows returned by [`ShareStore::find`].
const MAX_LIST_LIMIT: i64 = 1000;

/// Repository for share inserts, lookups, and expiry sweeps.
#[derive(Debug, Clone)]
pub struct ShareRepository {
    pool: PgPool,
}

/// Column layout of the `shares` table.
#[derive(Debug, FromRow)]
struct ShareRow {
    share_id: String,
    shared_by: Option<String>,
    entries: Json<Vec<WeightEntry>>,
    start_weight: Option<f64>,
    goal_weight: Option<f64>,
    height: Option<f64>,
    theme: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<ShareRow> for ShareRecord {
    fn from(row: ShareRow) -> Self {
        Self {
            share_id: ShareId::new(row.share_id),
            shared_by: row.shared_by,
            entries: row.entries.0,
            start_weight: row.start_weight,
            goal_weight: row.goal_weight,
            height: row.height,
            theme: row.theme,
            created_at: row.created_at,
        }
    }
}

impl ShareRepository {
    /// Create a new share repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShareStore for ShareRepository {
    async fn insert_one(&self, record: &ShareRecord) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO shares (share_id, shared_by, entries, start_weight, goal_weight, \
             height, theme, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(record.share_id.as_str())
        .bind(&record.shared_by)
        .bind(Json(&record.entries))
        .bind(record.start_weight)
        .bind(record.goal_weight)
        .bind(record.height)
        .bind(&record.theme)
        .bind(record.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to insert share", e))?;
        Ok(())
    }

    async fn find_one(
        &self,
        share_id: &ShareId,
        created_after: DateTime<Utc>,
    ) -> AppResult<Option<ShareRecord>> {
        sqlx::query_as::<_, ShareRow>(
            "SELECT * FROM shares WHERE share_id = $1 AND created_at > $2",
        )
        .bind(share_id.as_str())
        .bind(created_after)
        .fetch_optional(&self.pool)
        .await
        .map(|row| row.map(ShareRecord::from))
        .map_err(|e| map_sqlx_error("Failed to find share", e))
    }

    async fn find(
        &self,
        created_after: DateTime<Utc>,
        limit: usize,
    ) -> AppResult<Vec<ShareRecord>> {
        let limit = i64::try_from(limit)
            .unwrap_or(MAX_LIST_LIMIT)
            .min(MAX_LIST_LIMIT);
        let rows = sqlx::query_as::<_, ShareRow>(
            "SELECT * FROM shares WHERE created_at > $1 ORDER BY created_at DESC LIMIT $2",
        )
        .bind(created_after)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to list shares", e))?;

        Ok(rows.into_iter().map(ShareRecord::from).collect())
    }

    async fn delete_expired(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM shares WHERE created_at <= $1")
            .bind(cutoff)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to delete expired shares", e))?;
        Ok(result.rows_affected())
    }

    async fn health_check(&self) -> AppResult<bool> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|v| v == 1)
            .map_err(|e| map_sqlx_error("Health check failed", e))
    }
}

/// Classify a driver error: duplicate keys become `Conflict`, connectivity
/// problems `ServiceUnavailable`, everything else `Database`.
fn map_sqlx_error(context: &str, err: sqlx::Error) -> AppError {
    let kind = classify(&err);
    AppError::with_source(kind, format!("{context}: {err}"), err)
}

fn classify(err: &sqlx::Error) -> ErrorKind {
    match err {
        sqlx::Error::Database(db) if db.is_unique_violation() => ErrorKind::Conflict,
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            ErrorKind::ServiceUnavailable
        }
        _ => ErrorKind::Database,
    }
}

#[cfg(test)]
mod tests {
    use std::fmt;

    use chrono::{Duration, SubsecRound};
    use sqlx::error::{DatabaseError, ErrorKind as DbErrorKind};

    use weightshare_core::config::DatabaseConfig;
    use weightshare_entity::share::SnapshotInput;

    use super::*;
    use crate::connection::DatabasePool;
    use crate::migration::run_migrations;

    /// Driver error reporting SQLSTATE 23505.
    #[derive(Debug)]
    struct UniqueViolation;

    impl fmt::Display for UniqueViolation {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("duplicate key value violates unique constraint \"shares_pkey\"")
        }
    }

    impl std::error::Error for UniqueViolation {}

    impl DatabaseError for UniqueViolation {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint \"shares_pkey\""
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> DbErrorKind {
            DbErrorKind::UniqueViolation
        }
    }

    #[test]
    fn test_unique_violation_is_conflict() {
        let err = map_sqlx_error(
            "Failed to insert share",
            sqlx::Error::Database(Box::new(UniqueViolation)),
        );
        assert!(err.is_conflict());
    }

    fn record(id: &str, created_at: DateTime<Utc>) -> ShareRecord {
        ShareRecord::from_snapshot(ShareId::new(id), SnapshotInput::default(), created_at)
    }

    /// Fresh id per run so reruns against the same database don't collide.
    fn unique_id(prefix: &str) -> String {
        format!("{prefix}-{}", Utc::now().timestamp_micros())
    }

    async fn live_repository() -> (DatabasePool, ShareRepository) {
        let url = std::env::var("WEIGHTSHARE_TEST_DATABASE_URL")
            .expect("WEIGHTSHARE_TEST_DATABASE_URL must be set");
        let config = DatabaseConfig {
            url,
            ..DatabaseConfig::default()
        };
        let db = DatabasePool::connect_lazy(&config).expect("pool");
        run_migrations(db.pool()).await.expect("migrations");
        let repo = ShareRepository::new(db.pool().clone());
        (db, repo)
    }

    /// Run with: WEIGHTSHARE_TEST_DATABASE_URL=postgres://... cargo test -p weightshare-database -- --ignored
    #[tokio::test]
    #[ignore = "Requires WEIGHTSHARE_TEST_DATABASE_URL"]
    async fn test_postgres_duplicate_insert_is_conflict() {
        let (db, repo) = live_repository().await;
        let now = Utc::now().trunc_subsecs(3);
        let id = unique_id("dup");

        repo.insert_one(&record(&id, now)).await.expect("first insert");
        let err = repo
            .insert_one(&record(&id, now))
            .await
            .expect_err("second insert");
        assert!(err.is_conflict(), "unexpected error: {err}");

        repo.delete_expired(now + Duration::seconds(1))
            .await
            .expect("cleanup");
        db.close().await;
    }

    #[tokio::test]
    #[ignore = "Requires WEIGHTSHARE_TEST_DATABASE_URL"]
    async fn test_postgres_find_one_excludes_records_at_cutoff() {
        let (db, repo) = live_repository().await;
        let created = Utc::now().trunc_subsecs(3) - Duration::hours(30);
        let id = unique_id("cutoff");
        repo.insert_one(&record(&id, created)).await.expect("insert");
        let share_id = ShareId::new(id.as_str());

        let before = repo
            .find_one(&share_id, created - Duration::seconds(1))
            .await
            .expect("find");
        assert_eq!(before.map(|r| r.share_id), Some(share_id.clone()));

        let at = repo.find_one(&share_id, created).await.expect("find");
        assert!(at.is_none());

        repo.delete_expired(created).await.expect("cleanup");
        db.close().await;
    }

    #[test]
    fn test_pool_timeout_is_service_unavailable() {
        assert_eq!(
            classify(&sqlx::Error::PoolTimedOut),
            ErrorKind::ServiceUnavailable
        );
    }

    #[test]
    fn test_missing_row_is_database_error() {
        assert_eq!(classify(&sqlx::Error::RowNotFound), ErrorKind::Database);
    }

    #[test]
    fn test_mapped_error_keeps_context() {
        let err = map_sqlx_error("Failed to insert share", sqlx::Error::PoolTimedOut);
        assert!(err.message.starts_with("Failed to insert share"));
        assert!(err.source.is_some());
    }
}
