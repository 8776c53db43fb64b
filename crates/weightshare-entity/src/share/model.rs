//! Share record entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use weightshare_core::types::ShareId;

use super::expiry;
use super::snapshot::{SnapshotInput, WeightEntry};

/// An immutable, publicly readable snapshot of a user's tracker data.
///
/// Records are only ever inserted; nothing updates one after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareRecord {
    /// Unique public identifier.
    pub share_id: ShareId,
    /// Display name of the person who shared.
    pub shared_by: Option<String>,
    /// Copied weigh-ins.
    pub entries: Vec<WeightEntry>,
    /// Weight at the start of tracking.
    pub start_weight: Option<f64>,
    /// Target weight.
    pub goal_weight: Option<f64>,
    /// Height of the person who shared.
    pub height: Option<f64>,
    /// Presentation preference.
    pub theme: Option<String>,
    /// When the record was written; anchors the expiry window.
    pub created_at: DateTime<Utc>,
}

impl ShareRecord {
    /// Builds a record from a validated snapshot.
    pub fn from_snapshot(
        share_id: ShareId,
        snapshot: SnapshotInput,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            share_id,
            shared_by: snapshot.shared_by,
            entries: snapshot.entries,
            start_weight: snapshot.start_weight,
            goal_weight: snapshot.goal_weight,
            height: snapshot.height,
            theme: snapshot.theme,
            created_at,
        }
    }

    /// The snapshot portion of the record, without id or timestamp.
    pub fn snapshot(&self) -> SnapshotInput {
        SnapshotInput {
            shared_by: self.shared_by.clone(),
            entries: self.entries.clone(),
            start_weight: self.start_weight,
            goal_weight: self.goal_weight,
            height: self.height,
            theme: self.theme.clone(),
        }
    }

    /// The first instant at which this record is no longer readable.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.created_at + expiry::share_ttl()
    }

    /// Whether the record is still readable at `now`.
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        expiry::is_live(self.created_at, now)
    }
}
