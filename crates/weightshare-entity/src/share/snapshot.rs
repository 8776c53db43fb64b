//! The tracker snapshot a client submits for sharing.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

/// Upper bound for any weight or height value.
const MAX_MEASUREMENT: f64 = 10_000.0;

/// A single weigh-in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct WeightEntry {
    /// Recorded weight.
    #[validate(range(
        exclusive_min = 0.0,
        max = 10_000.0,
        message = "weight must be positive and at most 10000"
    ))]
    pub weight: f64,
    /// When the weight was recorded.
    #[serde(deserialize_with = "deserialize_entry_date")]
    pub date: DateTime<Utc>,
}

/// Tracker data submitted to the share writer.
///
/// Every field is optional; `entries` defaults to an empty list. Any
/// client-supplied identifier or timestamp is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotInput {
    /// Display name of the person sharing.
    #[validate(length(max = 100, message = "sharedBy must be at most 100 characters"))]
    pub shared_by: Option<String>,
    /// Weigh-ins, in the order the client keeps them.
    #[serde(default)]
    #[validate(length(max = 5000, message = "at most 5000 entries can be shared"), nested)]
    pub entries: Vec<WeightEntry>,
    /// Weight at the start of tracking.
    #[validate(range(
        exclusive_min = 0.0,
        max = 10_000.0,
        message = "startWeight must be positive and at most 10000"
    ))]
    pub start_weight: Option<f64>,
    /// Target weight.
    #[validate(range(
        exclusive_min = 0.0,
        max = 10_000.0,
        message = "goalWeight must be positive and at most 10000"
    ))]
    pub goal_weight: Option<f64>,
    /// Height of the person sharing.
    #[validate(range(
        exclusive_min = 0.0,
        max = 10_000.0,
        message = "height must be positive and at most 10000"
    ))]
    pub height: Option<f64>,
    /// Presentation preference, e.g. `"dark"`.
    #[validate(length(max = 32, message = "theme must be at most 32 characters"))]
    pub theme: Option<String>,
}

impl SnapshotInput {
    /// Whether every numeric field is finite and within range.
    ///
    /// JSON cannot carry NaN or infinity, but snapshots built in code can.
    pub fn measurements_are_finite(&self) -> bool {
        let scalars = [self.start_weight, self.goal_weight, self.height];
        scalars
            .iter()
            .flatten()
            .chain(self.entries.iter().map(|e| &e.weight))
            .all(|v| v.is_finite() && *v <= MAX_MEASUREMENT)
    }
}

/// Parses an entry date from RFC 3339, `YYYY-MM-DDTHH:MM:SS`, or a plain
/// `YYYY-MM-DD` calendar date (taken as midnight UTC).
pub fn parse_entry_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn deserialize_entry_date<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawDate {
        Text(String),
        Millis(i64),
    }

    match RawDate::deserialize(deserializer)? {
        RawDate::Text(text) => {
            parse_entry_date(&text).ok_or_else(|| D::Error::custom(format!("invalid date '{text}'")))
        }
        RawDate::Millis(ms) => DateTime::from_timestamp_millis(ms)
            .ok_or_else(|| D::Error::custom(format!("timestamp out of range: {ms}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_plain_date_is_midnight_utc() {
        assert_eq!(
            parse_entry_date("2024-01-01"),
            Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_parse_rfc3339_with_offset() {
        assert_eq!(
            parse_entry_date("2024-03-10T08:30:00+02:00"),
            Some(Utc.with_ymd_and_hms(2024, 3, 10, 6, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_entry_date("yesterday"), None);
        assert_eq!(parse_entry_date("2024-13-01"), None);
    }

    #[test]
    fn test_deserialize_camel_case_snapshot() {
        let snapshot: SnapshotInput = serde_json::from_value(serde_json::json!({
            "sharedBy": "sam",
            "entries": [
                { "weight": 80, "date": "2024-01-01" },
                { "weight": 79.4, "date": 1704153600000_i64 }
            ],
            "startWeight": 85,
            "goalWeight": 75,
            "theme": "dark",
            "shareId": "client-chosen"
        }))
        .expect("parse");

        assert_eq!(snapshot.shared_by.as_deref(), Some("sam"));
        assert_eq!(snapshot.entries.len(), 2);
        assert_eq!(snapshot.entries[0].weight, 80.0);
        assert_eq!(
            snapshot.entries[1].date,
            Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap()
        );
        assert_eq!(snapshot.start_weight, Some(85.0));
        assert_eq!(snapshot.height, None);
        assert!(snapshot.validate().is_ok());
    }

    #[test]
    fn test_entries_default_to_empty() {
        let snapshot: SnapshotInput = serde_json::from_str("{}").expect("parse");
        assert!(snapshot.entries.is_empty());
        assert!(snapshot.validate().is_ok());
    }

    #[test]
    fn test_bad_entry_date_fails_to_parse() {
        let result: Result<SnapshotInput, _> = serde_json::from_value(serde_json::json!({
            "entries": [{ "weight": 80, "date": "not a date" }]
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_rejects_non_positive_weight() {
        let snapshot = SnapshotInput {
            entries: vec![WeightEntry {
                weight: 0.0,
                date: Utc::now(),
            }],
            ..Default::default()
        };
        assert!(snapshot.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_long_theme() {
        let snapshot = SnapshotInput {
            theme: Some("x".repeat(33)),
            ..Default::default()
        };
        assert!(snapshot.validate().is_err());
    }

    #[test]
    fn test_measurements_are_finite() {
        let mut snapshot = SnapshotInput {
            goal_weight: Some(70.0),
            ..Default::default()
        };
        assert!(snapshot.measurements_are_finite());

        snapshot.goal_weight = Some(f64::NAN);
        assert!(!snapshot.measurements_are_finite());
    }
}
