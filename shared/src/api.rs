use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::EventId;

// ============================================================================
// Upstream Wire Types
// ============================================================================

/// One repair as returned by the events endpoint.
///
/// Records are not validated: values are carried through as sent, whatever
/// their JSON type, and a missing field produces an event without it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepairRecord {
    pub repair_id: Option<EventId>,
    pub start_date: Option<Value>,
    pub end_date: Option<Value>,
    pub car_name: Option<Value>,
    pub active: Option<Value>,
}

impl RepairRecord {
    /// Reads one element of the response array. An element that is not an
    /// object yields an empty record rather than failing the batch.
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }
}

// ============================================================================
// Widget Request Types
// ============================================================================

/// Subset of the widget's `fetchInfo` argument that we read.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchInfo {
    pub start_str: String,
    pub end_str: String,
}

/// Date range the widget asked for. Logged, never sent upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl FetchRange {
    pub fn parse(start: &str, end: &str) -> Option<Self> {
        Some(Self {
            start: parse_boundary(start)?,
            end: parse_boundary(end)?,
        })
    }

    /// Number of days covered; the end bound is exclusive.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

impl FetchInfo {
    pub fn range(&self) -> Option<FetchRange> {
        FetchRange::parse(&self.start_str, &self.end_str)
    }
}

/// Accepts the three shapes the widget emits: with offset, floating, date only.
fn parse_boundary(value: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}
