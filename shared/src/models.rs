use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::RepairRecord;

/// Repair identifier. The endpoint normally sends an integer or a string;
/// anything else is carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventId {
    Number(i64),
    Text(String),
    Other(Value),
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
            Self::Other(v) => write!(f, "{}", v),
        }
    }
}

/// Event in the shape the calendar widget consumes.
///
/// Absent fields are left out of the serialized object so the widget sees
/// them as `undefined`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CalendarEvent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<EventId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Background and text colour for a repair, keyed on whether it is active.
fn palette(active: bool) -> (&'static str, &'static str) {
    if active {
        ("green", "white")
    } else {
        ("grey", "black")
    }
}

/// Options for turning records into events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventMapping {
    /// Prefix joined with the repair id to build a click-through link,
    /// e.g. `repairs/` gives `repairs/42`.
    pub detail_url_prefix: Option<String>,
}

impl EventMapping {
    pub fn map_record(&self, record: RepairRecord) -> CalendarEvent {
        let url = match (&self.detail_url_prefix, &record.repair_id) {
            (Some(prefix), Some(id)) => Some(format!("{}{}", prefix, id)),
            _ => None,
        };
        let (color, text_color) = match record.active.as_ref().and_then(Value::as_bool).map(palette) {
            Some((bg, fg)) => (Some(bg.to_string()), Some(fg.to_string())),
            None => (None, None),
        };

        CalendarEvent {
            id: record.repair_id,
            start: record.start_date,
            end: record.end_date,
            title: record.car_name,
            color,
            text_color,
            url,
        }
    }

    /// Maps records one to one, preserving order.
    pub fn map_records(&self, records: Vec<RepairRecord>) -> Vec<CalendarEvent> {
        records.into_iter().map(|r| self.map_record(r)).collect()
    }
}
