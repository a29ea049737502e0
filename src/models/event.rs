use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Lifecycle state of an event. Any state may move to any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    Received,
    Confirmed,
    Attended,
    Cancelled,
}

impl EventStatus {
    pub const ALL: [EventStatus; 4] = [
        EventStatus::Received,
        EventStatus::Confirmed,
        EventStatus::Attended,
        EventStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Received => "RECEIVED",
            EventStatus::Confirmed => "CONFIRMED",
            EventStatus::Attended => "ATTENDED",
            EventStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidStatus(pub String);

impl fmt::Display for InvalidStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let expected: Vec<&str> = EventStatus::ALL.iter().map(EventStatus::as_str).collect();
        write!(
            f,
            "invalid status '{}', expected one of {}",
            self.0,
            expected.join(", ")
        )
    }
}

impl std::error::Error for InvalidStatus {}

impl FromStr for EventStatus {
    type Err = InvalidStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| InvalidStatus(s.to_string()))
    }
}

/// A stored event row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub description: String,
    #[sqlx(rename = "start_at")]
    pub start: String,
    #[sqlx(rename = "end_at")]
    pub end: String,
    pub location: String,
    pub status: EventStatus,
}

/// Every column of an event except the id, used for create and full replace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub start: String,
    pub end: String,
    pub location: String,
    pub status: EventStatus,
}

/// Columns to overwrite in a partial update. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub location: Option<String>,
    pub status: Option<EventStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parses_upper_case_names() {
        for status in EventStatus::ALL {
            assert_eq!(status.as_str().parse::<EventStatus>(), Ok(status));
        }
    }

    #[test]
    fn test_status_rejects_unknown_and_lower_case() {
        let err = "confirmed".parse::<EventStatus>().unwrap_err();
        assert_eq!(err, InvalidStatus("confirmed".to_string()));
        assert!(err.to_string().contains("RECEIVED, CONFIRMED, ATTENDED, CANCELLED"));
        assert!("DONE".parse::<EventStatus>().is_err());
    }

    #[test]
    fn test_event_serializes_with_public_field_names() {
        let event = Event {
            id: 1,
            title: "Launch".into(),
            description: "Demo".into(),
            start: "2025-04-01 14:00".into(),
            end: "2025-04-01 18:00".into(),
            location: "Hall".into(),
            status: EventStatus::Received,
        };

        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["start"], "2025-04-01 14:00");
        assert_eq!(value["end"], "2025-04-01 18:00");
        assert_eq!(value["status"], "RECEIVED");
    }
}
