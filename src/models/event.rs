//! Event model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::utils::errors::{ApiError, Result};

pub const EVENT_NOT_FOUND: &str = "Event not found.";
pub const DUPLICATE_EVENT: &str =
    "You have already created an event with this title, location, and start date/time.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub location: String,
    pub start_datetime: DateTime<Utc>,
    pub end_datetime: Option<DateTime<Utc>>,
    pub description: Option<String>,
    pub view_public: Option<bool>,
}

/// Admin listing projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct EventSummary {
    pub id: Uuid,
    pub title: String,
    pub start_datetime: DateTime<Utc>,
    pub end_datetime: Option<DateTime<Utc>>,
    pub view_public: Option<bool>,
}

/// Projection returned for a user's upcoming RSVPed events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingEvent {
    pub id: Uuid,
    pub title: String,
    pub start_datetime: DateTime<Utc>,
    pub end_datetime: Option<DateTime<Utc>>,
}

/// Body of both event creation and event replacement.
///
/// Replacement is wholesale: an optional field left out of the body is
/// cleared on the stored event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRequest {
    pub title: String,
    pub location: String,
    pub start_datetime: DateTime<Utc>,
    pub end_datetime: Option<DateTime<Utc>>,
    pub description: Option<String>,
    pub view_public: Option<bool>,
}

impl EventRequest {
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(ApiError::InvalidInput("Event title is required.".to_string()));
        }
        if self.location.trim().is_empty() {
            return Err(ApiError::InvalidInput("Event location is required.".to_string()));
        }
        Ok(())
    }

    /// Build the stored record for a freshly created event
    pub fn into_event(self, id: Uuid) -> Event {
        Event {
            id,
            title: self.title,
            location: self.location,
            start_datetime: self.start_datetime,
            end_datetime: self.end_datetime,
            description: self.description,
            view_public: self.view_public,
        }
    }
}

impl Event {
    /// Identity triple used for duplicate detection
    pub fn same_identity(&self, title: &str, location: &str, start: DateTime<Utc>) -> bool {
        self.title == title && self.location == location && self.start_datetime == start
    }

    pub fn summary(&self) -> EventSummary {
        EventSummary {
            id: self.id,
            title: self.title.clone(),
            start_datetime: self.start_datetime,
            end_datetime: self.end_datetime,
            view_public: self.view_public,
        }
    }

    pub fn upcoming(&self) -> UpcomingEvent {
        UpcomingEvent {
            id: self.id,
            title: self.title.clone(),
            start_datetime: self.start_datetime,
            end_datetime: self.end_datetime,
        }
    }
}
