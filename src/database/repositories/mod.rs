//! Database repositories module
//!
//! Store traits shared by every backend, and the PostgreSQL repositories
//! implementing them.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{
    CreateRsvpRequest, Event, EventRequest, EventSummary, NewOrder, Order, Rsvp, UpcomingEvent,
    UpdateRsvpRequest,
};
use crate::utils::errors::{ApiError, Result};

pub mod event;
pub mod order;
pub mod rsvp;

// Re-export repositories
pub use event::EventRepository;
pub use order::OrderRepository;
pub use rsvp::RsvpRepository;

#[async_trait]
pub trait EventStore: Send + Sync {
    /// All events in insertion order, optionally only the public ones
    async fn list(&self, visible_only: bool) -> Result<Vec<Event>>;

    async fn list_summaries(&self) -> Result<Vec<EventSummary>>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>>;

    async fn find_by_identity(
        &self,
        title: &str,
        location: &str,
        start_datetime: DateTime<Utc>,
    ) -> Result<Option<Event>>;

    /// Fails with `Conflict` when the identity triple is already taken
    async fn create(&self, request: &EventRequest) -> Result<Event>;

    /// Returns `None` when no event has this id
    async fn replace(&self, id: Uuid, request: &EventRequest) -> Result<Option<Event>>;

    /// Deletes the event and every RSVP referencing it as one unit.
    /// Returns the number of RSVPs removed, or `None` when the event is absent.
    async fn delete_with_rsvps(&self, id: Uuid) -> Result<Option<u64>>;

    /// Events among `ids` starting at or after `now`
    async fn list_upcoming(&self, ids: &[Uuid], now: DateTime<Utc>) -> Result<Vec<UpcomingEvent>>;
}

#[async_trait]
pub trait RsvpStore: Send + Sync {
    async fn list_by_event(&self, event_id: Uuid) -> Result<Vec<Rsvp>>;

    async fn list_event_ids_for_user(&self, user_id: &str) -> Result<Vec<Uuid>>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Rsvp>>;

    async fn find_by_event_and_user(&self, event_id: Uuid, user_id: &str) -> Result<Option<Rsvp>>;

    /// Fails with `Conflict` when the user already answered for this event
    async fn create(&self, request: &CreateRsvpRequest) -> Result<Rsvp>;

    async fn update(&self, id: Uuid, request: &UpdateRsvpRequest) -> Result<Option<Rsvp>>;

    async fn delete(&self, id: Uuid) -> Result<bool>;
}

#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn find_by_fs_id(&self, fs_id: &str) -> Result<Option<Order>>;

    /// Fails with `Conflict` when the external order was already recorded
    async fn create(&self, order: NewOrder) -> Result<Order>;
}

/// Map a unique constraint violation to `Conflict`, anything else to a store failure
pub(crate) fn conflict_on_unique(message: &'static str) -> impl FnOnce(sqlx::Error) -> ApiError {
    move |err| match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            ApiError::Conflict(message.to_string())
        }
        _ => ApiError::Database(err),
    }
}
