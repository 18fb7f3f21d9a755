//! Database service layer
//!
//! This module provides the domain operations behind every endpoint on top
//! of whichever store backend was selected at startup.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::database::memory::MemoryStore;
use crate::database::repositories::{
    EventRepository, EventStore, OrderRepository, OrderStore, RsvpRepository, RsvpStore,
};
use crate::database::DatabasePool;
use crate::models::event::{DUPLICATE_EVENT, EVENT_NOT_FOUND};
use crate::models::order::{DUPLICATE_ORDER, PLACEHOLDER_ORDER_OWNER};
use crate::models::rsvp::{DUPLICATE_RSVP, NOT_RSVP_OWNER, RSVP_NOT_FOUND};
use crate::models::*;
use crate::utils::errors::{ApiError, Result};
use crate::utils::helpers::parse_id;

#[derive(Clone)]
pub struct DatabaseService {
    pub events: Arc<dyn EventStore>,
    pub rsvps: Arc<dyn RsvpStore>,
    pub orders: Arc<dyn OrderStore>,
    public_events_visible_only: bool,
}

impl DatabaseService {
    pub fn new(
        events: Arc<dyn EventStore>,
        rsvps: Arc<dyn RsvpStore>,
        orders: Arc<dyn OrderStore>,
    ) -> Self {
        Self {
            events,
            rsvps,
            orders,
            public_events_visible_only: false,
        }
    }

    /// Service backed by PostgreSQL repositories
    pub fn postgres(pool: DatabasePool) -> Self {
        Self::new(
            Arc::new(EventRepository::new(pool.clone())),
            Arc::new(RsvpRepository::new(pool.clone())),
            Arc::new(OrderRepository::new(pool)),
        )
    }

    /// Service backed by a fresh in-memory store
    pub fn memory() -> Self {
        let store = MemoryStore::new();
        Self::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store),
        )
    }

    /// Only list events flagged `viewPublic` on the public listing
    pub fn with_public_events_visible_only(mut self, enabled: bool) -> Self {
        self.public_events_visible_only = enabled;
        self
    }

    pub async fn list_public_events(&self) -> Result<Vec<Event>> {
        self.events.list(self.public_events_visible_only).await
    }

    pub async fn list_admin_events(&self) -> Result<Vec<EventSummary>> {
        self.events.list_summaries().await
    }

    pub async fn get_event(&self, id: &str) -> Result<Event> {
        let Some(id) = parse_id(id) else {
            return Err(ApiError::NotFound(EVENT_NOT_FOUND.to_string()));
        };

        self.events
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound(EVENT_NOT_FOUND.to_string()))
    }

    /// Create an event unless its (title, location, start) triple is taken.
    /// The storage layer enforces the same rule for concurrent creates.
    pub async fn create_event(&self, request: EventRequest) -> Result<Event> {
        request.validate()?;

        if self
            .events
            .find_by_identity(&request.title, &request.location, request.start_datetime)
            .await?
            .is_some()
        {
            return Err(ApiError::Conflict(DUPLICATE_EVENT.to_string()));
        }

        self.events.create(&request).await
    }

    /// Replace every mutable field of an event
    pub async fn update_event(&self, id: &str, request: EventRequest) -> Result<Event> {
        request.validate()?;

        let Some(id) = parse_id(id) else {
            return Err(ApiError::NotFound(EVENT_NOT_FOUND.to_string()));
        };

        self.events
            .replace(id, &request)
            .await?
            .ok_or_else(|| ApiError::NotFound(EVENT_NOT_FOUND.to_string()))
    }

    /// Delete an event together with all of its RSVPs.
    /// Returns the number of RSVPs removed.
    pub async fn delete_event(&self, id: &str) -> Result<u64> {
        let Some(id) = parse_id(id) else {
            return Err(ApiError::NotFound(EVENT_NOT_FOUND.to_string()));
        };

        self.events
            .delete_with_rsvps(id)
            .await?
            .ok_or_else(|| ApiError::NotFound(EVENT_NOT_FOUND.to_string()))
    }

    /// RSVPs for one event; an id that cannot exist yields an empty list
    pub async fn list_event_rsvps(&self, event_id: &str) -> Result<Vec<Rsvp>> {
        match parse_id(event_id) {
            Some(event_id) => self.rsvps.list_by_event(event_id).await,
            None => Ok(Vec::new()),
        }
    }

    /// Events the user answered for that start at or after `now`
    pub async fn list_upcoming_for_user(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<UpcomingEvent>> {
        let event_ids = self.rsvps.list_event_ids_for_user(user_id).await?;
        self.events.list_upcoming(&event_ids, now).await
    }

    pub async fn create_rsvp(&self, request: CreateRsvpRequest) -> Result<Rsvp> {
        request.validate()?;

        if self
            .rsvps
            .find_by_event_and_user(request.event_id, &request.user_id)
            .await?
            .is_some()
        {
            return Err(ApiError::Conflict(DUPLICATE_RSVP.to_string()));
        }

        self.rsvps.create(&request).await
    }

    /// Look up an RSVP that `subject` is allowed to edit
    pub async fn find_owned_rsvp(&self, id: &str, subject: &str) -> Result<Rsvp> {
        let Some(id) = parse_id(id) else {
            return Err(ApiError::NotFound(RSVP_NOT_FOUND.to_string()));
        };

        let existing = self
            .rsvps
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound(RSVP_NOT_FOUND.to_string()))?;

        if existing.user_id != subject {
            return Err(ApiError::Forbidden(NOT_RSVP_OWNER.to_string()));
        }

        Ok(existing)
    }

    /// Replace the mutable fields of an RSVP already checked for ownership
    pub async fn replace_rsvp(&self, existing: &Rsvp, request: UpdateRsvpRequest) -> Result<Rsvp> {
        request.validate()?;

        self.rsvps
            .update(existing.id, &request)
            .await?
            .ok_or_else(|| ApiError::NotFound(RSVP_NOT_FOUND.to_string()))
    }

    /// Record an external order the first time it is presented
    pub async fn validate_order(&self, order_id: &str) -> Result<Order> {
        if order_id.trim().is_empty() {
            return Err(ApiError::InvalidInput("Order id is required.".to_string()));
        }

        if self.orders.find_by_fs_id(order_id).await?.is_some() {
            return Err(ApiError::Conflict(DUPLICATE_ORDER.to_string()));
        }

        self.orders
            .create(NewOrder {
                fs_id: order_id.to_string(),
                user_id: PLACEHOLDER_ORDER_OWNER.to_string(),
            })
            .await
    }
}
