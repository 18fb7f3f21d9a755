//! In-memory store
//!
//! Implements every store trait over plain vectors so the API can run
//! without PostgreSQL (tests, local development). Insertion order is kept
//! and the same uniqueness rules as the database constraints are enforced.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::repositories::{EventStore, OrderStore, RsvpStore};
use crate::models::event::DUPLICATE_EVENT;
use crate::models::order::DUPLICATE_ORDER;
use crate::models::rsvp::DUPLICATE_RSVP;
use crate::models::{
    CreateRsvpRequest, Event, EventRequest, EventSummary, NewOrder, Order, Rsvp, UpcomingEvent,
    UpdateRsvpRequest,
};
use crate::utils::errors::{ApiError, Result};

#[derive(Default)]
struct Collections {
    events: Vec<Event>,
    rsvps: Vec<Rsvp>,
    orders: Vec<Order>,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    data: Arc<RwLock<Collections>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventStore for MemoryStore {
    async fn list(&self, visible_only: bool) -> Result<Vec<Event>> {
        let data = self.data.read().await;
        Ok(data
            .events
            .iter()
            .filter(|event| !visible_only || event.view_public == Some(true))
            .cloned()
            .collect())
    }

    async fn list_summaries(&self) -> Result<Vec<EventSummary>> {
        let data = self.data.read().await;
        Ok(data.events.iter().map(Event::summary).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>> {
        let data = self.data.read().await;
        Ok(data.events.iter().find(|event| event.id == id).cloned())
    }

    async fn find_by_identity(
        &self,
        title: &str,
        location: &str,
        start_datetime: DateTime<Utc>,
    ) -> Result<Option<Event>> {
        let data = self.data.read().await;
        Ok(data
            .events
            .iter()
            .find(|event| event.same_identity(title, location, start_datetime))
            .cloned())
    }

    async fn create(&self, request: &EventRequest) -> Result<Event> {
        let mut data = self.data.write().await;
        if data
            .events
            .iter()
            .any(|event| event.same_identity(&request.title, &request.location, request.start_datetime))
        {
            return Err(ApiError::Conflict(DUPLICATE_EVENT.to_string()));
        }

        let event = request.clone().into_event(Uuid::new_v4());
        data.events.push(event.clone());
        Ok(event)
    }

    async fn replace(&self, id: Uuid, request: &EventRequest) -> Result<Option<Event>> {
        let mut data = self.data.write().await;
        if data.events.iter().any(|event| {
            event.id != id
                && event.same_identity(&request.title, &request.location, request.start_datetime)
        }) {
            return Err(ApiError::Conflict(DUPLICATE_EVENT.to_string()));
        }

        let Some(slot) = data.events.iter_mut().find(|event| event.id == id) else {
            return Ok(None);
        };
        *slot = request.clone().into_event(id);
        Ok(Some(slot.clone()))
    }

    async fn delete_with_rsvps(&self, id: Uuid) -> Result<Option<u64>> {
        let mut data = self.data.write().await;
        let Some(position) = data.events.iter().position(|event| event.id == id) else {
            return Ok(None);
        };

        let before = data.rsvps.len();
        data.rsvps.retain(|rsvp| rsvp.event_id != id);
        let removed = (before - data.rsvps.len()) as u64;
        data.events.remove(position);

        Ok(Some(removed))
    }

    async fn list_upcoming(&self, ids: &[Uuid], now: DateTime<Utc>) -> Result<Vec<UpcomingEvent>> {
        let data = self.data.read().await;
        Ok(data
            .events
            .iter()
            .filter(|event| ids.contains(&event.id) && event.start_datetime >= now)
            .map(Event::upcoming)
            .collect())
    }
}

#[async_trait]
impl RsvpStore for MemoryStore {
    async fn list_by_event(&self, event_id: Uuid) -> Result<Vec<Rsvp>> {
        let data = self.data.read().await;
        Ok(data
            .rsvps
            .iter()
            .filter(|rsvp| rsvp.event_id == event_id)
            .cloned()
            .collect())
    }

    async fn list_event_ids_for_user(&self, user_id: &str) -> Result<Vec<Uuid>> {
        let data = self.data.read().await;
        Ok(data
            .rsvps
            .iter()
            .filter(|rsvp| rsvp.user_id == user_id)
            .map(|rsvp| rsvp.event_id)
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Rsvp>> {
        let data = self.data.read().await;
        Ok(data.rsvps.iter().find(|rsvp| rsvp.id == id).cloned())
    }

    async fn find_by_event_and_user(&self, event_id: Uuid, user_id: &str) -> Result<Option<Rsvp>> {
        let data = self.data.read().await;
        Ok(data
            .rsvps
            .iter()
            .find(|rsvp| rsvp.event_id == event_id && rsvp.user_id == user_id)
            .cloned())
    }

    async fn create(&self, request: &CreateRsvpRequest) -> Result<Rsvp> {
        let mut data = self.data.write().await;
        if data
            .rsvps
            .iter()
            .any(|rsvp| rsvp.event_id == request.event_id && rsvp.user_id == request.user_id)
        {
            return Err(ApiError::Conflict(DUPLICATE_RSVP.to_string()));
        }

        let rsvp = request.clone().into_rsvp(Uuid::new_v4());
        data.rsvps.push(rsvp.clone());
        Ok(rsvp)
    }

    async fn update(&self, id: Uuid, request: &UpdateRsvpRequest) -> Result<Option<Rsvp>> {
        let mut data = self.data.write().await;
        Ok(data.rsvps.iter_mut().find(|rsvp| rsvp.id == id).map(|rsvp| {
            rsvp.apply(request);
            rsvp.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut data = self.data.write().await;
        let before = data.rsvps.len();
        data.rsvps.retain(|rsvp| rsvp.id != id);
        Ok(data.rsvps.len() < before)
    }
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn find_by_fs_id(&self, fs_id: &str) -> Result<Option<Order>> {
        let data = self.data.read().await;
        Ok(data.orders.iter().find(|order| order.fs_id == fs_id).cloned())
    }

    async fn create(&self, order: NewOrder) -> Result<Order> {
        let mut data = self.data.write().await;
        if data.orders.iter().any(|existing| existing.fs_id == order.fs_id) {
            return Err(ApiError::Conflict(DUPLICATE_ORDER.to_string()));
        }

        let order = order.into_order(Uuid::new_v4());
        data.orders.push(order.clone());
        Ok(order)
    }
}
