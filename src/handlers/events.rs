//! Event handlers

use axum::extract::{Path, State};
use axum::{Extension, Json};
use chrono::Utc;
use serde_json::{json, Value};

use super::ApiJson;
use crate::models::{Event, EventRequest, EventSummary, Rsvp, UpcomingEvent};
use crate::services::Claims;
use crate::state::AppState;
use crate::utils::errors::Result;
use crate::utils::logging::{log_admin_action, log_event_action};

pub const EVENT_DELETED: &str = "Event and RSVPs successfully deleted.";

/// GET /events
pub async fn list_events(State(state): State<AppState>) -> Result<Json<Vec<Event>>> {
    Ok(Json(state.database.list_public_events().await?))
}

/// GET /events/admin
pub async fn list_admin_events(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<EventSummary>>> {
    let events = state.database.list_admin_events().await?;
    log_admin_action(&claims.sub, "list_events", None, None);
    Ok(Json(events))
}

/// GET /event/{id}
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Event>> {
    Ok(Json(state.database.get_event(&id).await?))
}

/// GET /event/{id}/rsvps
pub async fn list_event_rsvps(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Rsvp>>> {
    Ok(Json(state.database.list_event_rsvps(&id).await?))
}

/// GET /events/{userId}
pub async fn list_upcoming_for_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<UpcomingEvent>>> {
    let events = state
        .database
        .list_upcoming_for_user(&user_id, Utc::now())
        .await?;
    Ok(Json(events))
}

/// POST /event/new
pub async fn create_event(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    ApiJson(request): ApiJson<EventRequest>,
) -> Result<Json<Event>> {
    let event = state.database.create_event(request).await?;

    let id = event.id.to_string();
    log_event_action(&id, "create", Some(&event.title));
    log_admin_action(&claims.sub, "create_event", Some(&id), None);

    Ok(Json(event))
}

/// PUT /event/{id}
pub async fn update_event(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<EventRequest>,
) -> Result<Json<Event>> {
    let event = state.database.update_event(&id, request).await?;

    log_event_action(&id, "update", Some(&event.title));
    log_admin_action(&claims.sub, "update_event", Some(&id), None);

    Ok(Json(event))
}

/// DELETE /event/{id}
pub async fn delete_event(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    let removed = state.database.delete_event(&id).await?;

    let details = format!("{} RSVPs removed", removed);
    log_event_action(&id, "delete", Some(&details));
    log_admin_action(&claims.sub, "delete_event", Some(&id), Some(&details));

    Ok(Json(json!({ "message": EVENT_DELETED })))
}
