//! RSVP handlers

use axum::extract::{Path, State};
use axum::{Extension, Json};
use tracing::warn;

use super::ApiJson;
use crate::models::rsvp::NOT_RSVP_SUBJECT;
use crate::models::{CreateRsvpRequest, Rsvp, UpdateRsvpRequest};
use crate::services::Claims;
use crate::state::AppState;
use crate::utils::errors::{ApiError, Result};
use crate::utils::logging::log_rsvp_action;

/// POST /rsvp/new
///
/// The RSVP is recorded for the caller only; `userId` must match the token subject.
pub async fn create_rsvp(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    ApiJson(request): ApiJson<CreateRsvpRequest>,
) -> Result<Json<Rsvp>> {
    if request.user_id != claims.sub {
        warn!(subject = %claims.sub, user_id = %request.user_id, "RSVP for another user rejected");
        return Err(ApiError::Forbidden(NOT_RSVP_SUBJECT.to_string()));
    }

    let rsvp = state.database.create_rsvp(request).await?;

    log_rsvp_action(
        &rsvp.id.to_string(),
        &rsvp.user_id,
        "create",
        Some(&rsvp.event_id.to_string()),
    );

    Ok(Json(rsvp))
}

/// PUT /rsvp/{id}
///
/// Ownership is checked before the body is looked at, so a non-owner is
/// rejected whatever they send.
pub async fn update_rsvp(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
    payload: std::result::Result<ApiJson<UpdateRsvpRequest>, ApiError>,
) -> Result<Json<Rsvp>> {
    let existing = state.database.find_owned_rsvp(&id, &claims.sub).await?;
    let ApiJson(request) = payload?;

    let rsvp = state.database.replace_rsvp(&existing, request).await?;

    log_rsvp_action(
        &id,
        &claims.sub,
        "update",
        Some(&rsvp.event_id.to_string()),
    );

    Ok(Json(rsvp))
}
