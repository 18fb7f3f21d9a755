//! RSVP model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::utils::errors::{ApiError, Result};

pub const RSVP_NOT_FOUND: &str = "RSVP not found.";
pub const DUPLICATE_RSVP: &str = "You have already RSVPed to this event.";
pub const NOT_RSVP_OWNER: &str = "You cannot edit someone else's RSVP.";
pub const NOT_RSVP_SUBJECT: &str = "You cannot RSVP on behalf of someone else.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Rsvp {
    pub id: Uuid,
    pub user_id: String,
    pub name: String,
    pub event_id: Uuid,
    pub attending: bool,
    pub guests: Option<i32>,
    pub comments: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRsvpRequest {
    pub user_id: String,
    pub name: String,
    pub event_id: Uuid,
    pub attending: bool,
    pub guests: Option<i32>,
    pub comments: Option<String>,
}

/// Replacement of the mutable RSVP fields; owner and event never change
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRsvpRequest {
    pub name: String,
    pub attending: bool,
    pub guests: Option<i32>,
    pub comments: Option<String>,
}

impl CreateRsvpRequest {
    pub fn validate(&self) -> Result<()> {
        if self.user_id.trim().is_empty() {
            return Err(ApiError::InvalidInput("RSVP user is required.".to_string()));
        }
        validate_name(&self.name)
    }

    pub fn into_rsvp(self, id: Uuid) -> Rsvp {
        Rsvp {
            id,
            user_id: self.user_id,
            name: self.name,
            event_id: self.event_id,
            attending: self.attending,
            guests: self.guests,
            comments: self.comments,
        }
    }
}

impl UpdateRsvpRequest {
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)
    }
}

impl Rsvp {
    pub fn apply(&mut self, request: &UpdateRsvpRequest) {
        self.name = request.name.clone();
        self.attending = request.attending;
        self.guests = request.guests;
        self.comments = request.comments.clone();
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(ApiError::InvalidInput("RSVP name is required.".to_string()));
    }
    Ok(())
}
