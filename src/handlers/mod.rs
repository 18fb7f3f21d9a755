//! HTTP handlers module
//!
//! This module contains the request handlers organized by resource:
//! - Event handlers for listing and managing events
//! - RSVP handlers for attendance responses
//! - Order handlers for the commerce integration

use axum::extract::FromRequest;

use crate::utils::errors::ApiError;

pub mod events;
pub mod orders;
pub mod rsvps;

/// JSON body extractor whose rejections render as [`ApiError`]
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Liveness probe
pub async fn liveness() -> &'static str {
    "API works"
}
