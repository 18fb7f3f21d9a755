//! Test fixtures and data for integration tests
//!
//! Request bodies for events, RSVPs and orders in the shape the web client sends.

#![allow(dead_code)]

use chrono::{DateTime, Duration, Utc};
use serde_json::{json, Value};

/// Fixed start time well in the future
pub fn launch_start() -> DateTime<Utc> {
    "2031-06-01T18:00:00Z".parse().expect("valid timestamp")
}

pub fn event_body(title: &str, location: &str, start: DateTime<Utc>) -> Value {
    json!({
        "title": title,
        "location": location,
        "startDatetime": start.to_rfc3339(),
        "endDatetime": (start + Duration::hours(3)).to_rfc3339(),
        "description": format!("{} at {}", title, location),
        "viewPublic": true
    })
}

pub fn launch_event() -> Value {
    event_body("Launch", "HQ", launch_start())
}

pub fn private_event() -> Value {
    let mut body = event_body("Board meeting", "HQ", launch_start());
    body["viewPublic"] = json!(false);
    body
}

pub fn rsvp_body(event_id: &str, user_id: &str) -> Value {
    json!({
        "eventId": event_id,
        "userId": user_id,
        "name": format!("Guest {}", user_id),
        "attending": true,
        "guests": 1,
        "comments": "Looking forward to it"
    })
}

pub fn rsvp_update(attending: bool) -> Value {
    json!({
        "name": "Updated Guest",
        "attending": attending,
        "guests": 0,
        "comments": null
    })
}

pub fn order_body(order_id: &str) -> Value {
    json!({ "orderId": order_id })
}
