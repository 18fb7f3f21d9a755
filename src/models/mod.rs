//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod event;
pub mod order;
pub mod rsvp;

// Re-export commonly used models
pub use event::{Event, EventRequest, EventSummary, UpcomingEvent};
pub use order::{NewOrder, Order, ValidateOrderRequest};
pub use rsvp::{CreateRsvpRequest, Rsvp, UpdateRsvpRequest};
