//! RSVP Backend
//!
//! REST backend for event listings, per-event RSVPs and order validation.
//! This library provides modular components for the store backends, the
//! identity provider integration, the commerce API gateway and the HTTP router.

pub mod config;
pub mod database;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod server;
pub mod services;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{ApiError, Result};

// Re-export main components for easy access
pub use database::DatabaseService;
pub use server::create_router;
pub use state::AppState;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
