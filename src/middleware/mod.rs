//! Middleware module
//!
//! Request guards and request logging for the HTTP router

pub mod auth;
pub mod logging;

pub use auth::{enforce_guard, AuthGuard};
pub use logging::log_requests;
