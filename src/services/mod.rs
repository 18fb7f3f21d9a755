//! Services module
//!
//! Clients for the external systems the API depends on

pub mod identity;
pub mod orders;

// Re-export commonly used services
pub use identity::{Claims, IdentityVerifier};
pub use orders::OrderGateway;
