//! Database module
//!
//! This module handles store backends and the operations built on them

pub mod connection;
pub mod memory;
pub mod repositories;
pub mod service;

// Re-export commonly used database components
pub use connection::{create_pool, health_check, run_migrations, DatabasePool};
pub use memory::MemoryStore;
pub use repositories::{
    EventRepository, EventStore, OrderRepository, OrderStore, RsvpRepository, RsvpStore,
};
pub use service::DatabaseService;
