//! Shared application state
//!
//! Every dependency a handler needs, constructed once at startup and handed
//! to the router.

use std::sync::Arc;

use crate::config::Settings;
use crate::database::DatabaseService;
use crate::services::{IdentityVerifier, OrderGateway};
use crate::utils::errors::Result;

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub database: DatabaseService,
    pub identity: Arc<IdentityVerifier>,
    pub gateway: OrderGateway,
}

impl AppState {
    /// Build the state from settings around an already selected store backend
    pub fn new(settings: Settings, database: DatabaseService) -> Result<Self> {
        let identity = IdentityVerifier::new(&settings.auth)?;
        let gateway = OrderGateway::new(&settings.fastspring)?;
        let database =
            database.with_public_events_visible_only(settings.features.public_events_visible_only);

        Ok(Self {
            settings: Arc::new(settings),
            database,
            identity: Arc::new(identity),
            gateway,
        })
    }
}
