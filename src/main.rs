//! RSVP Backend
//!
//! Main application entry point

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use rsvp_backend::{
    config::{Settings, StorageBackend},
    database::{create_pool, run_migrations, DatabaseService},
    server,
    state::AppState,
    utils::logging,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new().context("Failed to load configuration")?;
    settings.validate()?;

    // Initialize logging
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", rsvp_backend::info());

    let database = match settings.database.backend {
        StorageBackend::Postgres => {
            info!("Connecting to database...");
            let pool = create_pool(&settings.database).await?;

            if settings.database.run_migrations {
                run_migrations(&pool).await?;
            }

            DatabaseService::postgres(pool)
        }
        StorageBackend::Memory => {
            info!("Using in-memory store; data is lost on restart");
            DatabaseService::memory()
        }
    };

    let address = settings.bind_address();
    let state = AppState::new(settings, database)?;

    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    server::run(listener, state, server::shutdown_signal()).await?;

    info!("RSVP backend has been shut down.");
    Ok(())
}
