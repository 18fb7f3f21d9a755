//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the RSVP backend.

use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;
use crate::utils::errors::{ApiError, Result};

/// Initialize logging based on configuration.
///
/// The returned guard flushes the file writer and must live as long as the process.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| ApiError::Config(format!("Invalid log level: {}", e)))?;

    let (file_writer, guard) = match &config.file_path {
        Some(directory) => {
            let file_appender = tracing_appender::rolling::daily(directory, "rsvp-backend.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            (Some(non_blocking), Some(guard))
        }
        None => (None, None),
    };

    let json_stdout = config
        .json
        .then(|| tracing_subscriber::fmt::layer().json().with_writer(std::io::stdout));
    let plain_stdout = (!config.json)
        .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stdout));
    let file_layer = file_writer.map(|writer| {
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(writer)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(json_stdout)
        .with(plain_stdout)
        .with(file_layer)
        .try_init()
        .map_err(|e| ApiError::Config(format!("Failed to initialize logging: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log event management actions
pub fn log_event_action(event_id: &str, action: &str, details: Option<&str>) {
    info!(
        event_id = event_id,
        action = action,
        details = details,
        "Event action performed"
    );
}

/// Log RSVP actions with structured data
pub fn log_rsvp_action(rsvp_id: &str, user_id: &str, action: &str, event_id: Option<&str>) {
    info!(
        rsvp_id = rsvp_id,
        user_id = user_id,
        action = action,
        event_id = event_id,
        "RSVP action performed"
    );
}

/// Log order validation results
pub fn log_order_action(order_id: &str, action: &str, accepted: bool) {
    if accepted {
        info!(order_id = order_id, action = action, "Order action performed");
    } else {
        warn!(order_id = order_id, action = action, "Order action rejected");
    }
}

/// Log admin actions
pub fn log_admin_action(admin_id: &str, action: &str, target: Option<&str>, details: Option<&str>) {
    warn!(
        admin_id = admin_id,
        action = action,
        target = target,
        details = details,
        "Admin action performed"
    );
}

/// Log API errors with context
pub fn log_api_error(api: &str, error: &str, context: Option<&str>) {
    error!(
        api = api,
        error = error,
        context = context,
        "API error occurred"
    );
}
