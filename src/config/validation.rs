//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use super::settings::StorageBackend;
use super::Settings;
use crate::utils::errors::{ApiError, Result};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_server_config(&settings.server)?;
    validate_database_config(&settings.database)?;
    validate_auth_config(&settings.auth)?;
    validate_fastspring_config(&settings.fastspring)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate server configuration
fn validate_server_config(config: &super::ServerConfig) -> Result<()> {
    if config.host.is_empty() {
        return Err(ApiError::Config("Server host is required".to_string()));
    }

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.backend == StorageBackend::Memory {
        return Ok(());
    }

    if config.url.is_empty() {
        return Err(ApiError::Config("Database URL is required".to_string()));
    }

    if config.max_connections == 0 {
        return Err(ApiError::Config(
            "Max connections must be greater than 0".to_string(),
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(ApiError::Config(
            "Min connections cannot be greater than max connections".to_string(),
        ));
    }

    Ok(())
}

/// Validate identity provider configuration
fn validate_auth_config(config: &super::AuthConfig) -> Result<()> {
    if config.issuer.is_empty() {
        return Err(ApiError::Config("Token issuer is required".to_string()));
    }

    if config.audience.is_empty() {
        return Err(ApiError::Config("Token audience is required".to_string()));
    }

    config
        .jwks_url()
        .map_err(|e| ApiError::Config(format!("Invalid JWKS location: {}", e)))?;

    if config.roles_claim.is_empty() {
        return Err(ApiError::Config("Roles claim name is required".to_string()));
    }

    if config.jwks_requests_per_minute == 0 {
        return Err(ApiError::Config(
            "JWKS requests per minute must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// Validate FastSpring configuration
fn validate_fastspring_config(config: &super::FastSpringConfig) -> Result<()> {
    url::Url::parse(&config.api_url)
        .map_err(|e| ApiError::Config(format!("Invalid order API URL: {}", e)))?;

    if config.timeout_seconds == 0 {
        return Err(ApiError::Config(
            "Order API timeout must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(ApiError::Config(format!(
            "Invalid log level: {}. Valid levels: {:?}",
            config.level, valid_levels
        )));
    }

    Ok(())
}
