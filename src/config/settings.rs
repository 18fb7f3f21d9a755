//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub fastspring: FastSpringConfig,
    pub logging: LoggingConfig,
    pub features: FeaturesConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// `dev` disables serving the client bundle
    pub environment: String,
    /// Directory holding the built web client
    pub static_dir: Option<String>,
}

/// Storage backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Postgres,
    Memory,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub backend: StorageBackend,
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub run_migrations: bool,
}

/// Identity provider configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Token issuer, e.g. `https://tenant.auth0.com/`
    pub issuer: String,
    pub audience: String,
    /// Overrides `{issuer}.well-known/jwks.json`
    pub jwks_uri: Option<String>,
    /// Namespaced claim holding the caller's roles
    pub roles_claim: String,
    pub admin_role: String,
    pub jwks_requests_per_minute: u32,
    pub jwks_timeout_seconds: u64,
}

/// FastSpring order API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FastSpringConfig {
    pub api_url: String,
    pub username: String,
    pub password: String,
    pub timeout_seconds: u64,
    pub user_agent: String,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for daily rolling log files, stdout only when unset
    pub file_path: Option<String>,
    pub json: bool,
}

/// Feature flags configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FeaturesConfig {
    /// Restrict `GET /api/events` to events flagged `viewPublic`
    pub public_events_visible_only: bool,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("RSVP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::ApiError> {
        super::validation::validate_settings(self)
    }

    /// Socket address the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Whether the web client bundle should be served
    pub fn serves_static_files(&self) -> bool {
        self.server.environment != "dev" && self.server.static_dir.is_some()
    }
}

impl AuthConfig {
    /// Location of the issuer's published key set
    pub fn jwks_url(&self) -> Result<url::Url, url::ParseError> {
        match &self.jwks_uri {
            Some(uri) => url::Url::parse(uri),
            None => url::Url::parse(&self.issuer)?.join(".well-known/jwks.json"),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8083,
            environment: "production".to_string(),
            static_dir: Some("./dist".to_string()),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Postgres,
            url: "postgresql://localhost/rsvp".to_string(),
            max_connections: 10,
            min_connections: 1,
            run_migrations: true,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            issuer: String::new(),
            audience: String::new(),
            jwks_uri: None,
            roles_claim: "http://myapp.com/roles".to_string(),
            admin_role: "admin".to_string(),
            jwks_requests_per_minute: 5,
            jwks_timeout_seconds: 10,
        }
    }
}

impl Default for FastSpringConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.fastspring.com".to_string(),
            username: String::new(),
            password: String::new(),
            timeout_seconds: 10,
            user_agent: "APPIZY Backend".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_path: None,
            json: false,
        }
    }
}

impl Default for FeaturesConfig {
    fn default() -> Self {
        Self {
            public_events_visible_only: false,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            fastspring: FastSpringConfig::default(),
            logging: LoggingConfig::default(),
            features: FeaturesConfig::default(),
        }
    }
}
