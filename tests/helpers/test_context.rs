//! Test context for unified test setup
//!
//! Starts the mock identity provider and FastSpring API, then serves the real
//! router over an ephemeral port backed by the in-memory store.

use std::net::SocketAddr;

use reqwest::{Client, Response};
use rsvp_backend::config::{Settings, StorageBackend};
use rsvp_backend::database::DatabaseService;
use rsvp_backend::server;
use rsvp_backend::state::AppState;
use serde_json::Value;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use super::fastspring_mock::{FastSpringMockServer, FS_PASSWORD, FS_USERNAME};
use super::identity_mock::{IdentityMockServer, ROLES_CLAIM, TEST_AUDIENCE};

/// Configuration for a test context
#[derive(Debug, Clone)]
pub struct TestConfig {
    pub fastspring_timeout_seconds: u64,
    pub public_events_visible_only: bool,
    pub serve_static_files: bool,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            fastspring_timeout_seconds: 2,
            public_events_visible_only: false,
            serve_static_files: false,
        }
    }
}

/// Running server plus its mocked collaborators
pub struct TestContext {
    pub address: SocketAddr,
    pub client: Client,
    pub identity: IdentityMockServer,
    pub fastspring: FastSpringMockServer,
    pub settings: Settings,
    pub temp_dir: TempDir,
    server: JoinHandle<std::io::Result<()>>,
}

impl TestContext {
    pub async fn new() -> Self {
        Self::new_with_config(TestConfig::default()).await
    }

    pub async fn new_with_config(config: TestConfig) -> Self {
        // Initialize logging once
        let _ = tracing_subscriber::fmt()
            .with_env_filter("rsvp_backend=debug")
            .with_test_writer()
            .try_init();

        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let identity = IdentityMockServer::new().await;
        let fastspring = FastSpringMockServer::new().await;

        let settings = Self::create_test_settings(&config, &identity, &fastspring, &temp_dir);

        let state = AppState::new(settings.clone(), DatabaseService::memory())
            .expect("Failed to build application state");

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let address = listener.local_addr().expect("Listener has no address");

        let server = tokio::spawn(server::run(listener, state, std::future::pending()));

        Self {
            address,
            client: Client::new(),
            identity,
            fastspring,
            settings,
            temp_dir,
            server,
        }
    }

    fn create_test_settings(
        config: &TestConfig,
        identity: &IdentityMockServer,
        fastspring: &FastSpringMockServer,
        temp_dir: &TempDir,
    ) -> Settings {
        let mut settings = Settings::default();

        settings.server.host = "127.0.0.1".to_string();
        settings.server.port = 0;
        if config.serve_static_files {
            settings.server.environment = "production".to_string();
            settings.server.static_dir = Some(temp_dir.path().to_string_lossy().to_string());
        } else {
            settings.server.environment = "dev".to_string();
        }

        settings.database.backend = StorageBackend::Memory;

        settings.auth.issuer = identity.issuer.clone();
        settings.auth.audience = TEST_AUDIENCE.to_string();
        settings.auth.roles_claim = ROLES_CLAIM.to_string();
        settings.auth.jwks_requests_per_minute = 5;
        settings.auth.jwks_timeout_seconds = 2;

        settings.fastspring.api_url = fastspring.uri();
        settings.fastspring.username = FS_USERNAME.to_string();
        settings.fastspring.password = FS_PASSWORD.to_string();
        settings.fastspring.timeout_seconds = config.fastspring_timeout_seconds;

        settings.features.public_events_visible_only = config.public_events_visible_only;

        settings
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.address, path)
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> Response {
        let mut request = self.client.get(self.url(path));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await.expect("GET request failed")
    }

    pub async fn post(&self, path: &str, token: Option<&str>, body: &Value) -> Response {
        let mut request = self.client.post(self.url(path)).json(body);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await.expect("POST request failed")
    }

    pub async fn put(&self, path: &str, token: Option<&str>, body: &Value) -> Response {
        let mut request = self.client.put(self.url(path)).json(body);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await.expect("PUT request failed")
    }

    pub async fn delete(&self, path: &str, token: Option<&str>) -> Response {
        let mut request = self.client.delete(self.url(path));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await.expect("DELETE request failed")
    }

    /// Create an event as admin and return its JSON
    pub async fn create_event(&self, body: &Value) -> Value {
        let token = self.identity.admin_token("auth0|admin");
        let response = self.post("/api/event/new", Some(&token), body).await;
        assert_eq!(response.status().as_u16(), 200, "event creation failed");
        response.json().await.expect("event body")
    }

    /// Create an RSVP as `subject` and return its JSON
    pub async fn create_rsvp(&self, subject: &str, body: &Value) -> Value {
        let token = self.identity.user_token(subject);
        let response = self.post("/api/rsvp/new", Some(&token), body).await;
        assert_eq!(response.status().as_u16(), 200, "RSVP creation failed");
        response.json().await.expect("RSVP body")
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        self.server.abort();
    }
}

/// Read a response as `(status, json body)`
pub async fn status_and_json(response: Response) -> (u16, Value) {
    let status = response.status().as_u16();
    let body = response.json().await.unwrap_or(Value::Null);
    (status, body)
}
