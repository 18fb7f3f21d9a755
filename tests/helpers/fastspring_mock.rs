//! Mock FastSpring API server for testing

use serde_json::{json, Value};
use std::time::Duration;
use wiremock::{
    matchers::{basic_auth, method, path},
    Mock, MockServer, ResponseTemplate,
};

pub const FS_USERNAME: &str = "fs-user";
pub const FS_PASSWORD: &str = "fs-pass";

/// Mock FastSpring API server
pub struct FastSpringMockServer {
    pub server: MockServer,
}

impl FastSpringMockServer {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Sample order listing as returned by the API
    pub fn sample_orders() -> Value {
        json!({
            "action": "order.getall",
            "result": "success",
            "orders": ["FS-ORDER-1", "FS-ORDER-2"],
            "nextPage": null
        })
    }

    /// Answer authenticated order listings with `body`
    pub async fn mock_orders(&self, body: Value) {
        Mock::given(method("GET"))
            .and(path("/orders"))
            .and(basic_auth(FS_USERNAME, FS_PASSWORD))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Answer order listings with an error status
    pub async fn mock_orders_failure(&self, status: u16) {
        Mock::given(method("GET"))
            .and(path("/orders"))
            .respond_with(ResponseTemplate::new(status).set_body_string("upstream failure"))
            .mount(&self.server)
            .await;
    }

    /// Answer order listings only after `delay`
    pub async fn mock_orders_delayed(&self, delay: Duration) {
        Mock::given(method("GET"))
            .and(path("/orders"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(Self::sample_orders())
                    .set_delay(delay),
            )
            .mount(&self.server)
            .await;
    }

    pub async fn reset(&self) {
        self.server.reset().await;
    }
}
