//! FastSpring order gateway
//!
//! Fetches the order list from the commerce API and relays it unchanged.
//! Every request carries basic auth credentials and a timeout, so a stalled
//! upstream surfaces as an error instead of a pending client request.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::config::FastSpringConfig;
use crate::utils::errors::{ApiError, GatewayError, Result};
use crate::utils::helpers::truncate_text;
use crate::utils::logging::log_api_error;

#[derive(Clone, Debug)]
pub struct OrderGateway {
    client: Client,
    orders_url: Url,
    username: String,
    password: String,
}

impl OrderGateway {
    /// Create a new OrderGateway instance
    pub fn new(config: &FastSpringConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()?;

        let base = if config.api_url.ends_with('/') {
            Url::parse(&config.api_url)?
        } else {
            Url::parse(&format!("{}/", config.api_url))?
        };

        Ok(Self {
            client,
            orders_url: base.join("orders")?,
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    /// Fetch the raw order list
    pub async fn fetch_orders(&self) -> Result<Value> {
        debug!(url = %self.orders_url, "Requesting FastSpring orders");

        let response = self
            .client
            .get(self.orders_url.clone())
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = format!("HTTP {}: {}", status, truncate_text(&body, 200));
            log_api_error("fastspring", &message, Some(self.orders_url.as_str()));

            return Err(match status {
                StatusCode::SERVICE_UNAVAILABLE => GatewayError::ServiceUnavailable.into(),
                StatusCode::GATEWAY_TIMEOUT => GatewayError::Timeout.into(),
                _ => GatewayError::RequestFailed(message).into(),
            });
        }

        response.json::<Value>().await.map_err(|e| {
            log_api_error("fastspring", &e.to_string(), Some("decoding order list"));
            GatewayError::InvalidResponse(e.to_string()).into()
        })
    }

    fn transport_error(&self, e: reqwest::Error) -> ApiError {
        log_api_error("fastspring", &e.to_string(), Some(self.orders_url.as_str()));

        if e.is_timeout() {
            GatewayError::Timeout.into()
        } else if e.is_connect() {
            GatewayError::ServiceUnavailable.into()
        } else {
            GatewayError::RequestFailed(e.to_string()).into()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(api_url: String, timeout_seconds: u64) -> FastSpringConfig {
        FastSpringConfig {
            api_url,
            username: "user".to_string(),
            password: "pass".to_string(),
            timeout_seconds,
            ..FastSpringConfig::default()
        }
    }

    #[tokio::test]
    async fn test_fetch_orders_relays_body() {
        let server = MockServer::start().await;
        let body = json!({ "orders": ["FS-1", "FS-2"], "nextPage": null });

        Mock::given(method("GET"))
            .and(path("/orders"))
            // base64("user:pass")
            .and(header("authorization", "Basic dXNlcjpwYXNz"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
            .expect(1)
            .mount(&server)
            .await;

        let gateway = OrderGateway::new(&config(server.uri(), 5)).unwrap();
        assert_eq!(gateway.fetch_orders().await.unwrap(), body);
    }

    #[tokio::test]
    async fn test_upstream_error_is_request_failed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/orders"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad credentials"))
            .mount(&server)
            .await;

        let gateway = OrderGateway::new(&config(server.uri(), 5)).unwrap();
        assert_matches!(
            gateway.fetch_orders().await,
            Err(ApiError::Gateway(GatewayError::RequestFailed(message))) if message.contains("401")
        );
    }

    #[tokio::test]
    async fn test_non_json_body_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/orders"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let gateway = OrderGateway::new(&config(server.uri(), 5)).unwrap();
        assert_matches!(
            gateway.fetch_orders().await,
            Err(ApiError::Gateway(GatewayError::InvalidResponse(_)))
        );
    }

    #[tokio::test]
    async fn test_slow_upstream_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/orders"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({}))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let gateway = OrderGateway::new(&config(server.uri(), 1)).unwrap();
        assert_matches!(
            gateway.fetch_orders().await,
            Err(ApiError::Gateway(GatewayError::Timeout))
        );
    }

    #[test]
    fn test_orders_url_respects_base_path() {
        let gateway = OrderGateway::new(&config("https://api.example.com/v1".to_string(), 5)).unwrap();
        assert_eq!(gateway.orders_url.as_str(), "https://api.example.com/v1/orders");
    }
}
