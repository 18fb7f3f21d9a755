//! Identity verification service
//!
//! Verifies RS256 bearer tokens issued by the identity provider against its
//! published key set. Keys are cached by key id. An unknown key id triggers a
//! refresh of the set, at most `jwks_requests_per_minute` times a minute.

use std::collections::HashMap;
use std::num::NonZeroU32;
use std::time::Duration;

use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::AuthConfig;
use crate::utils::errors::{ApiError, Result};
use crate::utils::logging::log_api_error;

pub const MISSING_TOKEN: &str = "No authorization token was found";

/// Verified attributes of the caller, attached to each authenticated request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub roles: Vec<String>,
}

impl Claims {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

/// Token payload as issued; the role list lives under a namespaced claim
#[derive(Debug, Deserialize)]
struct TokenClaims {
    sub: String,
    #[serde(flatten)]
    extra: HashMap<String, Value>,
}

pub struct IdentityVerifier {
    client: Client,
    jwks_url: Url,
    validation: Validation,
    roles_claim: String,
    keys: RwLock<HashMap<String, DecodingKey>>,
    refresh_limiter: DefaultDirectRateLimiter,
}

impl IdentityVerifier {
    /// Create a new IdentityVerifier instance
    pub fn new(config: &AuthConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.jwks_timeout_seconds))
            .build()?;

        let jwks_url = config.jwks_url()?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[config.audience.as_str()]);
        validation.set_issuer(&[config.issuer.as_str()]);

        let per_minute = NonZeroU32::new(config.jwks_requests_per_minute).ok_or_else(|| {
            ApiError::Config("JWKS requests per minute must be greater than 0".to_string())
        })?;

        Ok(Self {
            client,
            jwks_url,
            validation,
            roles_claim: config.roles_claim.clone(),
            keys: RwLock::new(HashMap::new()),
            refresh_limiter: RateLimiter::direct(Quota::per_minute(per_minute)),
        })
    }

    /// Verify a bearer token and extract the caller's claims
    pub async fn verify(&self, token: &str) -> Result<Claims> {
        let header = decode_header(token)
            .map_err(|e| ApiError::Unauthenticated(format!("Invalid token: {}", e)))?;

        let kid = header
            .kid
            .ok_or_else(|| ApiError::Unauthenticated("Invalid token: missing key id".to_string()))?;

        let key = self.signing_key(&kid).await?;

        let data = decode::<TokenClaims>(token, &key, &self.validation)
            .map_err(|e| ApiError::Unauthenticated(format!("Invalid token: {}", e)))?;

        let roles = roles_from(&data.claims.extra, &self.roles_claim);
        debug!(subject = %data.claims.sub, roles = ?roles, "Token verified");

        Ok(Claims {
            sub: data.claims.sub,
            roles,
        })
    }

    /// Cached signing key for `kid`, refreshing the key set on a miss
    async fn signing_key(&self, kid: &str) -> Result<DecodingKey> {
        if let Some(key) = self.keys.read().await.get(kid) {
            return Ok(key.clone());
        }

        if self.refresh_limiter.check().is_err() {
            warn!(kid = kid, "Signing key refresh throttled");
            return Err(ApiError::Unauthenticated(format!(
                "Unable to find a signing key that matches '{}'",
                kid
            )));
        }

        let fetched = self.fetch_keys().await.map_err(|e| {
            log_api_error("jwks", &e.to_string(), Some(self.jwks_url.as_str()));
            ApiError::Unauthenticated("Unable to retrieve signing keys".to_string())
        })?;

        let mut keys = self.keys.write().await;
        *keys = fetched;

        keys.get(kid).cloned().ok_or_else(|| {
            ApiError::Unauthenticated(format!(
                "Unable to find a signing key that matches '{}'",
                kid
            ))
        })
    }

    async fn fetch_keys(&self) -> Result<HashMap<String, DecodingKey>> {
        debug!(url = %self.jwks_url, "Fetching signing keys");

        let response = self
            .client
            .get(self.jwks_url.clone())
            .send()
            .await?
            .error_for_status()?;

        let set: JwkSet = response.json().await?;

        let mut keys = HashMap::new();
        for jwk in &set.keys {
            let Some(kid) = jwk.common.key_id.clone() else {
                continue;
            };
            match DecodingKey::from_jwk(jwk) {
                Ok(key) => {
                    keys.insert(kid, key);
                }
                Err(e) => warn!(kid = %kid, error = %e, "Skipping unusable signing key"),
            }
        }

        info!(count = keys.len(), "Signing keys refreshed");
        Ok(keys)
    }
}

/// Roles listed under `claim`; absent or malformed claims yield no roles
fn roles_from(extra: &HashMap<String, Value>, claim: &str) -> Vec<String> {
    match extra.get(claim) {
        Some(Value::Array(values)) => values
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        Some(Value::String(role)) => vec![role.clone()],
        _ => Vec::new(),
    }
}
