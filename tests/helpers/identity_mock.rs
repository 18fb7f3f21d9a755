//! Mock identity provider for testing
//!
//! Serves a JWKS document over wiremock and mints RS256 tokens signed with
//! the matching fixture key.

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::{json, Value};
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

pub const TEST_KID: &str = "test-key";
pub const TEST_AUDIENCE: &str = "https://rsvp.test/api";
pub const ROLES_CLAIM: &str = "http://myapp.com/roles";

const SIGNING_KEY_PEM: &[u8] = include_bytes!("../fixtures/jwt_signing_key.pem");

const MODULUS: &str = "p4hD3qCBBsEgoZ4gqVkM56XJScNt8aHBWpSV4ecf2Z0k20nIQ2zI2emeQJErcQlogYo2BodExDx8yVihQjuPmLu5c8V9Xml8zsGhXH26y99eSiB1AxBIsUbil75etTu9eSaWjOIKUwMY6meLzUmcBCL3RqmW9SGCHCnnqgFNv1-0GpgSlFidMaPNUbo9EpigE-GRJSBVrtT_vmmUeHwaLReg0zjAydRK2D-kvSXHoCI-Jq9ZVz2RzvvFmY6SrUVY69_TnbIsRKFq0RsjehwyTBTMiMGPnJQ_55ISKiYU42J9EIwCFHbAiscwdLCyxEzhMkRDQ7anzq1ekjsIvTCTGw";
const EXPONENT: &str = "AQAB";

/// Mock identity provider publishing one RSA signing key
pub struct IdentityMockServer {
    pub server: MockServer,
    pub issuer: String,
}

impl IdentityMockServer {
    /// Start the server and publish the key set
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let issuer = format!("{}/", server.uri());

        Mock::given(method("GET"))
            .and(path("/.well-known/jwks.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(Self::jwks()))
            .mount(&server)
            .await;

        Self { server, issuer }
    }

    /// Key set containing the fixture key
    pub fn jwks() -> Value {
        json!({
            "keys": [{
                "kty": "RSA",
                "use": "sig",
                "alg": "RS256",
                "kid": TEST_KID,
                "n": MODULUS,
                "e": EXPONENT
            }]
        })
    }

    /// Token for a regular signed-in user
    pub fn user_token(&self, subject: &str) -> String {
        self.token_with_roles(subject, &[])
    }

    /// Token carrying the admin role
    pub fn admin_token(&self, subject: &str) -> String {
        self.token_with_roles(subject, &["admin"])
    }

    pub fn token_with_roles(&self, subject: &str, roles: &[&str]) -> String {
        let now = Utc::now();
        self.sign(
            TEST_KID,
            json!({
                "sub": subject,
                "iss": self.issuer,
                "aud": TEST_AUDIENCE,
                "iat": now.timestamp(),
                "exp": (now + Duration::hours(1)).timestamp(),
                ROLES_CLAIM: roles,
            }),
        )
    }

    /// Token whose expiry lies in the past
    pub fn expired_token(&self, subject: &str) -> String {
        let past = Utc::now() - Duration::hours(2);
        self.sign(
            TEST_KID,
            json!({
                "sub": subject,
                "iss": self.issuer,
                "aud": TEST_AUDIENCE,
                "iat": past.timestamp(),
                "exp": (past + Duration::hours(1)).timestamp(),
            }),
        )
    }

    /// Token issued for another API
    pub fn wrong_audience_token(&self, subject: &str) -> String {
        let now = Utc::now();
        self.sign(
            TEST_KID,
            json!({
                "sub": subject,
                "iss": self.issuer,
                "aud": "https://someone-else.test",
                "exp": (now + Duration::hours(1)).timestamp(),
            }),
        )
    }

    /// Sign claims with the fixture key under an arbitrary key id
    pub fn sign(&self, kid: &str, claims: Value) -> String {
        let mut header = Header::new(Algorithm::RS256);
        header.kid = Some(kid.to_string());

        let key = EncodingKey::from_rsa_pem(SIGNING_KEY_PEM).expect("fixture key should parse");
        encode(&header, &claims, &key).expect("token should encode")
    }

    /// Number of key set downloads served so far
    pub async fn jwks_requests(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map(|requests| {
                requests
                    .iter()
                    .filter(|r| r.url.path() == "/.well-known/jwks.json")
                    .count()
            })
            .unwrap_or(0)
    }
}
