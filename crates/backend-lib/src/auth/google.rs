// ============================
// riskweb-backend-lib/src/auth/google.rs
// ============================
//! Federated identity acceptance.
//!
//! Verifies a provider-issued ID token against the provider's published key
//! set and the audience this service registered with the provider. The
//! provider's keys are the trust root; this module only enforces the
//! contract around them.
use async_trait::async_trait;
use jsonwebtoken::{
    decode, decode_header,
    jwk::JwkSet,
    Algorithm, DecodingKey, Validation,
};
use serde::Deserialize;
use std::time::Duration;

/// Claims extracted from a verified federated assertion
#[derive(Deserialize, Debug, Clone)]
pub struct FederatedClaims {
    /// The provider's stable subject identifier
    pub sub: String,
    /// Verified email address; absent on some provider account types
    pub email: Option<String>,
}

/// Verification seam for provider-issued identity assertions.
///
/// Every failure mode (network, signature, audience, issuer, expiry,
/// malformed input) collapses to `None` before crossing this boundary.
#[async_trait]
pub trait AssertionVerifier: Send + Sync {
    async fn verify(&self, assertion: &str) -> Option<FederatedClaims>;
}

/// Google's published JWKS endpoint
const GOOGLE_CERTS_URL: &str = "https://www.googleapis.com/oauth2/v3/certs";

/// Issuer values Google uses interchangeably
const GOOGLE_ISSUERS: [&str; 2] = ["accounts.google.com", "https://accounts.google.com"];

/// Bound on the JWKS fetch; a slow provider resolves to `None`, never to a
/// partially verified login.
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Verifies Google-issued ID tokens against Google's JWKS.
pub struct GoogleVerifier {
    audience: String,
    certs_url: String,
    http: reqwest::Client,
}

impl GoogleVerifier {
    /// Create a verifier for the given expected audience.
    pub fn new(audience: String) -> anyhow::Result<Self> {
        Self::with_certs_url(audience, GOOGLE_CERTS_URL.to_string())
    }

    /// Create a verifier fetching keys from a non-default URL.
    pub fn with_certs_url(audience: String, certs_url: String) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().timeout(FETCH_TIMEOUT).build()?;
        Ok(Self {
            audience,
            certs_url,
            http,
        })
    }

    async fn fetch_keys(&self) -> Option<JwkSet> {
        self.http
            .get(&self.certs_url)
            .send()
            .await
            .ok()?
            .error_for_status()
            .ok()?
            .json::<JwkSet>()
            .await
            .ok()
    }
}

#[async_trait]
impl AssertionVerifier for GoogleVerifier {
    async fn verify(&self, assertion: &str) -> Option<FederatedClaims> {
        // Key selection happens before any network round-trip; malformed
        // input never triggers a fetch.
        let header = decode_header(assertion).ok()?;
        let kid = header.kid?;

        let keys = self.fetch_keys().await?;
        let jwk = keys.find(&kid)?;
        let key = DecodingKey::from_jwk(jwk).ok()?;
        let algorithm = jwk
            .common
            .key_algorithm
            .and_then(|a| a.to_string().parse::<Algorithm>().ok())
            .unwrap_or(Algorithm::RS256);

        let mut validation = Validation::new(algorithm);
        validation.set_audience(&[self.audience.as_str()]);
        validation.set_issuer(&GOOGLE_ISSUERS);

        decode::<FederatedClaims>(assertion, &key, &validation)
            .ok()
            .map(|data| data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_malformed_assertion_short_circuits() {
        // An unreachable certs URL proves no fetch happens for garbage input
        let verifier = GoogleVerifier::with_certs_url(
            "expected-audience".to_string(),
            "http://127.0.0.1:1/certs".to_string(),
        )
        .unwrap();
        assert!(verifier.verify("").await.is_none());
        assert!(verifier.verify("not-a-jwt").await.is_none());
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_invalid() {
        let verifier = GoogleVerifier::with_certs_url(
            "expected-audience".to_string(),
            "http://127.0.0.1:1/certs".to_string(),
        )
        .unwrap();
        // Structurally plausible token with a kid, but the key fetch fails
        let header = jsonwebtoken::Header {
            kid: Some("some-key".to_string()),
            ..jsonwebtoken::Header::default()
        };
        let claims = serde_json::json!({
            "sub": "s", "email": "a@b.c", "exp": 4_102_444_800i64
        });
        let token = jsonwebtoken::encode(
            &header,
            &claims,
            &jsonwebtoken::EncodingKey::from_secret(b"k"),
        )
        .unwrap();
        assert!(verifier.verify(&token).await.is_none());
    }
}
