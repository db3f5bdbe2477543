// ============================
// riskweb-backend-lib/src/auth/token.rs
// ============================
//! Stateless access-token issuance and validation.
//!
//! Tokens are signed JWTs carrying the username and account id. There is no
//! server-side session store; expiry is the only termination mechanism.
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::error::AppError;
use riskweb_common::AccountId;

/// Claims embedded in an access token
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AccessClaims {
    /// Subject: the account's username
    pub sub: String,
    /// Account id
    pub uid: AccountId,
    /// Expiry, unix seconds
    pub exp: i64,
}

/// Issues and validates signed access tokens.
///
/// Constructed once at startup from injected configuration; the secret,
/// algorithm and lifetime are fixed for the process lifetime.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    algorithm: Algorithm,
    lifetime_minutes: i64,
}

impl TokenService {
    /// Build a token service from an explicit secret, algorithm and lifetime.
    pub fn new(secret: &str, algorithm: Algorithm, lifetime_minutes: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            algorithm,
            lifetime_minutes,
        }
    }

    /// Build a token service from loaded settings.
    /// Only the HMAC family is supported; anything else is a configuration
    /// error since the keys are derived from a shared secret.
    pub fn from_settings(settings: &Settings) -> Result<Self, AppError> {
        let algorithm = match settings.algorithm.as_str() {
            "HS256" => Algorithm::HS256,
            "HS384" => Algorithm::HS384,
            "HS512" => Algorithm::HS512,
            _ => return Err(AppError::Misconfigured("unsupported signing algorithm")),
        };
        if settings.secret_key.is_empty() {
            return Err(AppError::Misconfigured("signing secret missing"));
        }
        Ok(Self::new(
            &settings.secret_key,
            algorithm,
            settings.access_token_minutes,
        ))
    }

    /// Issue a signed token for an authenticated account.
    /// Expiry is `now + lifetime`; no other state is kept.
    pub fn issue(&self, username: &str, account_id: AccountId) -> Result<String, AppError> {
        let exp = (Utc::now() + Duration::minutes(self.lifetime_minutes)).timestamp();
        let claims = AccessClaims {
            sub: username.to_string(),
            uid: account_id,
            exp,
        };
        let token = encode(&Header::new(self.algorithm), &claims, &self.encoding)?;
        Ok(token)
    }

    /// Validate a token and return its claims.
    ///
    /// Fail-closed: signature mismatch, unsupported algorithm, malformed
    /// structure and elapsed expiry all collapse to `None`. Retrying the
    /// same input never changes the outcome.
    pub fn verify(&self, token: &str) -> Option<AccessClaims> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        decode::<AccessClaims>(token, &self.decoding, &validation)
            .ok()
            .map(|data| data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new("unit-test-secret", Algorithm::HS256, 60)
    }

    #[test]
    fn test_issue_then_verify_roundtrip() {
        let tokens = service();
        let token = tokens.issue("alice", 7).unwrap();
        let claims = tokens.verify(&token).expect("fresh token verifies");
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.uid, 7);
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn test_expired_token_is_invalid() {
        // Negative lifetime produces a correctly signed but already expired token
        let tokens = TokenService::new("unit-test-secret", Algorithm::HS256, -5);
        let token = tokens.issue("alice", 7).unwrap();
        assert!(tokens.verify(&token).is_none());
    }

    #[test]
    fn test_foreign_secret_is_invalid() {
        let ours = service();
        let theirs = TokenService::new("some-other-secret", Algorithm::HS256, 60);
        let token = theirs.issue("alice", 7).unwrap();
        assert!(ours.verify(&token).is_none());
    }

    #[test]
    fn test_tampered_payload_is_invalid() {
        let tokens = service();
        let token = tokens.issue("alice", 7).unwrap();

        // Flip one character in the payload segment
        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        assert_eq!(parts.len(), 3);
        let payload = &mut parts[1];
        let flipped = if payload.starts_with('A') { "B" } else { "A" };
        payload.replace_range(0..1, flipped);
        let tampered = parts.join(".");

        assert!(tokens.verify(&tampered).is_none());
    }

    #[test]
    fn test_garbage_is_invalid() {
        let tokens = service();
        assert!(tokens.verify("").is_none());
        assert!(tokens.verify("not-a-jwt").is_none());
        assert!(tokens.verify("a.b.c").is_none());
    }

    #[test]
    fn test_from_settings_rejects_non_hmac() {
        let settings = Settings {
            algorithm: "RS256".to_string(),
            ..Settings::default()
        };
        assert!(TokenService::from_settings(&settings).is_err());
    }

    #[test]
    fn test_from_settings_rejects_empty_secret() {
        let settings = Settings {
            secret_key: String::new(),
            ..Settings::default()
        };
        assert!(TokenService::from_settings(&settings).is_err());
    }
}
