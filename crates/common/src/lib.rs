// ================
// common/src/lib.rs
// ================
//! Common types and structures
//! shared between the risk-assessment backend and its clients.
//! This module defines the authentication wire payloads and the token envelope.

use serde::{Deserialize, Serialize};

/// Account identifier type, assigned at creation and never reused
pub type AccountId = i64;

/// Signup request body
/// # Fields
/// * `username` - Desired unique username (case-sensitive)
/// * `password` - Plaintext password; hashed server-side, never stored or echoed
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
}

/// Public view of an account, returned from signup.
/// Deliberately excludes the password hash and federation linkage.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AccountOut {
    pub id: AccountId,
    pub username: String,
}

/// Login request, form-encoded
/// # Fields
/// * `username` - Account username
/// * `password` - Plaintext password to verify
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Federated login request carrying the provider-issued identity assertion
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct FederatedLoginRequest {
    /// The signed ID token issued by the external identity provider
    pub id_token: Option<String>,
}

/// Bearer-token envelope returned from every successful login path
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

impl TokenResponse {
    /// Wrap an access token in the standard bearer envelope
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}
