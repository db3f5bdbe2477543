// ============================
// riskweb-backend-lib/src/auth/mod.rs
// ============================
//! Authentication module.

pub mod extract;
pub mod google;
pub mod password;
pub mod token;

pub use extract::extract_account_id;
pub use google::{AssertionVerifier, FederatedClaims, GoogleVerifier};
pub use password::{hash_password, placeholder_secret, verify_password};
pub use token::{AccessClaims, TokenService};
