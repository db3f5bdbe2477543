// ============================
// riskweb-backend-lib/src/lib.rs
// ============================
//! Authentication & identity core for the risk-assessment backend.

pub mod accounts;
pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod router;

use std::sync::Arc;

use crate::accounts::{AccountStore, MemoryAccounts};
use crate::auth::{extract_account_id as extract, AssertionVerifier, GoogleVerifier, TokenService};
use crate::config::Settings;
use crate::error::AppError;
use riskweb_common::AccountId;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Account directory
    pub accounts: Arc<dyn AccountStore>,
    /// Token issuance and validation
    pub tokens: TokenService,
    /// Federated assertion verifier; `None` when no audience is configured,
    /// in which case federated login answers a misconfiguration error
    pub google: Option<Arc<dyn AssertionVerifier>>,
    /// Immutable process configuration
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Create the application state from loaded settings.
    pub fn new(settings: Settings) -> Result<Self, AppError> {
        let tokens = TokenService::from_settings(&settings)?;
        let google = match settings.google_client_id.clone() {
            Some(audience) => Some(Arc::new(GoogleVerifier::new(audience)?)
                as Arc<dyn AssertionVerifier>),
            None => None,
        };
        Ok(Self {
            accounts: Arc::new(MemoryAccounts::new()),
            tokens,
            google,
            settings: Arc::new(settings),
        })
    }

    /// Swap in a different account store (a SQL-backed one, or a test double).
    pub fn with_accounts(mut self, accounts: Arc<dyn AccountStore>) -> Self {
        self.accounts = accounts;
        self
    }

    /// Swap in a different assertion verifier.
    pub fn with_verifier(mut self, verifier: Arc<dyn AssertionVerifier>) -> Self {
        self.google = Some(verifier);
        self
    }

    /// Best-effort identity extraction for consumers outside the auth
    /// surface: resolve an optional bearer header to an account id, or
    /// `None` when no identity can be established.
    pub fn extract_account_id(&self, authorization: Option<&str>) -> Option<AccountId> {
        extract(&self.tokens, authorization)
    }
}
