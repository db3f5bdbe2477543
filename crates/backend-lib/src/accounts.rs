// ============================
// riskweb-backend-lib/src/accounts.rs
// ============================
//! Account directory: the identity record and its storage contract.
//!
//! The relational engine behind a deployment is an external collaborator;
//! everything in the core reads and writes accounts through [`AccountStore`].
//! Whatever the backing store, the contract is that exactly one account per
//! username survives concurrent creation attempts.
use async_trait::async_trait;
use dashmap::{mapref::entry::Entry, DashMap};
use std::sync::atomic::{AtomicI64, Ordering};

use crate::auth::password::{hash_password, placeholder_secret};
use crate::error::AppError;
use riskweb_common::AccountId;

/// An identity record. Never deleted or mutated by the core; created on
/// signup or on first successful federated login.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: AccountId,
    /// Globally unique, case-sensitive. Federated accounts use the verified
    /// email address.
    pub username: String,
    /// One-way hash. Federated accounts hold a hashed random placeholder
    /// rather than a usable password.
    pub password_hash: Option<String>,
    /// External provider name, when federated
    pub provider: Option<String>,
    /// The provider's stable subject identifier, when federated
    pub federated_subject: Option<String>,
}

/// Fields for a new account row
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub password_hash: Option<String>,
    pub provider: Option<String>,
    pub federated_subject: Option<String>,
}

impl NewAccount {
    /// A locally provisioned account with a password hash
    pub fn local(username: String, password_hash: String) -> Self {
        Self {
            username,
            password_hash: Some(password_hash),
            provider: None,
            federated_subject: None,
        }
    }
}

/// Narrow storage contract for identity records.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Look up an account by its unique username.
    async fn find_by_username(&self, username: &str) -> Option<Account>;

    /// Insert a new account. Fails with [`AppError::UsernameTaken`] when the
    /// username exists; the check-then-insert is atomic with respect to
    /// concurrent duplicate signups.
    async fn create(&self, new: NewAccount) -> Result<Account, AppError>;

    /// Idempotent provisioning for federated logins: return the account whose
    /// username is `email`, creating it with an unusable placeholder secret
    /// when absent. Concurrent calls for the same email resolve to one
    /// account.
    async fn get_or_create_federated(
        &self,
        email: &str,
        provider: &str,
        subject: &str,
    ) -> Result<Account, AppError>;
}

/// In-process account store keyed by username.
///
/// DashMap's entry API locks the key's shard, which gives the
/// reject-on-conflict uniqueness guarantee without a separate transaction.
pub struct MemoryAccounts {
    by_username: DashMap<String, Account>,
    next_id: AtomicI64,
}

impl MemoryAccounts {
    pub fn new() -> Self {
        Self {
            by_username: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for MemoryAccounts {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountStore for MemoryAccounts {
    async fn find_by_username(&self, username: &str) -> Option<Account> {
        self.by_username.get(username).map(|a| a.clone())
    }

    async fn create(&self, new: NewAccount) -> Result<Account, AppError> {
        match self.by_username.entry(new.username.clone()) {
            Entry::Occupied(_) => Err(AppError::UsernameTaken),
            Entry::Vacant(slot) => {
                let account = Account {
                    id: self.next_id.fetch_add(1, Ordering::SeqCst),
                    username: new.username,
                    password_hash: new.password_hash,
                    provider: new.provider,
                    federated_subject: new.federated_subject,
                };
                slot.insert(account.clone());
                Ok(account)
            },
        }
    }

    async fn get_or_create_federated(
        &self,
        email: &str,
        provider: &str,
        subject: &str,
    ) -> Result<Account, AppError> {
        if let Some(existing) = self.find_by_username(email).await {
            return Ok(existing);
        }

        // Hash before taking the entry lock; scrypt work must not run under it
        let hash = hash_password(&placeholder_secret())?;

        match self.by_username.entry(email.to_string()) {
            // Lost the race to a concurrent login for the same email
            Entry::Occupied(existing) => Ok(existing.get().clone()),
            Entry::Vacant(slot) => {
                let account = Account {
                    id: self.next_id.fetch_add(1, Ordering::SeqCst),
                    username: email.to_string(),
                    password_hash: Some(hash),
                    provider: Some(provider.to_string()),
                    federated_subject: Some(subject.to_string()),
                };
                slot.insert(account.clone());
                Ok(account)
            },
        }
    }
}
