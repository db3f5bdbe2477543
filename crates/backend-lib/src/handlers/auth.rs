// ============================
// riskweb-backend-lib/src/handlers/auth.rs
// ============================
//! Signup, login and federated-login handlers.
use axum::{extract::State, Form, Json};
use metrics::counter;
use std::sync::Arc;
use tracing::info;

use crate::accounts::NewAccount;
use crate::auth::password::{hash_password, verify_password};
use crate::error::AppError;
use crate::AppState;
use riskweb_common::{
    AccountOut, FederatedLoginRequest, LoginForm, SignupRequest, TokenResponse,
};

/// `POST /auth/signup` - provision a local account.
///
/// The response carries the assigned id and username only; the password is
/// hashed and discarded.
pub async fn signup(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SignupRequest>,
) -> Result<Json<AccountOut>, AppError> {
    if req.username.trim().is_empty() || req.password.is_empty() {
        return Err(AppError::InvalidInput(
            "username and password are required".to_string(),
        ));
    }

    let hash = hash_password(&req.password)?;
    let account = state
        .accounts
        .create(NewAccount::local(req.username, hash))
        .await?;

    counter!("auth.signup.created").increment(1);
    info!(username = %account.username, id = account.id, "account created");

    Ok(Json(AccountOut {
        id: account.id,
        username: account.username,
    }))
}

/// `POST /auth/login` - verify a password and mint a token.
///
/// Unknown username, wrong password and a passwordless record all answer the
/// same `Unauthorized`.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Form(form): Form<LoginForm>,
) -> Result<Json<TokenResponse>, AppError> {
    let Some(account) = state.accounts.find_by_username(&form.username).await else {
        counter!("auth.login.failed").increment(1);
        return Err(AppError::InvalidCredentials);
    };
    let Some(hash) = account.password_hash.as_deref() else {
        counter!("auth.login.failed").increment(1);
        return Err(AppError::InvalidCredentials);
    };
    if !verify_password(hash, &form.password) {
        counter!("auth.login.failed").increment(1);
        return Err(AppError::InvalidCredentials);
    }

    let token = state.tokens.issue(&account.username, account.id)?;
    counter!("auth.login.success").increment(1);
    info!(username = %account.username, "login succeeded");

    Ok(Json(TokenResponse::bearer(token)))
}

/// `POST /auth/google` - accept a provider-issued identity assertion.
///
/// Requires the expected audience to be configured; verification is never
/// silently skipped. First login for an email provisions the account.
pub async fn google_login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<FederatedLoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let assertion = req
        .id_token
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(AppError::MissingAssertion)?;

    let Some(verifier) = state.google.as_ref() else {
        return Err(AppError::Misconfigured("GOOGLE_CLIENT_ID missing"));
    };

    let claims = verifier
        .verify(assertion)
        .await
        .ok_or(AppError::InvalidAssertion)?;
    let email = claims.email.ok_or(AppError::MissingEmail)?;

    let account = state
        .accounts
        .get_or_create_federated(&email, "google", &claims.sub)
        .await?;
    let token = state.tokens.issue(&account.username, account.id)?;

    counter!("auth.login.federated").increment(1);
    info!(id = account.id, "federated login succeeded");

    Ok(Json(TokenResponse::bearer(token)))
}
