// ============================
// riskweb-backend-lib/src/auth/extract.rs
// ============================
//! Best-effort identity extraction from a bearer header.
//!
//! Consumed by unrelated request handlers (prediction history and the like)
//! that want to tag or filter by the caller's account when one can be
//! established, and degrade to an anonymous view when it cannot. Absence of
//! identity is a normal outcome here, never an error.
use super::token::TokenService;
use riskweb_common::AccountId;

/// Length of the `"Bearer "` scheme prefix
const BEARER_PREFIX_LEN: usize = 7;

/// Resolve the caller's account id from an optional `Authorization` header
/// value. Returns `None` for an absent header, a non-bearer scheme, or any
/// token the service does not accept.
pub fn extract_account_id(tokens: &TokenService, authorization: Option<&str>) -> Option<AccountId> {
    let value = authorization?.trim();
    let prefix = value.get(..BEARER_PREFIX_LEN)?;
    if !prefix.eq_ignore_ascii_case("bearer ") {
        return None;
    }
    let token = value[BEARER_PREFIX_LEN..].trim();
    let claims = tokens.verify(token)?;
    Some(claims.uid)
}
