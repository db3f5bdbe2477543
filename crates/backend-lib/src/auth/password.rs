// ============================
// riskweb-backend-lib/src/auth/password.rs
// ============================
//! Password hashing and verification.
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::RngCore;
use scrypt::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
    },
    Scrypt,
};

/// Entropy of the unusable placeholder secret, in bytes
const PLACEHOLDER_SECRET_BYTES: usize = 16;

/// Hash a password using scrypt
pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Scrypt
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("password hashing failed: {e}"))?
        .to_string();
    Ok(hash)
}

/// Verify a password against a hash.
/// A malformed stored hash verifies as false, indistinguishable from a
/// wrong password. The digest comparison inside scrypt is constant-time.
pub fn verify_password(hash: &str, plain: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };
    Scrypt.verify_password(plain.as_bytes(), &parsed_hash).is_ok()
}

/// Generate the random secret hashed into federated accounts in place of a
/// password. The value is discarded after hashing and never disclosed, so
/// the account cannot be logged into with a local password.
pub fn placeholder_secret() -> String {
    let mut buffer = [0u8; PLACEHOLDER_SECRET_BYTES];
    rand::rng().fill_bytes(&mut buffer);
    URL_SAFE_NO_PAD.encode(buffer)
}
