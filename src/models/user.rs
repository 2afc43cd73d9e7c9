//! User model and password digest helpers.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// One row of the credential table.
///
/// Created at registration, immutable thereafter, never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique username (also names the user's record partition)
    #[serde(rename = "Username")]
    pub username: String,
    /// Lowercase hex SHA-256 digest of the password
    #[serde(rename = "PasswordHash")]
    pub password_hash: String,
}

/// Compute the one-way digest stored in place of the plaintext password.
pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// Compare a candidate password against a stored digest in constant time.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let candidate = hash_password(password);
    candidate.as_bytes().ct_eq(stored_hash.as_bytes()).into()
}

/// Usernames double as directory names, so keep them path-safe.
pub fn is_valid_username(username: &str) -> bool {
    !username.is_empty()
        && username.len() <= 64
        && username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
