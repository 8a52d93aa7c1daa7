//! Opaque admin session tokens.
//!
//! Tokens are random strings handed to the admin panel. Only their SHA-256
//! digest is kept server-side, so a memory dump of the session store does
//! not reveal usable tokens.

use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Generate a random session token.
///
/// Returns a tuple of `(plaintext_token, sha256_hex_hash)`. The plaintext is
/// sent to the client; only the hash should be retained.
pub fn generate_session_token() -> (String, String) {
    let plaintext = format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple());
    let hash = hash_session_token(&plaintext);
    (plaintext, hash)
}

/// Compute the SHA-256 hex digest of a session token.
pub fn hash_session_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}
