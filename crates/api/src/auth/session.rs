//! Opaque admin session tokens.
//!
//! The cookie value is a random UUID; only its SHA-256 hex digest is stored
//! server-side so a database leak does not compromise active sessions.

use sha2::{Digest, Sha256};

/// Name of the admin session cookie.
pub const SESSION_COOKIE: &str = "admin_session";

/// Generate a cryptographically random session token.
///
/// Returns a tuple of `(plaintext_token, sha256_hex_hash)`. The plaintext is
/// set as the cookie value; only the hash should be persisted server-side.
pub fn generate_session_token() -> (String, String) {
    let plaintext = aquareport_core::credentials::generate_session_token();
    let hash = hash_session_token(&plaintext);
    (plaintext, hash)
}

/// Compute the SHA-256 hex digest of a session token.
///
/// Use this to compare an incoming cookie against the stored hash.
pub fn hash_session_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_token_hash_matches() {
        let (plaintext, hash) = generate_session_token();

        let rehashed = hash_session_token(&plaintext);
        assert_eq!(hash, rehashed, "hash of the same token must be stable");

        // Sanity: the hash should be a 64-char hex string (SHA-256).
        assert_eq!(hash.len(), 64);
    }

    #[test]
    fn test_tokens_are_unique() {
        let (a, _) = generate_session_token();
        let (b, _) = generate_session_token();
        assert_ne!(a, b);
    }
}
