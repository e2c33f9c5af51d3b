//! Token fingerprints.
//!
//! Revoked tokens are remembered by SHA-256 digest, never verbatim.

use sha2::{Digest, Sha256};

/// Hash a token for storage using SHA-256
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    let result = hasher.finalize();
    base64::Engine::encode(&base64::engine::general_purpose::URL_SAFE_NO_PAD, result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_hashing() {
        let token = "header.payload.signature";
        let hash = hash_token(token);

        assert_ne!(token, hash);
        assert_eq!(hash, hash_token(token));
        assert_ne!(hash, hash_token("header.payload.other"));
    }

    #[test]
    fn test_hash_is_url_safe() {
        let hash = hash_token("anything");
        assert!(!hash.contains('+'));
        assert!(!hash.contains('/'));
        assert!(!hash.contains('='));
    }
}
