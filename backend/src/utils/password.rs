//! Password hashing and verification.
//!
//! Wraps bcrypt so the rest of the application never touches raw salts or
//! cost factors. Each hash call generates a fresh random salt; the salt is
//! embedded in the encoded hash string.

use crate::errors::{ServiceError, ServiceResult};
use bcrypt::{DEFAULT_COST, hash, verify};

/// Hashes a plaintext password for storage.
pub fn hash_password(password: &str) -> ServiceResult<String> {
    hash(password, DEFAULT_COST)
        .map_err(|e| ServiceError::internal_error(format!("Password hashing failed: {e}")))
}

/// Verifies a plaintext password against a stored hash.
///
/// Returns `false` for a mismatch or a malformed stored hash; callers never
/// learn which of the two occurred.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    verify(password, stored_hash).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hashed = hash_password("s3cret-pw").unwrap();

        assert_ne!(hashed, "s3cret-pw");
        assert!(verify_password("s3cret-pw", &hashed));
        assert!(!verify_password("wrong-pw", &hashed));
    }

    #[test]
    fn test_fresh_salt_per_hash() {
        let first = hash_password("same-password").unwrap();
        let second = hash_password("same-password").unwrap();

        assert_ne!(first, second);
        assert!(verify_password("same-password", &first));
        assert!(verify_password("same-password", &second));
    }

    #[test]
    fn test_malformed_hash_is_a_mismatch() {
        assert!(!verify_password("anything", "not-a-bcrypt-hash"));
        assert!(!verify_password("anything", ""));
    }
}
