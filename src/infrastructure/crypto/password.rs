//! Password hashing

use bcrypt::{hash, verify, DEFAULT_COST};

use crate::shared::InfraError;

/// Hash a plaintext password with bcrypt. The digest is one-way; login
/// re-verifies against it, nothing ever decodes it.
pub fn hash_password(password: &str) -> Result<String, InfraError> {
    hash(password, DEFAULT_COST).map_err(|e| InfraError::Crypto(e.to_string()))
}

/// Verify a candidate password against a stored bcrypt digest.
pub fn verify_password(password: &str, hashed: &str) -> Result<bool, InfraError> {
    verify(password, hashed).map_err(|e| InfraError::Crypto(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_matches_only_the_original_password() {
        let digest = hash_password("longpassjkd").unwrap();
        assert!(verify_password("longpassjkd", &digest).unwrap());
        assert!(!verify_password("wrong", &digest).unwrap());
    }

    #[test]
    fn malformed_digest_is_an_error() {
        assert!(verify_password("x", "not-a-bcrypt-digest").is_err());
    }
}
