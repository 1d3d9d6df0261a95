use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::error::ApiError;

/// Hash a password with Argon2id. The salt is generated per call and
/// embedded in the resulting hash string, so two hashes of the same
/// password never compare equal.
pub fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| {
            tracing::error!("Password hashing failed: {}", e);
            ApiError::internal_server_error("Failed to process credentials")
        })?
        .to_string();

    Ok(hash)
}

/// Verify a plaintext against a stored hash using constant-time comparison.
/// A mismatch is an ordinary `false`; only a malformed stored hash is an
/// error.
pub fn verify_password(password: &str, hashed: &str) -> Result<bool, ApiError> {
    let parsed = PasswordHash::new(hashed).map_err(|e| {
        tracing::error!("Stored password hash is malformed: {}", e);
        ApiError::internal_server_error("Failed to process credentials")
    })?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => {
            tracing::error!("Password verification failed unexpectedly: {}", e);
            Err(ApiError::internal_server_error("Failed to process credentials"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_password_verifies() {
        let hash = hash_password("correct horse battery").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("correct horse battery", &hash).unwrap());
    }

    #[test]
    fn wrong_password_is_rejected() {
        let hash = hash_password("correct horse battery").unwrap();
        assert!(!verify_password("incorrect horse", &hash).unwrap());
    }

    #[test]
    fn same_password_hashes_differently() {
        let first = hash_password("admin").unwrap();
        let second = hash_password("admin").unwrap();
        assert_ne!(first, second);
        assert!(verify_password("admin", &first).unwrap());
        assert!(verify_password("admin", &second).unwrap());
    }

    #[test]
    fn garbage_stored_hash_is_an_error() {
        assert!(verify_password("anything", "not-a-phc-string").is_err());
    }
}
