//! Argon2id credential hashing and verification.
//!
//! Digests are PHC strings carrying the per-hash random salt and the cost
//! parameters, so stored hashes remain verifiable across parameter changes.
//! Verification is delegated to the argon2 crate and never falls back to
//! string equality on raw digests.

use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use authgate_core::error::AppError;
use authgate_core::result::AppResult;

/// One-way transform of plaintext credentials into comparable digests.
#[derive(Debug, Clone)]
pub struct PasswordHasher;

impl PasswordHasher {
    /// Create a new password hasher instance.
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password with Argon2id and a fresh random salt.
    pub fn hash(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let digest = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;
        Ok(digest.to_string())
    }

    /// Verify a plaintext password against a stored PHC digest.
    ///
    /// Returns `Ok(false)` on a mismatch; `Err` only when the stored digest
    /// is unparseable or the verifier itself fails.
    pub fn verify(&self, password: &str, digest: &str) -> AppResult<bool> {
        let parsed = PasswordHash::new(digest)
            .map_err(|e| AppError::internal(format!("Invalid password digest format: {e}")))?;

        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AppError::internal(format!(
                "Password verification failed: {e}"
            ))),
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_round_trips() {
        let hasher = PasswordHasher::new();
        let digest = hasher.hash("correct horse battery staple").unwrap();
        assert!(hasher.verify("correct horse battery staple", &digest).unwrap());
        assert!(!hasher.verify("wrong password", &digest).unwrap());
    }

    #[test]
    fn same_password_hashes_differently() {
        let hasher = PasswordHasher::new();
        let a = hasher.hash("password").unwrap();
        let b = hasher.hash("password").unwrap();
        // Per-hash random salts make digests non-deterministic.
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_digest_is_an_error_not_a_mismatch() {
        let hasher = PasswordHasher::new();
        assert!(hasher.verify("password", "not-a-phc-string").is_err());
    }
}
