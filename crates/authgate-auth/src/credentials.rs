//! Login-attempt validation against stored credential state.

use std::sync::Arc;

use tracing::debug;

use authgate_core::result::AppResult;
use authgate_entity::user::{User, UserStore};

use crate::password::PasswordHasher;

/// A parseable Argon2id digest that matches no password. Verified against
/// when the email is unknown so both rejection paths cost a hash check.
const PHANTOM_DIGEST: &str = "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$MDEyMzQ1Njc4OWFiY2RlZjAxMjM0NTY3ODlhYmNkZWY";

/// Checks a login attempt against the stored user record.
///
/// "Unknown email" and "wrong password" are indistinguishable to the
/// caller: both come back as `Ok(None)`. Only store or verifier failures
/// surface as errors.
pub struct CredentialValidator {
    store: Arc<dyn UserStore>,
    hasher: PasswordHasher,
}

impl std::fmt::Debug for CredentialValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialValidator").finish_non_exhaustive()
    }
}

impl CredentialValidator {
    /// Create a validator over the given store.
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self {
            store,
            hasher: PasswordHasher::new(),
        }
    }

    /// Validate an email/password pair. `Ok(None)` covers every credential
    /// mismatch; `Ok(Some(user))` only when both email and password match.
    pub async fn validate(&self, email: &str, password: &str) -> AppResult<Option<User>> {
        match self.store.find_by_email(email).await? {
            Some(user) => {
                if self.hasher.verify(password, &user.password_hash)? {
                    Ok(Some(user))
                } else {
                    debug!(email, "credential validation failed: password mismatch");
                    Ok(None)
                }
            }
            None => {
                // Keep latency comparable to the found-user path.
                let _ = self.hasher.verify(password, PHANTOM_DIGEST);
                debug!(email, "credential validation failed: unknown email");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use authgate_database::MemoryUserStore;
    use authgate_entity::user::CreateUser;

    async fn store_with_user(email: &str, password: &str) -> Arc<MemoryUserStore> {
        let store = Arc::new(MemoryUserStore::new());
        let password_hash = PasswordHasher::new().hash(password).unwrap();
        store
            .create(&CreateUser {
                email: email.to_string(),
                password_hash,
            })
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn matching_credentials_return_the_user() {
        let store = store_with_user("alice@example.com", "hunter2!").await;
        let validator = CredentialValidator::new(store);
        let user = validator
            .validate("alice@example.com", "hunter2!")
            .await
            .unwrap();
        assert_eq!(user.unwrap().email, "alice@example.com");
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_look_identical() {
        let store = store_with_user("alice@example.com", "hunter2!").await;
        let validator = CredentialValidator::new(store);

        let wrong_password = validator
            .validate("alice@example.com", "wrong")
            .await
            .unwrap();
        let unknown_email = validator
            .validate("nobody@example.com", "hunter2!")
            .await
            .unwrap();
        assert!(wrong_password.is_none());
        assert!(unknown_email.is_none());
    }

    #[tokio::test]
    async fn email_match_is_case_sensitive() {
        let store = store_with_user("alice@example.com", "hunter2!").await;
        let validator = CredentialValidator::new(store);
        let user = validator
            .validate("Alice@example.com", "hunter2!")
            .await
            .unwrap();
        assert!(user.is_none());
    }

    #[test]
    fn phantom_digest_parses_and_matches_nothing() {
        let hasher = PasswordHasher::new();
        assert!(!hasher.verify("any password", PHANTOM_DIGEST).unwrap());
    }
}
