//! Refresh-state revocation.

use std::sync::Arc;

use tracing::info;

use authgate_core::error::AppError;
use authgate_core::result::AppResult;
use authgate_entity::user::UserStore;

/// Clears a user's stored refresh-token state, ending their ability to
/// refresh. Already-issued access tokens stay valid until natural expiry.
///
/// The caller's email must come from an already-verified identity, not
/// from request input; the routing layer owns that check.
pub struct RevocationService {
    store: Arc<dyn UserStore>,
}

impl std::fmt::Debug for RevocationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RevocationService").finish_non_exhaustive()
    }
}

impl RevocationService {
    /// Create a new revocation service over the given store.
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Revoke the user's refresh state. Idempotent for existing users;
    /// a nonexistent email is a `NotFound` error.
    pub async fn revoke(&self, email: &str) -> AppResult<()> {
        if !self.store.clear_refresh_token(email).await? {
            return Err(AppError::not_found("No user with that email"));
        }
        info!(email, "refresh state revoked");
        Ok(())
    }
}
