//! Sign-in flow orchestration.

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde_json::Map;
use tracing::info;

use authgate_core::config::TokenConfig;
use authgate_core::error::AppError;
use authgate_core::result::AppResult;
use authgate_entity::token::TokenPair;
use authgate_entity::user::UserStore;

use crate::credentials::CredentialValidator;
use crate::token::TokenIssuer;

/// Orchestrates password sign-in: credential validation, token issuance,
/// and refresh-token persistence.
///
/// Every credential mismatch maps to one generic `Authentication`
/// rejection; store failures keep their own kind and are never swallowed.
pub struct SessionManager {
    validator: CredentialValidator,
    issuer: TokenIssuer,
    store: Arc<dyn UserStore>,
    refresh_ttl_days: i64,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("refresh_ttl_days", &self.refresh_ttl_days)
            .finish_non_exhaustive()
    }
}

impl SessionManager {
    /// Create a new session manager over the given store.
    pub fn new(store: Arc<dyn UserStore>, config: &TokenConfig) -> Self {
        Self {
            validator: CredentialValidator::new(store.clone()),
            issuer: TokenIssuer::new(config),
            store,
            refresh_ttl_days: config.refresh_ttl_days as i64,
        }
    }

    /// Sign a user in with email and password.
    ///
    /// On success the issued refresh token and its expiry are persisted on
    /// the user record in the same logical operation, then the pair is
    /// returned.
    pub async fn sign_in(&self, email: &str, password: &str) -> AppResult<TokenPair> {
        let Some(user) = self.validator.validate(email, password).await? else {
            return Err(AppError::authentication("Invalid email or password"));
        };

        let pair = self.issuer.issue(&user.email, &Map::new())?;
        let refresh_expires_at = Utc::now() + Duration::days(self.refresh_ttl_days);

        self.store
            .store_refresh_token(user.id, &pair.refresh_token, refresh_expires_at)
            .await?;

        info!(user_id = %user.id, "sign-in succeeded");
        Ok(pair)
    }
}
