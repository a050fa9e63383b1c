//! Refresh flow orchestration and rotation.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{info, warn};

use authgate_core::config::TokenConfig;
use authgate_core::error::AppError;
use authgate_core::result::AppResult;
use authgate_entity::token::TokenPair;
use authgate_entity::user::UserStore;

use crate::jwt::JwtDecoder;
use crate::token::TokenIssuer;

/// Orchestrates the refresh flow: introspects the expired access token,
/// checks the presented refresh token against stored state, reissues, and
/// rotates the stored refresh token with a conditional write.
///
/// Rotation is single-use: the conditional write only lands if the stored
/// token still equals the one that was just validated, so of two racing
/// refreshes exactly one wins and the other is rejected. All rejection
/// causes collapse into one `RefreshRejected` kind; the specific cause is
/// only logged.
pub struct RefreshCoordinator {
    decoder: JwtDecoder,
    issuer: TokenIssuer,
    store: Arc<dyn UserStore>,
    refresh_ttl_days: i64,
}

impl std::fmt::Debug for RefreshCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshCoordinator")
            .field("refresh_ttl_days", &self.refresh_ttl_days)
            .finish_non_exhaustive()
    }
}

impl RefreshCoordinator {
    /// Create a new refresh coordinator over the given store.
    pub fn new(store: Arc<dyn UserStore>, config: &TokenConfig) -> Self {
        Self {
            decoder: JwtDecoder::new(config),
            issuer: TokenIssuer::new(config),
            store,
            refresh_ttl_days: config.refresh_ttl_days as i64,
        }
    }

    /// Exchange an expired access token plus a valid refresh token for a
    /// fresh pair. The presented refresh token becomes unusable on success.
    pub async fn refresh(
        &self,
        access_token: &str,
        refresh_token: &str,
    ) -> AppResult<TokenPair> {
        // Signature and algorithm are enforced; expiry deliberately is not.
        let claims = self.decoder.decode_expired(access_token)?;

        let Some(user) = self.store.find_by_email(claims.subject()).await? else {
            warn!(subject = %claims.subject(), "refresh rejected: unknown subject");
            return Err(Self::rejected());
        };

        if !user.refresh_token_matches(refresh_token) {
            warn!(user_id = %user.id, "refresh rejected: token mismatch or expired");
            return Err(Self::rejected());
        }

        // Non-identity claims carry through; the issuer mints a fresh jti.
        let pair = self.issuer.issue(&user.email, &claims.extra)?;
        let refresh_expires_at = Utc::now() + Duration::days(self.refresh_ttl_days);

        let rotated = self
            .store
            .rotate_refresh_token(user.id, refresh_token, &pair.refresh_token, refresh_expires_at)
            .await?;

        if !rotated {
            warn!(user_id = %user.id, "refresh rejected: lost rotation race");
            return Err(Self::rejected());
        }

        info!(user_id = %user.id, "refresh token rotated");
        Ok(pair)
    }

    fn rejected() -> AppError {
        AppError::refresh_rejected("Refresh rejected")
    }
}
