//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered user account.
///
/// The `(refresh_token, refresh_token_expires_at)` pair is the only
/// server-side mutable session state in the lifecycle core. The two fields
/// are always set together on issuance and cleared together on revocation;
/// the database enforces the same invariant with a CHECK constraint.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Email address (unique, matched case-sensitively).
    pub email: String,
    /// Argon2id password hash in PHC string format.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Currently valid opaque refresh token, if one has been issued.
    pub refresh_token: Option<String>,
    /// Expiry of the stored refresh token.
    pub refresh_token_expires_at: Option<DateTime<Utc>>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check whether a refresh token is currently stored and unexpired.
    pub fn has_active_refresh_token(&self) -> bool {
        match (&self.refresh_token, self.refresh_token_expires_at) {
            (Some(_), Some(expires_at)) => expires_at > Utc::now(),
            _ => false,
        }
    }

    /// Check whether `presented` matches the stored refresh token and the
    /// stored expiry is strictly in the future.
    ///
    /// All three conditions must hold; a cleared or expired refresh state
    /// never matches anything.
    pub fn refresh_token_matches(&self, presented: &str) -> bool {
        match (&self.refresh_token, self.refresh_token_expires_at) {
            (Some(stored), Some(expires_at)) => stored == presented && expires_at > Utc::now(),
            _ => false,
        }
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Email address.
    pub email: String,
    /// Pre-hashed password (PHC string).
    pub password_hash: String,
}
