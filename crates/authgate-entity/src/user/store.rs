//! Persistence port for user records and refresh-token state.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use authgate_core::result::AppResult;

use super::model::{CreateUser, User};

/// Port trait over the persistent user store.
///
/// The lifecycle core talks to persistence exclusively through this trait;
/// `authgate-database` provides the PostgreSQL and in-memory
/// implementations. Implementations must report read/write failures and
/// exceeded time bounds as `StoreUnavailable` errors rather than swallowing
/// or retrying them.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Find a user by email. The match is exact and case-sensitive.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Create a new user and return the stored record.
    async fn create(&self, user: &CreateUser) -> AppResult<User>;

    /// Persist a refresh token and its expiry on the user row,
    /// overwriting whatever was stored before. Used on sign-in.
    async fn store_refresh_token(
        &self,
        user_id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()>;

    /// Conditionally replace the stored refresh token: the write happens
    /// only if the stored token still equals `current`. Returns `false`
    /// when the condition no longer holds, which means a concurrent
    /// rotation won the race.
    async fn rotate_refresh_token(
        &self,
        user_id: Uuid,
        current: &str,
        new_token: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<bool>;

    /// Clear the refresh token and its expiry for the given email.
    /// Returns `true` if a user with that email exists, whether or not a
    /// token was stored (revocation is idempotent).
    async fn clear_refresh_token(&self, email: &str) -> AppResult<bool>;
}
