//! PostgreSQL-backed user store.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tokio::time::timeout;
use uuid::Uuid;

use authgate_core::config::DatabaseConfig;
use authgate_core::error::{AppError, ErrorKind};
use authgate_core::result::AppResult;
use authgate_entity::user::{CreateUser, User, UserStore};

/// PostgreSQL implementation of [`UserStore`].
///
/// Every call is bounded by the configured query timeout; an elapsed bound
/// surfaces as `StoreUnavailable`, the same as any driver failure.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
    query_timeout: Duration,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool, config: &DatabaseConfig) -> Self {
        Self {
            pool,
            query_timeout: Duration::from_secs(config.query_timeout_seconds),
        }
    }

    /// Run a query future under the configured time bound.
    async fn bounded<T>(
        &self,
        op: &'static str,
        fut: impl Future<Output = Result<T, sqlx::Error>> + Send,
    ) -> AppResult<T> {
        match timeout(self.query_timeout, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(AppError::with_source(
                ErrorKind::StoreUnavailable,
                format!("{op} failed: {e}"),
                e,
            )),
            Err(_) => Err(AppError::store_unavailable(format!(
                "{op} timed out after {:?}",
                self.query_timeout
            ))),
        }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        // Exact, case-sensitive match.
        self.bounded(
            "find_by_email",
            sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
                .bind(email)
                .fetch_optional(&self.pool),
        )
        .await
    }

    async fn create(&self, user: &CreateUser) -> AppResult<User> {
        self.bounded(
            "create_user",
            sqlx::query_as::<_, User>(
                "INSERT INTO users (email, password_hash) VALUES ($1, $2) RETURNING *",
            )
            .bind(&user.email)
            .bind(&user.password_hash)
            .fetch_one(&self.pool),
        )
        .await
    }

    async fn store_refresh_token(
        &self,
        user_id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()> {
        let result = self
            .bounded(
                "store_refresh_token",
                sqlx::query(
                    "UPDATE users \
                     SET refresh_token = $2, refresh_token_expires_at = $3, updated_at = now() \
                     WHERE id = $1",
                )
                .bind(user_id)
                .bind(token)
                .bind(expires_at)
                .execute(&self.pool),
            )
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::store_unavailable(
                "User row disappeared while persisting refresh token",
            ));
        }
        Ok(())
    }

    async fn rotate_refresh_token(
        &self,
        user_id: Uuid,
        current: &str,
        new_token: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<bool> {
        // Conditional write: only one of two racing refreshes can match the
        // stored token, so rotation has a single winner.
        let result = self
            .bounded(
                "rotate_refresh_token",
                sqlx::query(
                    "UPDATE users \
                     SET refresh_token = $3, refresh_token_expires_at = $4, updated_at = now() \
                     WHERE id = $1 AND refresh_token = $2",
                )
                .bind(user_id)
                .bind(current)
                .bind(new_token)
                .bind(expires_at)
                .execute(&self.pool),
            )
            .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn clear_refresh_token(&self, email: &str) -> AppResult<bool> {
        let result = self
            .bounded(
                "clear_refresh_token",
                sqlx::query(
                    "UPDATE users \
                     SET refresh_token = NULL, refresh_token_expires_at = NULL, \
                         updated_at = now() \
                     WHERE email = $1",
                )
                .bind(email)
                .execute(&self.pool),
            )
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
