//! End-to-end lifecycle flows against the in-memory store: sign-in,
//! refresh rotation, and revocation.

use std::sync::Arc;

use chrono::{Duration, NaiveDateTime, Utc};
use serde_json::Map;
use uuid::Uuid;

use authgate_auth::jwt::{Claims, JwtDecoder, JwtEncoder};
use authgate_auth::password::PasswordHasher;
use authgate_auth::session::{RefreshCoordinator, RevocationService, SessionManager};
use authgate_core::config::TokenConfig;
use authgate_core::error::ErrorKind;
use authgate_database::MemoryUserStore;
use authgate_entity::token::pair::DATE_FORMAT;
use authgate_entity::user::{CreateUser, User, UserStore};

const EMAIL: &str = "alice@example.com";
const PASSWORD: &str = "correct horse battery staple";

fn token_config() -> TokenConfig {
    TokenConfig {
        secret: "flow-test-secret-key".to_string(),
        issuer: "authgate".to_string(),
        audience: "authgate-clients".to_string(),
        access_ttl_minutes: 30,
        refresh_ttl_days: 7,
        leeway_seconds: 0,
    }
}

async fn seeded_store() -> Arc<MemoryUserStore> {
    let store = Arc::new(MemoryUserStore::new());
    let password_hash = PasswordHasher::new().hash(PASSWORD).unwrap();
    store
        .create(&CreateUser {
            email: EMAIL.to_string(),
            password_hash,
        })
        .await
        .unwrap();
    store
}

async fn stored_user(store: &MemoryUserStore) -> User {
    store.find_by_email(EMAIL).await.unwrap().unwrap()
}

/// Sign a token with the flow secret but an expiry already in the past.
fn expired_access_token(config: &TokenConfig) -> String {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: EMAIL.to_string(),
        iss: config.issuer.clone(),
        aud: config.audience.clone(),
        iat: now - 3600,
        exp: now - 1800,
        jti: Uuid::new_v4(),
        extra: Map::new(),
    };
    JwtEncoder::new(config).encode(&claims).unwrap()
}

#[tokio::test]
async fn sign_in_issues_and_persists_a_pair() {
    let config = token_config();
    let store = seeded_store().await;
    let manager = SessionManager::new(store.clone(), &config);

    let pair = manager.sign_in(EMAIL, PASSWORD).await.unwrap();
    assert!(pair.authenticated);

    let created = NaiveDateTime::parse_from_str(&pair.created_date, DATE_FORMAT).unwrap();
    let expires = NaiveDateTime::parse_from_str(&pair.expiration_date, DATE_FORMAT).unwrap();
    assert_eq!(expires - created, Duration::minutes(30));

    let user = stored_user(&store).await;
    assert_eq!(user.refresh_token.as_deref(), Some(pair.refresh_token.as_str()));
    assert!(user.refresh_token_expires_at.unwrap() > Utc::now());
}

#[tokio::test]
async fn bad_credentials_are_one_generic_rejection_without_mutation() {
    let config = token_config();
    let store = seeded_store().await;
    let manager = SessionManager::new(store.clone(), &config);

    let wrong_password = manager.sign_in(EMAIL, "wrong").await.unwrap_err();
    let unknown_email = manager.sign_in("nobody@example.com", PASSWORD).await.unwrap_err();
    assert_eq!(wrong_password.kind, ErrorKind::Authentication);
    assert_eq!(unknown_email.kind, ErrorKind::Authentication);

    let user = stored_user(&store).await;
    assert!(user.refresh_token.is_none());
    assert!(user.refresh_token_expires_at.is_none());
}

#[tokio::test]
async fn two_sign_ins_issue_distinct_tokens_and_jtis() {
    let config = token_config();
    let store = seeded_store().await;
    let manager = SessionManager::new(store.clone(), &config);
    let decoder = JwtDecoder::new(&config);

    let first = manager.sign_in(EMAIL, PASSWORD).await.unwrap();
    let second = manager.sign_in(EMAIL, PASSWORD).await.unwrap();

    assert_ne!(first.access_token, second.access_token);
    let a = decoder.decode(&first.access_token).unwrap();
    let b = decoder.decode(&second.access_token).unwrap();
    assert_ne!(a.jti, b.jti);
}

#[tokio::test]
async fn refresh_rejects_a_foreign_signature_as_invalid_token() {
    let config = token_config();
    let store = seeded_store().await;
    let manager = SessionManager::new(store.clone(), &config);
    let coordinator = RefreshCoordinator::new(store.clone(), &config);

    let pair = manager.sign_in(EMAIL, PASSWORD).await.unwrap();

    let mut foreign = config.clone();
    foreign.secret = "somebody-elses-secret".to_string();
    let forged = expired_access_token(&foreign);

    let err = coordinator
        .refresh(&forged, &pair.refresh_token)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidToken);
}

#[tokio::test]
async fn refresh_rejects_a_mismatched_refresh_token_and_keeps_state() {
    let config = token_config();
    let store = seeded_store().await;
    let manager = SessionManager::new(store.clone(), &config);
    let coordinator = RefreshCoordinator::new(store.clone(), &config);

    let pair = manager.sign_in(EMAIL, PASSWORD).await.unwrap();

    let err = coordinator
        .refresh(&pair.access_token, "not-the-stored-token")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::RefreshRejected);

    // Failed refresh leaves existing state untouched.
    let user = stored_user(&store).await;
    assert_eq!(user.refresh_token.as_deref(), Some(pair.refresh_token.as_str()));
}

#[tokio::test]
async fn refresh_rotates_and_the_old_token_becomes_unusable() {
    let config = token_config();
    let store = seeded_store().await;
    let manager = SessionManager::new(store.clone(), &config);
    let coordinator = RefreshCoordinator::new(store.clone(), &config);

    let original = manager.sign_in(EMAIL, PASSWORD).await.unwrap();
    let rotated = coordinator
        .refresh(&original.access_token, &original.refresh_token)
        .await
        .unwrap();
    assert_ne!(rotated.refresh_token, original.refresh_token);

    // Single-use rotation: the old refresh token no longer matches.
    let replay = coordinator
        .refresh(&original.access_token, &original.refresh_token)
        .await
        .unwrap_err();
    assert_eq!(replay.kind, ErrorKind::RefreshRejected);

    // The rotated token works, even presented with the older access token.
    coordinator
        .refresh(&original.access_token, &rotated.refresh_token)
        .await
        .unwrap();
}

#[tokio::test]
async fn refresh_accepts_an_expired_access_token() {
    let config = token_config();
    let store = seeded_store().await;
    let coordinator = RefreshCoordinator::new(store.clone(), &config);
    let decoder = JwtDecoder::new(&config);

    let user = stored_user(&store).await;
    store
        .store_refresh_token(user.id, "stored-refresh", Utc::now() + Duration::days(1))
        .await
        .unwrap();

    let expired = expired_access_token(&config);
    // The bearer path refuses the token; introspection for refresh does not.
    assert_eq!(
        decoder.decode(&expired).unwrap_err().kind,
        ErrorKind::InvalidToken
    );

    let pair = coordinator.refresh(&expired, "stored-refresh").await.unwrap();
    assert!(pair.authenticated);
}

#[tokio::test]
async fn refresh_rejects_an_expired_refresh_token() {
    let config = token_config();
    let store = seeded_store().await;
    let manager = SessionManager::new(store.clone(), &config);
    let coordinator = RefreshCoordinator::new(store.clone(), &config);

    let pair = manager.sign_in(EMAIL, PASSWORD).await.unwrap();
    let user = stored_user(&store).await;
    store
        .store_refresh_token(user.id, &pair.refresh_token, Utc::now() - Duration::seconds(1))
        .await
        .unwrap();

    let err = coordinator
        .refresh(&pair.access_token, &pair.refresh_token)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::RefreshRejected);
}

#[tokio::test]
async fn losing_a_rotation_race_is_a_rejection() {
    let config = token_config();
    let store = seeded_store().await;
    let manager = SessionManager::new(store.clone(), &config);
    let coordinator = RefreshCoordinator::new(store.clone(), &config);

    let pair = manager.sign_in(EMAIL, PASSWORD).await.unwrap();

    // A concurrent refresh rotates the stored token between this request's
    // validation and its own write.
    let user = stored_user(&store).await;
    store
        .rotate_refresh_token(
            user.id,
            &pair.refresh_token,
            "winner-token",
            Utc::now() + Duration::days(7),
        )
        .await
        .unwrap();

    let err = coordinator
        .refresh(&pair.access_token, &pair.refresh_token)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::RefreshRejected);

    let user = stored_user(&store).await;
    assert_eq!(user.refresh_token.as_deref(), Some("winner-token"));
}

#[tokio::test]
async fn revocation_ends_the_ability_to_refresh() {
    let config = token_config();
    let store = seeded_store().await;
    let manager = SessionManager::new(store.clone(), &config);
    let coordinator = RefreshCoordinator::new(store.clone(), &config);
    let revocation = RevocationService::new(store.clone());

    let pair = manager.sign_in(EMAIL, PASSWORD).await.unwrap();
    revocation.revoke(EMAIL).await.unwrap();

    let err = coordinator
        .refresh(&pair.access_token, &pair.refresh_token)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::RefreshRejected);

    // Idempotent for existing users, NotFound for unknown ones.
    revocation.revoke(EMAIL).await.unwrap();
    let missing = revocation.revoke("nobody@example.com").await.unwrap_err();
    assert_eq!(missing.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn extra_claims_survive_a_refresh_with_a_new_jti() {
    let config = token_config();
    let store = seeded_store().await;
    let coordinator = RefreshCoordinator::new(store.clone(), &config);
    let decoder = JwtDecoder::new(&config);

    let user = stored_user(&store).await;
    store
        .store_refresh_token(user.id, "stored-refresh", Utc::now() + Duration::days(1))
        .await
        .unwrap();

    let now = Utc::now().timestamp();
    let mut extra = Map::new();
    extra.insert("role".to_string(), serde_json::Value::String("admin".to_string()));
    let original = Claims {
        sub: EMAIL.to_string(),
        iss: config.issuer.clone(),
        aud: config.audience.clone(),
        iat: now - 3600,
        exp: now - 1800,
        jti: Uuid::new_v4(),
        extra,
    };
    let access = JwtEncoder::new(&config).encode(&original).unwrap();

    let pair = coordinator.refresh(&access, "stored-refresh").await.unwrap();
    let reissued = decoder.decode(&pair.access_token).unwrap();
    assert_eq!(reissued.extra["role"], "admin");
    assert_ne!(reissued.jti, original.jti);
}
