//! The token pair returned on successful sign-in or refresh.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Wire format for the creation and expiration timestamps.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A freshly issued access/refresh token pair.
///
/// Constructed once per successful issuance and never mutated afterwards;
/// the core keeps no copy once the pair has been handed to the caller.
/// Timestamps are serialized as local-time strings in [`DATE_FORMAT`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    /// Always `true` for an issued pair; rejections are errors, not pairs.
    pub authenticated: bool,
    /// When the access token was created.
    pub created_date: String,
    /// When the access token expires.
    pub expiration_date: String,
    /// Signed access token (compact JWT).
    pub access_token: String,
    /// Opaque refresh token.
    pub refresh_token: String,
}

impl TokenPair {
    /// Assemble a pair from issuance timestamps and token strings.
    pub fn new(
        created_at: DateTime<Local>,
        expires_at: DateTime<Local>,
        access_token: String,
        refresh_token: String,
    ) -> Self {
        Self {
            authenticated: true,
            created_date: created_at.format(DATE_FORMAT).to_string(),
            expiration_date: expires_at.format(DATE_FORMAT).to_string(),
            access_token,
            refresh_token,
        }
    }
}
