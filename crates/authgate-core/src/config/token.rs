//! Token signing and lifetime configuration.

use serde::{Deserialize, Serialize};

/// Symmetric signing key and token lifetime configuration.
///
/// The secret is shared between signing and verification (HMAC-SHA256).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_secret")]
    pub secret: String,
    /// Issuer claim stamped into every access token.
    #[serde(default = "default_issuer")]
    pub issuer: String,
    /// Audience claim stamped into every access token.
    #[serde(default = "default_audience")]
    pub audience: String,
    /// Access token lifetime in minutes.
    #[serde(default = "default_access_ttl")]
    pub access_ttl_minutes: u64,
    /// Refresh token lifetime in days.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_ttl_days: u64,
    /// Clock-skew leeway in seconds applied when validating expiry.
    #[serde(default = "default_leeway")]
    pub leeway_seconds: u64,
}

fn default_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_issuer() -> String {
    "authgate".to_string()
}

fn default_audience() -> String {
    "authgate-clients".to_string()
}

fn default_access_ttl() -> u64 {
    60
}

fn default_refresh_ttl() -> u64 {
    7
}

fn default_leeway() -> u64 {
    5
}
