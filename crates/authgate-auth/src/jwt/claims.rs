//! JWT claims structure embedded in every access token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Registered claim names owned by the issuer.
///
/// Carried-through extra claims may never shadow these; the issuer strips
/// them before signing.
pub const REGISTERED_CLAIMS: [&str; 6] = ["sub", "iss", "aud", "iat", "exp", "jti"];

/// JWT claims payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — the user's email.
    pub sub: String,
    /// Issuer.
    pub iss: String,
    /// Audience.
    pub aud: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Unique per-issuance token identifier.
    pub jti: Uuid,
    /// Additional claims (roles etc.) carried through reissuance unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Claims {
    /// Return the subject — the user's email.
    pub fn subject(&self) -> &str {
        &self.sub
    }

    /// Return the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }

    /// Check whether this token has expired.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extra_claims_flatten_into_the_payload() {
        let mut extra = Map::new();
        extra.insert("role".to_string(), Value::String("admin".to_string()));
        let claims = Claims {
            sub: "user@example.com".to_string(),
            iss: "authgate".to_string(),
            aud: "authgate-clients".to_string(),
            iat: 0,
            exp: 60,
            jti: Uuid::new_v4(),
            extra,
        };

        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["role"], "admin");
        assert_eq!(json["sub"], "user@example.com");

        let back: Claims = serde_json::from_value(json).unwrap();
        assert_eq!(back, claims);
    }
}
