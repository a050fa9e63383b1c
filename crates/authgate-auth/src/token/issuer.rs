//! Token pair issuance.

use chrono::{Duration, Local};
use serde_json::{Map, Value};
use uuid::Uuid;

use authgate_core::config::TokenConfig;
use authgate_core::result::AppResult;
use authgate_entity::token::TokenPair;

use crate::jwt::claims::{Claims, REGISTERED_CLAIMS};
use crate::jwt::encoder::JwtEncoder;
use crate::token::refresh::RefreshTokenGenerator;

/// Builds complete token pairs: a signed access token plus an opaque
/// refresh token, stamped with creation and expiry timestamps.
///
/// The jti is minted here on every issuance — never supplied by the caller
/// — so reissuing through refresh can never reuse a token identifier.
/// The issuer persists nothing; storing the refresh token against the user
/// record is the calling flow's responsibility.
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    encoder: JwtEncoder,
    generator: RefreshTokenGenerator,
    issuer: String,
    audience: String,
    access_ttl_minutes: i64,
}

impl TokenIssuer {
    /// Create a new token issuer from configuration.
    pub fn new(config: &TokenConfig) -> Self {
        Self {
            encoder: JwtEncoder::new(config),
            generator: RefreshTokenGenerator::new(),
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            access_ttl_minutes: config.access_ttl_minutes as i64,
        }
    }

    /// Issue a fresh token pair for the given subject.
    ///
    /// `extra` carries non-identity claims through reissuance; any entry
    /// shadowing a registered claim name is dropped.
    pub fn issue(&self, subject: &str, extra: &Map<String, Value>) -> AppResult<TokenPair> {
        let created_at = Local::now();
        let expires_at = created_at + Duration::minutes(self.access_ttl_minutes);

        let extra: Map<String, Value> = extra
            .iter()
            .filter(|(name, _)| !REGISTERED_CLAIMS.contains(&name.as_str()))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();

        let claims = Claims {
            sub: subject.to_string(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            iat: created_at.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4(),
            extra,
        };

        let access_token = self.encoder.encode(&claims)?;
        let refresh_token = self.generator.generate();

        Ok(TokenPair::new(
            created_at,
            expires_at,
            access_token,
            refresh_token,
        ))
    }
}
