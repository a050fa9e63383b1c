//! JWT signing with the configured symmetric key.

use jsonwebtoken::{EncodingKey, Header, encode};

use authgate_core::config::TokenConfig;
use authgate_core::error::AppError;
use authgate_core::result::AppResult;

use super::claims::Claims;

/// Creates HS256-signed compact JWTs from assembled claim sets.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder").finish_non_exhaustive()
    }
}

impl JwtEncoder {
    /// Create a new encoder from token configuration.
    pub fn new(config: &TokenConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
        }
    }

    /// Sign the claim set into a compact token string.
    ///
    /// The default header is HS256; claim assembly (jti minting, expiry
    /// stamping) is the issuer's responsibility.
    pub fn encode(&self, claims: &Claims) -> AppResult<String> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode access token: {e}")))
    }
}
