//! JWT verification: the full bearer path and the refresh-introspection path.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, decode_header};

use authgate_core::config::TokenConfig;
use authgate_core::error::AppError;
use authgate_core::result::AppResult;

use super::claims::Claims;

/// Validates signed tokens against the configured symmetric key.
///
/// Two verification paths exist. `decode` is the normal bearer path:
/// signature, expiry, issuer, and audience are all enforced.
/// `decode_expired` is the refresh-introspection path: it verifies the
/// signature but deliberately ignores expiry, issuer, and audience, since
/// refresh must work on an access token that has already expired. Both
/// paths accept HS256 only; any other header algorithm is rejected before
/// signature verification.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Full validation for the bearer path.
    bearer: Validation,
    /// Signature-only validation for refresh introspection.
    introspection: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("bearer", &self.bearer)
            .field("introspection", &self.introspection)
            .finish()
    }
}

impl JwtDecoder {
    /// Create a new decoder from token configuration.
    pub fn new(config: &TokenConfig) -> Self {
        let mut bearer = Validation::new(Algorithm::HS256);
        bearer.set_issuer(&[&config.issuer]);
        bearer.set_audience(&[&config.audience]);
        bearer.leeway = config.leeway_seconds;

        let mut introspection = Validation::new(Algorithm::HS256);
        introspection.validate_exp = false;
        introspection.validate_aud = false;
        introspection.required_spec_claims.clear();

        Self {
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            bearer,
            introspection,
        }
    }

    /// Fully validate a bearer token: signature, algorithm, expiry (with
    /// leeway), issuer, and audience.
    pub fn decode(&self, token: &str) -> AppResult<Claims> {
        self.decode_with(token, &self.bearer)
    }

    /// Verify the signature and recover the claims while ignoring expiry,
    /// issuer, and audience. Used only for refresh introspection.
    pub fn decode_expired(&self, token: &str) -> AppResult<Claims> {
        self.decode_with(token, &self.introspection)
    }

    fn decode_with(&self, token: &str, validation: &Validation) -> AppResult<Claims> {
        let header = decode_header(token)
            .map_err(|e| AppError::invalid_token(format!("Malformed token header: {e}")))?;

        // Guard against algorithm substitution before touching the signature.
        if header.alg != Algorithm::HS256 {
            return Err(AppError::invalid_token(format!(
                "Unexpected signing algorithm: {:?}",
                header.alg
            )));
        }

        let data = decode::<Claims>(token, &self.decoding_key, validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::invalid_token("Token has expired")
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::invalid_token("Invalid token signature")
                }
                jsonwebtoken::errors::ErrorKind::InvalidToken => {
                    AppError::invalid_token("Invalid token format")
                }
                _ => AppError::invalid_token(format!("Token validation failed: {e}")),
            }
        })?;

        Ok(data.claims)
    }
}
