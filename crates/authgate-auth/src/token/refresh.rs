//! Opaque refresh token generation.

use argon2::password_hash::rand_core::{OsRng, RngCore};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

/// Entropy of every refresh token, in bytes.
pub const REFRESH_TOKEN_BYTES: usize = 32;

/// Produces high-entropy opaque rotation tokens.
///
/// Refresh tokens carry no structure and no claims; they are pure
/// capability strings compared by equality against stored state.
#[derive(Debug, Clone)]
pub struct RefreshTokenGenerator;

impl RefreshTokenGenerator {
    /// Create a new generator.
    pub fn new() -> Self {
        Self
    }

    /// Generate 256 bits from the OS CSPRNG, base64-encoded for transport.
    pub fn generate(&self) -> String {
        let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        BASE64.encode(bytes)
    }
}

impl Default for RefreshTokenGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_decode_to_the_full_entropy() {
        let token = RefreshTokenGenerator::new().generate();
        let bytes = BASE64.decode(&token).unwrap();
        assert_eq!(bytes.len(), REFRESH_TOKEN_BYTES);
    }

    #[test]
    fn consecutive_tokens_differ() {
        let generator = RefreshTokenGenerator::new();
        assert_ne!(generator.generate(), generator.generate());
    }
}
