//! Opaque refresh token generation and token pair issuance.

pub mod issuer;
pub mod refresh;

pub use issuer::TokenIssuer;
pub use refresh::RefreshTokenGenerator;
