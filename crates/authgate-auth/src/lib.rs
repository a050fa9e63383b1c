//! # authgate-auth
//!
//! The token lifecycle core of Authgate: credential verification, signed
//! token issuance, expired-token introspection, refresh rotation, and
//! revocation.
//!
//! ## Modules
//!
//! - `password` — Argon2id credential hashing and verification
//! - `jwt` — JWT claims, HS256 signing, and the two verification paths
//! - `credentials` — login-attempt validation against stored state
//! - `token` — opaque refresh token generation and token pair issuance
//! - `session` — the sign-in, refresh, and revocation flows
//!
//! Persistence is reached only through the
//! [`UserStore`](authgate_entity::user::UserStore) port; the HTTP layer and
//! store wiring live outside this crate.

pub mod credentials;
pub mod jwt;
pub mod password;
pub mod session;
pub mod token;

pub use credentials::CredentialValidator;
pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::PasswordHasher;
pub use session::{RefreshCoordinator, RevocationService, SessionManager};
pub use token::{RefreshTokenGenerator, TokenIssuer};
