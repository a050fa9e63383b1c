//! The three lifecycle entry points: sign-in, refresh, and revocation.

pub mod manager;
pub mod refresh;
pub mod revoke;

pub use manager::SessionManager;
pub use refresh::RefreshCoordinator;
pub use revoke::RevocationService;
