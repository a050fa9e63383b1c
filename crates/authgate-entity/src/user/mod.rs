//! User entity model and persistence port.

pub mod model;
pub mod store;

pub use model::{CreateUser, User};
pub use store::UserStore;
