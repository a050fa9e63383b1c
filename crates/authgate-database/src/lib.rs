//! # authgate-database
//!
//! PostgreSQL connection management and concrete [`UserStore`]
//! implementations for Authgate. The [`MemoryUserStore`] backs tests and
//! embedded scenarios with the same rotation semantics as the SQL store.
//!
//! [`UserStore`]: authgate_entity::user::UserStore

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use memory::MemoryUserStore;
pub use repositories::UserRepository;
