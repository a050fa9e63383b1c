//! # authgate-entity
//!
//! Domain entity models for Authgate. Every struct in this crate represents
//! a database table row or a domain value object. All entities derive
//! `Debug`, `Clone`, `Serialize`, `Deserialize`, and database entities
//! additionally derive `sqlx::FromRow`.
//!
//! The [`user::UserStore`] port trait lives next to the model it serves so
//! that both the lifecycle core and the database crate can depend on it
//! without depending on each other.

pub mod token;
pub mod user;
