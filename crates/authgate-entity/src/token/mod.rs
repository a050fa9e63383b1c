//! Token value objects.

pub mod pair;

pub use pair::TokenPair;
