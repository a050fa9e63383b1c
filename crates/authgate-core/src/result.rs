//! Convenience result type alias for Authgate.

use crate::error::AppError;

/// A specialized `Result` type for Authgate operations.
///
/// Defined as a convenience so that every crate does not need to spell out
/// `Result<T, AppError>` explicitly.
pub type AppResult<T> = Result<T, AppError>;
