//! Convenience result type alias for LeaveDesk.

use crate::error::AppError;

/// A specialized `Result` type for LeaveDesk operations.
pub type AppResult<T> = Result<T, AppError>;
