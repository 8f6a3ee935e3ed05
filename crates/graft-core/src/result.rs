//! Result type alias for graft operations

use crate::error::GraftError;

/// Standard Result type for graft operations
pub type Result<T> = std::result::Result<T, GraftError>;
