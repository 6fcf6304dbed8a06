//! Errors for caller-side contract violations.
//!
//! Data-quality problems in records never surface here; they are normalised
//! by the record types. These variants mean the caller passed a parameter
//! that can never be valid.

use thiserror::Error;

/// Parameter errors raised synchronously by the core computations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Page size must be at least one row.
    #[error("page size must be positive, got {0}")]
    InvalidPageSize(usize),

    /// Uptime windows cannot extend into the future.
    #[error("uptime window length must not be negative, got {0}h")]
    NegativeWindow(i64),
}
