//! # Domain Errors
//!
//! ```text
//!   form / validator ──► ValidationError ─┐
//!                                          ├──► CoreError ──► DbError::Domain ──► ApiError
//!   stock movement   ──► InsufficientStock ┘
//! ```
//!
//! Messages are what the dashboard shows in its error toast, so they name
//! the field (or patrimony number) involved.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// A movement would take an item's quantity below zero. Nothing is
    /// written when this is returned.
    #[error("Insufficient stock for {patrimony_number}: available {available}, requested {requested}")]
    InsufficientStock {
        patrimony_number: String,
        available: i64,
        requested: i64,
    },

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Rejected input. Always raised before any storage call.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: String },

    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Quantity or minimum stock below zero.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// In/out movement amounts.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Non-numeric or fractional count, malformed email, zero adjustment.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Password and its confirmation differ.
    #[error("{field} confirmation does not match")]
    Mismatch { field: String },
}
