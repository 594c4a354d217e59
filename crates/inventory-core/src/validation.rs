//! # Validation Module
//!
//! Input validation utilities for InventoryPro.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Browser form                                                 │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: HTTP handler (Rust)                                          │
//! │  ├── Type validation (deserialization, numeric coercion)               │
//! │  └── THIS MODULE: Business rule validation                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK (quantity >= 0) constraints                      │
//! │  ├── UNIQUE (patrimony_number, email)                                  │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything here runs before any storage call is issued.

use crate::error::ValidationError;
use crate::types::ItemStatus;
use crate::MIN_PASSWORD_LENGTH;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_PATRIMONY_LEN: usize = 50;
const MAX_NAME_LEN: usize = 200;
const MAX_QUERY_LEN: usize = 100;

// =============================================================================
// String Validators
// =============================================================================

/// Rejects empty or whitespace-only values, returning the trimmed value.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(value.to_string())
}

/// Validates a patrimony number (asset tag).
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
///
/// ## Example
/// ```rust
/// use inventory_core::validation::validate_patrimony_number;
///
/// assert!(validate_patrimony_number("PAT-0001").is_ok());
/// assert!(validate_patrimony_number("  ").is_err());
/// ```
pub fn validate_patrimony_number(value: &str) -> ValidationResult<String> {
    let value = validate_required("patrimony_number", value)?;
    if value.chars().count() > MAX_PATRIMONY_LEN {
        return Err(ValidationError::TooLong {
            field: "patrimony_number".to_string(),
            max: MAX_PATRIMONY_LEN,
        });
    }
    Ok(value)
}

/// Validates a display name (item, collaborator, or person).
pub fn validate_name(field: &str, value: &str) -> ValidationResult<String> {
    let value = validate_required(field, value)?;
    if value.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }
    Ok(value)
}

/// Minimal email shape check: something before and after a single `@`.
pub fn validate_email(value: &str) -> ValidationResult<String> {
    let value = validate_required("email", value)?;
    let valid = match value.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    };
    if !valid {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must look like name@domain".to_string(),
        });
    }
    Ok(value)
}

/// Validates a password against the minimum length.
///
/// ```rust
/// use inventory_core::validation::validate_password;
///
/// assert!(validate_password("admin1").is_ok());
/// assert!(validate_password("12345").is_err());
/// ```
pub fn validate_password(value: &str) -> ValidationResult<()> {
    if value.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: MIN_PASSWORD_LENGTH,
        });
    }
    Ok(())
}

/// Validates a search query, returning it trimmed.
///
/// ## Rules
/// - Can be empty (returns all rows)
/// - Maximum 100 characters
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_QUERY_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_QUERY_LEN,
        });
    }

    Ok(query.to_string())
}

/// Parses a status for writing. Only the four known statuses are accepted.
pub fn validate_status(value: &str) -> ValidationResult<ItemStatus> {
    let status = ItemStatus::from(value.trim());
    if !status.is_known() {
        return Err(ValidationError::NotAllowed {
            field: "status".to_string(),
            allowed: ItemStatus::KNOWN
                .iter()
                .map(|s| s.as_str().to_string())
                .collect(),
        });
    }
    Ok(status)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a stock count (quantity or minimum stock).
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (out of stock)
pub fn validate_stock_count(field: &str, value: i64) -> ValidationResult<i64> {
    if value < 0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }
    Ok(value)
}

/// Validates a movement quantity.
///
/// In/out movements carry a positive amount; adjustments only need to be
/// non-zero.
pub fn validate_movement_quantity(value: i64, signed: bool) -> ValidationResult<()> {
    if signed {
        if value == 0 {
            return Err(ValidationError::InvalidFormat {
                field: "quantity".to_string(),
                reason: "adjustment must not be zero".to_string(),
            });
        }
    } else if value <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_patrimony_number() {
        assert_eq!(validate_patrimony_number(" PAT-0001 ").unwrap(), "PAT-0001");
        assert!(validate_patrimony_number("").is_err());
        assert!(validate_patrimony_number(&"A".repeat(51)).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("admin@admin.com").is_ok());
        assert!(validate_email("admin").is_err());
        assert!(validate_email("@admin.com").is_err());
        assert!(validate_email("a@b@c").is_err());
    }

    #[test]
    fn test_validate_status_rejects_unknown() {
        assert_eq!(validate_status("in_use").unwrap(), ItemStatus::InUse);
        let err = validate_status("lost").unwrap_err();
        assert!(matches!(err, ValidationError::NotAllowed { .. }));
    }

    #[test]
    fn test_validate_stock_count() {
        assert_eq!(validate_stock_count("quantity", 0).unwrap(), 0);
        assert!(validate_stock_count("quantity", -1).is_err());
    }

    #[test]
    fn test_validate_movement_quantity() {
        assert!(validate_movement_quantity(3, false).is_ok());
        assert!(validate_movement_quantity(-3, false).is_err());
        assert!(validate_movement_quantity(-3, true).is_ok());
        assert!(validate_movement_quantity(0, true).is_err());
    }

    #[test]
    fn test_validate_search_query_trims() {
        assert_eq!(validate_search_query("  lap ").unwrap(), "lap");
        assert!(validate_search_query(&"x".repeat(101)).is_err());
    }
}
