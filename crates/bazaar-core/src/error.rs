//! # Error Types
//!
//! Domain-specific error types for bazaar-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bazaar-core errors (this file)                                        │
//! │  ├── CoreError        - Caller bugs (negative totals, zero quantity)   │
//! │  └── ValidationError  - Advisory field problems shown in the form     │
//! │                                                                         │
//! │  bazaar-cli errors (binary)                                            │
//! │  └── ConfigError      - Bad environment configuration                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Never Block Typing
//! Raw form input is normalized, never rejected. Only two conditions are
//! hard errors, and both indicate a programming mistake in the caller:
//! decomposing a negative total and deriving prices for a non-positive
//! quantity. Everything else surfaces as a [`ValidationError`] that the
//! form highlights while the user keeps typing.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core logic errors.
///
/// These are raised to the immediate caller and are expected to be rare:
/// user input is sanitized before it ever reaches the functions that
/// return them.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A negative copper total was passed to decomposition.
    ///
    /// ## When This Occurs
    /// - A stored listing price was corrupted or computed with a bad subtraction
    /// - A caller skipped sanitation and passed a signed value straight through
    #[error("Invalid amount: {amount} copper (amounts cannot be negative)")]
    InvalidAmount { amount: i64 },

    /// A non-positive quantity was passed to price derivation.
    ///
    /// ## When This Occurs
    /// - The caller forgot to normalize an empty quantity field to 1
    #[error("Invalid quantity: {quantity} (quantity must be at least 1)")]
    InvalidQuantity { quantity: i64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Advisory input validation errors.
///
/// The listing form computes these on every keystroke and highlights the
/// offending field; they never interrupt data entry.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Damage percent outside the allowed bands.
    #[error("Damage % {value} must be 0, 30-49 or 70-89")]
    InvalidDamagePercent { value: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InvalidAmount { amount: -1 };
        assert_eq!(
            err.to_string(),
            "Invalid amount: -1 copper (amounts cannot be negative)"
        );

        let err = CoreError::InvalidQuantity { quantity: 0 };
        assert_eq!(
            err.to_string(),
            "Invalid quantity: 0 (quantity must be at least 1)"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "item".to_string(),
        };
        assert_eq!(err.to_string(), "item is required");

        let err = ValidationError::InvalidDamagePercent {
            value: "50".to_string(),
        };
        assert_eq!(err.to_string(), "Damage % 50 must be 0, 30-49 or 70-89");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "offer".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
