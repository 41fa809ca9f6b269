//! # Error Types
//!
//! Domain-specific error types for tindahan-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tindahan-core errors (this file)                                      │
//! │  ├── CoreError        - Unknown ids, wraps validation failures         │
//! │  └── ValidationError  - Bad input, rejected before any mutation        │
//! │                                                                         │
//! │  tindahan-engine errors (separate crate)                               │
//! │  ├── ConfigError      - store.toml / environment problems              │
//! │  └── ApiError         - What the mobile shell sees (serialized)        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Mobile shell           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, id, amounts)
//! 3. Errors are enum variants, never String

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Errors returned by catalog and ledger operations.
///
/// Every operation either fully succeeds or returns one of these with the
/// collection untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// No product with this id exists in the catalog.
    ///
    /// ## When This Occurs
    /// - Editing or deleting a product that was already deleted
    /// - A stale id held by the shell after another client removed it
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// No transaction with this id exists in the ledger.
    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// True for the "unknown id" family of errors.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CoreError::ProductNotFound(_) | CoreError::TransactionNotFound(_)
        )
    }

    /// True when the caller's input was rejected.
    pub fn is_validation(&self) -> bool {
        matches!(self, CoreError::Validation(_))
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank after trimming.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be strictly greater than zero.
    #[error("{field} must be greater than 0")]
    MustBePositive { field: String },

    /// Value must not be below zero.
    #[error("{field} cannot be negative")]
    Negative { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Text could not be read as the expected kind of value.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// A payment larger than the receipt total.
    ///
    /// ## User Workflow
    /// ```text
    /// Receipt total: ₱100.00
    ///      │
    ///      ▼
    /// Cashier types 150 in the payment modal
    ///      │
    ///      ▼
    /// ExceedsTotal { amount: ₱150.00, total: ₱100.00 }
    ///      │
    ///      ▼
    /// UI shows: "Amount cannot exceed total"
    /// ```
    #[error("amount {amount} exceeds total {total}")]
    ExceedsTotal { amount: Money, total: Money },

    /// Duplicate value (e.g., a receipt number already in the ledger).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// A collection that must contain at least one element is empty.
    #[error("{field} must not be empty")]
    Empty { field: String },
}

impl ValidationError {
    pub(crate) fn required(field: &str) -> Self {
        ValidationError::Required {
            field: field.to_string(),
        }
    }

    pub(crate) fn must_be_positive(field: &str) -> Self {
        ValidationError::MustBePositive {
            field: field.to_string(),
        }
    }

    pub(crate) fn negative(field: &str) -> Self {
        ValidationError::Negative {
            field: field.to_string(),
        }
    }
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
        let err = CoreError::ProductNotFound("abc".to_string());
        assert_eq!(err.to_string(), "Product not found: abc");

        let err = ValidationError::ExceedsTotal {
            amount: Money::from_cents(15000),
            total: Money::from_cents(10000),
        };
        assert_eq!(err.to_string(), "amount ₱150.00 exceeds total ₱100.00");
    }

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(ValidationError::required("name").to_string(), "name is required");
        assert_eq!(
            ValidationError::must_be_positive("price").to_string(),
            "price must be greater than 0"
        );
        assert_eq!(
            ValidationError::negative("stock").to_string(),
            "stock cannot be negative"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::required("name").into();
        assert!(core_err.is_validation());
        assert!(!core_err.is_not_found());
    }

    #[test]
    fn test_not_found_classification() {
        assert!(CoreError::ProductNotFound("1".into()).is_not_found());
        assert!(CoreError::TransactionNotFound("1".into()).is_not_found());
    }
}
