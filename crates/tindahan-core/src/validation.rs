//! # Validation Module
//!
//! Input validation for catalog and ledger operations.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Mobile shell (TypeScript)                                    │
//! │  ├── Form-level checks (empty fields)                                  │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Money::parse                                                 │
//! │  └── Free text → centavos, non-numbers rejected                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: THIS MODULE                                                  │
//! │  └── Business rules, run before any collection is touched              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Validators that normalize input (trimming, blank → `None`) return the
//! normalized value so callers store exactly what was checked.

use crate::error::ValidationError;
use crate::money::Money;
use crate::{MAX_ITEM_QUANTITY, MAX_RECEIPT_ITEMS, MAX_RECEIPT_TOTAL_CENTS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_NAME_LEN: usize = 200;
const MAX_LABEL_LEN: usize = 100;
const MAX_NOTES_LEN: usize = 500;
const MAX_RECEIPT_NUMBER_LEN: usize = 50;

// =============================================================================
// String Validators
// =============================================================================

fn required_text(field: &str, value: &str, max: usize) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::required(field));
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(value.to_string())
}

fn optional_text(field: &str, value: Option<&str>, max: usize) -> ValidationResult<Option<String>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) if text.chars().count() > max => Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        }),
        Some(text) => Ok(Some(text.to_string())),
    }
}

/// Validates a product name and returns it trimmed.
///
/// ## Example
/// ```rust
/// use tindahan_core::validation::validate_product_name;
///
/// assert_eq!(validate_product_name("  Sugar ").unwrap(), "Sugar");
/// assert!(validate_product_name("   ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<String> {
    required_text("name", name, MAX_NAME_LEN)
}

/// Validates an optional category label; blank labels become `None`.
pub fn validate_category(category: Option<&str>) -> ValidationResult<Option<String>> {
    optional_text("category", category, MAX_LABEL_LEN)
}

/// Validates an optional customer name; blank names become `None`.
pub fn validate_customer_name(name: Option<&str>) -> ValidationResult<Option<String>> {
    optional_text("customer name", name, MAX_NAME_LEN)
}

/// Validates optional receipt notes; blank notes become `None`.
pub fn validate_notes(notes: Option<&str>) -> ValidationResult<Option<String>> {
    optional_text("notes", notes, MAX_NOTES_LEN)
}

/// Validates a receipt number and returns it trimmed.
pub fn validate_receipt_number(receipt_number: &str) -> ValidationResult<String> {
    required_text("receipt number", receipt_number, MAX_RECEIPT_NUMBER_LEN)
}

/// Validates a line item name and returns it trimmed.
pub fn validate_item_name(name: &str) -> ValidationResult<String> {
    required_text("item name", name, MAX_NAME_LEN)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a product price. Free items are not sold through the catalog.
///
/// ## Example
/// ```rust
/// use tindahan_core::money::Money;
/// use tindahan_core::validation::validate_price;
///
/// assert!(validate_price(Money::from_cents(250)).is_ok());
/// assert!(validate_price(Money::zero()).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::must_be_positive("price"));
    }

    Ok(())
}

/// Validates a stock count. Zero is allowed (out of stock).
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::negative("stock"));
    }

    Ok(())
}

/// Validates a line item quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::must_be_positive("quantity"));
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a line item's unit price.
pub fn validate_unit_price(price: Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::must_be_positive("unit price"));
    }

    Ok(())
}

/// Checks a computed receipt amount.
///
/// `None` means the arithmetic overflowed; both that and anything above
/// [`MAX_RECEIPT_TOTAL_CENTS`] are reported as out of range.
pub fn validate_receipt_amount(field: &str, amount: Option<Money>) -> ValidationResult<Money> {
    match amount {
        Some(amount) if amount.cents() <= MAX_RECEIPT_TOTAL_CENTS => Ok(amount),
        _ => Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: MAX_RECEIPT_TOTAL_CENTS,
        }),
    }
}

/// Validates an amount paid against a receipt total.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Payment Modal                                                          │
/// │                                                                         │
/// │  Total: ₱22.68   Paid: ₱15.00   Remaining: ₱7.68                        │
/// │  Amount: [ 22.68 ]                                                      │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_payment_amount(2268, 2268) ← THIS FUNCTION                   │
/// │       │                                                                 │
/// │       ├── amount < 0?     → "amount paid cannot be negative"           │
/// │       ├── amount > total? → "amount exceeds total"                     │
/// │       └── OK → record_payment                                          │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_payment_amount(amount: Money, total: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::negative("amount paid"));
    }

    if amount > total {
        return Err(ValidationError::ExceedsTotal { amount, total });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates the number of line items on a receipt.
pub fn validate_receipt_size(items: usize) -> ValidationResult<()> {
    if items == 0 {
        return Err(ValidationError::Empty {
            field: "items".to_string(),
        });
    }

    if items > MAX_RECEIPT_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "items".to_string(),
            min: 1,
            max: MAX_RECEIPT_ITEMS as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
