//! # tindahan-core: Pure Domain Logic for Tindahan POS
//!
//! The rules that turn raw quantities into labels: how many units make a
//! product "low stock", when a receipt counts as "paid", what a receipt's
//! tax and total are. Everything here is a pure function or a plain type.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Tindahan POS Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Mobile Shell (external)                        │   │
//! │  │   Inventory ──► Transactions ──► Payment Modal ──► Reports      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ in-process calls                       │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              tindahan-engine (Catalog, Ledger, StoreState)      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ tindahan-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐  ┌─────────┐  ┌──────────┐  ┌────────────┐       │   │
//! │  │   │  types  │  │  money  │  │  status  │  │ validation │       │   │
//! │  │   │ Product │  │  Money  │  │  stock   │  │   rules    │       │   │
//! │  │   │  Txn    │  │ TaxRate │  │ payment  │  │            │       │   │
//! │  │   └─────────┘  └─────────┘  └──────────┘  └────────────┘       │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOCKS • NO LOGGING • PURE FUNCTIONS               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Transaction, line items, stats)
//! - [`money`] - Money type with integer arithmetic and the tax rate
//! - [`status`] - The two classification rules (stock, payment)
//! - [`search`] - Case-insensitive matching shared by both engines
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use tindahan_core::money::{Money, TaxRate};
//! use tindahan_core::status::{payment_status, stock_status};
//! use tindahan_core::{PaymentStatus, StockStatus};
//!
//! assert_eq!(stock_status(15), StockStatus::LowStock);
//! assert_eq!(stock_status(16), StockStatus::InStock);
//!
//! let subtotal = Money::from_cents(3448); // ₱34.48
//! let tax = subtotal.calculate_tax(TaxRate::from_bps(1200));
//! assert_eq!(tax.cents(), 414);
//!
//! let total = subtotal + tax;
//! assert_eq!(payment_status(Money::from_cents(1500), total), PaymentStatus::PartiallyPaid);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod search;
pub mod status;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{Money, TaxRate};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Highest stock count still classified as "low stock".
///
/// A product with `1..=15` units is low, `16` and above is in stock.
pub const LOW_STOCK_THRESHOLD: i64 = 15;

/// Stock at or below this count is "out of stock".
pub const OUT_OF_STOCK_THRESHOLD: i64 = 0;

/// Default sales tax applied to receipts: 12% (Philippine VAT).
pub const DEFAULT_TAX_RATE_BPS: u32 = 1200;

/// Maximum quantity of a single line item on a receipt.
///
/// ## Business Reason
/// Catches typos at the counter (1000 instead of 10).
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Maximum number of line items on a single receipt.
pub const MAX_RECEIPT_ITEMS: usize = 100;

/// Largest receipt total accepted, in centavos (₱1,000,000,000.00).
///
/// ## Business Reason
/// Keeps every line total, receipt total and ledger-wide sum well inside
/// `i64`, so stats and reports never overflow.
pub const MAX_RECEIPT_TOTAL_CENTS: i64 = 100_000_000_000;
