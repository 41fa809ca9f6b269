//! # Status Derivation
//!
//! The two classification rules of the store. Stored `status` and
//! `payment_status` fields are caches of these functions; nothing else in
//! the workspace computes either label.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Stock status (first match wins)                                       │
//! │    stock <= 0   ──► OutOfStock                                          │
//! │    stock <= 15  ──► LowStock                                            │
//! │    otherwise    ──► InStock                                             │
//! │                                                                         │
//! │  Payment status (first match wins)                                     │
//! │    paid >= total ──► Paid                                               │
//! │    paid > 0      ──► PartiallyPaid                                      │
//! │    otherwise     ──► Unpaid                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::money::Money;
use crate::types::{PaymentStatus, StockStatus};
use crate::{LOW_STOCK_THRESHOLD, OUT_OF_STOCK_THRESHOLD};

/// Classifies a stock count.
#[inline]
pub fn stock_status(stock: i64) -> StockStatus {
    if stock <= OUT_OF_STOCK_THRESHOLD {
        StockStatus::OutOfStock
    } else if stock <= LOW_STOCK_THRESHOLD {
        StockStatus::LowStock
    } else {
        StockStatus::InStock
    }
}

/// Classifies a receipt's settlement from the amount paid against its total.
#[inline]
pub fn payment_status(amount_paid: Money, total: Money) -> PaymentStatus {
    if amount_paid >= total {
        PaymentStatus::Paid
    } else if amount_paid.is_positive() {
        PaymentStatus::PartiallyPaid
    } else {
        PaymentStatus::Unpaid
    }
}
