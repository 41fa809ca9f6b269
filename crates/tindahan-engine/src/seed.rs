//! # Demo Store
//!
//! The sample shop used in development and screenshots: four products and
//! four receipts covering every stock and payment status.
//!
//! ```text
//! Product                Price   Stock  Status
//! ─────────────────────  ──────  ─────  ────────────
//! Premium Coffee Beans   12.99      50  In Stock
//! Organic Green Tea       8.50       8  Low Stock
//! Artisan Pastries        4.25       0  Out of Stock
//! Specialty Milk          3.75      25  In Stock
//!
//! Receipt  Customer         Total   Status
//! ───────  ───────────────  ──────  ──────────────
//! RCP-001  Juan Dela Cruz    38.62  Paid (card)
//! RCP-002  Maria Santos      22.68  Partially Paid
//! RCP-003  Pedro Garcia      14.55  Unpaid
//! RCP-004  (walk-in)         42.28  Paid (wallet)
//! ```
//!
//! Totals assume the default 12% tax.

use chrono::{DateTime, TimeZone, Utc};
use tracing::info;

use tindahan_core::{
    CoreResult, LineItemInput, Money, PaymentMethod, PaymentUpdate, ProductInput, QuickAmount,
    TaxRate, TransactionInput, ValidationError,
};

use crate::catalog::Catalog;
use crate::config::StoreConfig;
use crate::ledger::Ledger;
use crate::state::StoreState;

/// (name, price in centavos, stock, category)
const DEMO_PRODUCTS: &[(&str, i64, i64, &str)] = &[
    ("Premium Coffee Beans", 1299, 50, "Beverages"),
    ("Organic Green Tea", 850, 8, "Beverages"),
    ("Artisan Pastries", 425, 0, "Food"),
    ("Specialty Milk", 375, 25, "Dairy"),
];

/// The demo products.
pub fn demo_catalog() -> CoreResult<Catalog> {
    let mut catalog = Catalog::new();
    for &(name, cents, stock, category) in DEMO_PRODUCTS {
        let input = ProductInput::new(name, Money::from_cents(cents), stock).with_category(category);
        catalog.add_product(&input)?;
    }
    Ok(catalog)
}

/// The demo receipts, numbered from `receipt_prefix`.
pub fn demo_ledger(tax_rate: TaxRate, receipt_prefix: &str) -> CoreResult<Ledger> {
    let mut ledger = Ledger::new(tax_rate, receipt_prefix);

    let coffee = |qty| LineItemInput::new("Premium Coffee Beans", qty, Money::from_cents(1299));
    let tea = |qty| LineItemInput::new("Organic Green Tea", qty, Money::from_cents(850));
    let pastries = |qty| LineItemInput::new("Artisan Pastries", qty, Money::from_cents(425));
    let milk = |qty| LineItemInput::new("Specialty Milk", qty, Money::from_cents(375));

    // Paid in full by card
    let first = ledger.record_transaction(&TransactionInput {
        date: Some(demo_date(15, 14, 30)?),
        customer_name: Some("Juan Dela Cruz".to_string()),
        ..TransactionInput::new(vec![coffee(2), tea(1)])
    })?;
    let full = ledger.quick_amount(first.id(), QuickAmount::PayFull)?;
    ledger.record_payment(first.id(), &PaymentUpdate::new(full, Some(PaymentMethod::Card)))?;

    // Partial cash payment
    ledger.record_transaction(&TransactionInput {
        date: Some(demo_date(15, 16, 45)?),
        customer_name: Some("Maria Santos".to_string()),
        amount_paid: Money::from_cents(1500),
        payment_method: Some(PaymentMethod::Cash),
        notes: Some("Customer will pay remaining balance tomorrow".to_string()),
        ..TransactionInput::new(vec![pastries(3), milk(2)])
    })?;

    // Nothing paid yet
    ledger.record_transaction(&TransactionInput {
        date: Some(demo_date(16, 10, 15)?),
        customer_name: Some("Pedro Garcia".to_string()),
        notes: Some("Customer requested to pay later".to_string()),
        ..TransactionInput::new(vec![coffee(1)])
    })?;

    // Walk-in, digital wallet
    let fourth = ledger.record_transaction(&TransactionInput {
        date: Some(demo_date(16, 11, 30)?),
        ..TransactionInput::new(vec![tea(4), milk(1)])
    })?;
    let full = ledger.quick_amount(fourth.id(), QuickAmount::PayFull)?;
    ledger.record_payment(
        fourth.id(),
        &PaymentUpdate::new(full, Some(PaymentMethod::DigitalWallet)),
    )?;

    Ok(ledger)
}

/// Demo catalog and ledger behind a shared handle, using `config` for tax,
/// numbering and channel capacity.
pub fn demo_store(config: &StoreConfig) -> CoreResult<StoreState> {
    let catalog = demo_catalog()?;
    let ledger = demo_ledger(config.tax_rate(), config.receipt_prefix())?;

    info!(
        products = catalog.len(),
        transactions = ledger.len(),
        store = %config.store_name,
        "Demo store seeded"
    );
    Ok(StoreState::new(catalog, ledger, config.event_capacity))
}

/// A fixed January 2024 timestamp, so demo receipts sort the same on every run.
fn demo_date(day: u32, hour: u32, minute: u32) -> CoreResult<DateTime<Utc>> {
    Utc.with_ymd_and_hms(2024, 1, day, hour, minute, 0)
        .single()
        .ok_or_else(|| {
            ValidationError::InvalidFormat {
                field: "date".to_string(),
                reason: format!("2024-01-{:02} {:02}:{:02} is not a valid time", day, hour, minute),
            }
            .into()
        })
}
