//! # Domain Types
//!
//! Core domain types used throughout Tindahan POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │  Transaction    │   │    LineItem     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  name           │   │  receipt_number │   │  name           │       │
//! │  │  price          │   │  total          │   │  quantity       │       │
//! │  │  stock          │   │  amount_paid    │   │  unit_price     │       │
//! │  │  status*        │   │  payment_status*│   │  line_total     │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  * derived: computed by `status.rs` on every mutation, never assigned   │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  StockStatus    │   │ PaymentStatus   │   │ PaymentMethod   │       │
//! │  │  InStock        │   │  Paid           │   │  Cash           │       │
//! │  │  LowStock       │   │  PartiallyPaid  │   │  Card           │       │
//! │  │  OutOfStock     │   │  Unpaid         │   │  DigitalWallet  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Input Types
//! Callers create and edit records through `ProductInput`, `TransactionInput`
//! and `PaymentUpdate`. None of them carry an id, a timestamp or a derived
//! status, and the record structs keep their fields private, so a stale or
//! hand-picked status can never be stored.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::ValidationError;
use crate::money::{Money, TaxRate};
use crate::search::compare_names;
use crate::status::{payment_status, stock_status};
use crate::validation::{
    validate_category, validate_customer_name, validate_item_name, validate_notes,
    validate_payment_amount, validate_price, validate_product_name, validate_quantity,
    validate_receipt_amount, validate_receipt_number, validate_receipt_size, validate_stock,
    validate_unit_price, ValidationResult,
};

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Stock Status
// =============================================================================

/// Availability of a product, derived from its stock count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

impl StockStatus {
    /// Label shown on the inventory screen.
    pub fn label(&self) -> &'static str {
        match self {
            StockStatus::InStock => "In stock",
            StockStatus::LowStock => "Low stock",
            StockStatus::OutOfStock => "Out of stock",
        }
    }

    /// True for the statuses that show up in the low-stock alert list.
    pub fn needs_restock(&self) -> bool {
        !matches!(self, StockStatus::InStock)
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Product
// =============================================================================

/// Everything a caller may set on a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
    pub price: Money,
    pub stock: i64,
    #[serde(default)]
    pub category: Option<String>,
}

impl ProductInput {
    /// Convenience constructor without a category.
    pub fn new(name: impl Into<String>, price: Money, stock: i64) -> Self {
        ProductInput {
            name: name.into(),
            price,
            stock,
            category: None,
        }
    }

    /// Sets the category label.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Checks every field and returns the normalized values.
    ///
    /// Runs to completion before a product is touched, so an edit with one
    /// bad field applies none of them.
    fn validate(&self) -> ValidationResult<ValidProduct> {
        let name = validate_product_name(&self.name)?;
        validate_price(self.price)?;
        validate_stock(self.stock)?;
        let category = validate_category(self.category.as_deref())?;

        Ok(ValidProduct {
            name,
            price: self.price,
            stock: self.stock,
            category,
        })
    }
}

struct ValidProduct {
    name: String,
    price: Money,
    stock: i64,
    category: Option<String>,
}

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    id: String,
    name: String,
    price: Money,
    stock: i64,
    status: StockStatus,
    category: Option<String>,
    #[ts(as = "String")]
    last_updated: DateTime<Utc>,
}

impl Product {
    /// Validates `input` and builds a new product with a fresh id.
    pub fn create(input: &ProductInput, now: DateTime<Utc>) -> ValidationResult<Product> {
        let valid = input.validate()?;

        Ok(Product {
            id: new_id(),
            status: stock_status(valid.stock),
            name: valid.name,
            price: valid.price,
            stock: valid.stock,
            category: valid.category,
            last_updated: now,
        })
    }

    /// Replaces every mutable field with `input`, keeping the id.
    ///
    /// On error the product is unchanged.
    pub fn apply(&mut self, input: &ProductInput, now: DateTime<Utc>) -> ValidationResult<()> {
        let valid = input.validate()?;

        self.status = stock_status(valid.stock);
        self.name = valid.name;
        self.price = valid.price;
        self.stock = valid.stock;
        self.category = valid.category;
        self.last_updated = now;
        Ok(())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn stock(&self) -> i64 {
        self.stock
    }

    /// Stock status, always consistent with [`Product::stock`].
    pub fn status(&self) -> StockStatus {
        self.status
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }

    /// The input that would recreate this product's editable fields.
    ///
    /// Used to prefill the edit form.
    pub fn to_input(&self) -> ProductInput {
        ProductInput {
            name: self.name.clone(),
            price: self.price,
            stock: self.stock,
            category: self.category.clone(),
        }
    }
}

// =============================================================================
// Catalog Sort
// =============================================================================

/// Sort keys offered on the inventory screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    /// A → Z, ignoring accents and case.
    #[default]
    Name,
    /// Most units first.
    Stock,
    /// Most expensive first.
    Price,
}

impl SortBy {
    /// Ordering of two products under this key.
    ///
    /// Used with a stable sort, so equal keys keep catalog order.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortBy::Name => compare_names(&a.name, &b.name),
            SortBy::Stock => b.stock.cmp(&a.stock),
            SortBy::Price => b.price.cmp(&a.price),
        }
    }
}

impl std::str::FromStr for SortBy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" | "by_name" => Ok(SortBy::Name),
            "stock" | "by_stock" => Ok(SortBy::Stock),
            "price" | "by_price" => Ok(SortBy::Price),
            _ => Err(ValidationError::InvalidFormat {
                field: "sort".to_string(),
                reason: "must be one of: name, stock, price".to_string(),
            }),
        }
    }
}

// =============================================================================
// Payment Status & Method
// =============================================================================

/// Settlement of a receipt, derived from amount paid against total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Paid,
    PartiallyPaid,
    Unpaid,
}

impl PaymentStatus {
    /// Label shown on the receipt badge.
    pub fn label(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "Paid",
            PaymentStatus::PartiallyPaid => "Partially Paid",
            PaymentStatus::Unpaid => "Unpaid",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How a customer paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Card,
    DigitalWallet,
}

impl PaymentMethod {
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Card => "Card",
            PaymentMethod::DigitalWallet => "Digital Wallet",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The status chips above the transaction list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    All,
    Paid,
    PartiallyPaid,
    Unpaid,
}

impl StatusFilter {
    /// True when a receipt with `status` passes this filter.
    pub fn matches(&self, status: PaymentStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Paid => status == PaymentStatus::Paid,
            StatusFilter::PartiallyPaid => status == PaymentStatus::PartiallyPaid,
            StatusFilter::Unpaid => status == PaymentStatus::Unpaid,
        }
    }
}

impl From<PaymentStatus> for StatusFilter {
    fn from(status: PaymentStatus) -> Self {
        match status {
            PaymentStatus::Paid => StatusFilter::Paid,
            PaymentStatus::PartiallyPaid => StatusFilter::PartiallyPaid,
            PaymentStatus::Unpaid => StatusFilter::Unpaid,
        }
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// A line to put on a new receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItemInput {
    pub name: String,
    pub quantity: i64,
    pub unit_price: Money,
}

impl LineItemInput {
    pub fn new(name: impl Into<String>, quantity: i64, unit_price: Money) -> Self {
        LineItemInput {
            name: name.into(),
            quantity,
            unit_price,
        }
    }
}

/// A line on a recorded receipt. Frozen once the receipt exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub id: String,
    pub name: String,
    pub quantity: i64,
    pub unit_price: Money,
    /// unit_price × quantity
    pub line_total: Money,
}

impl LineItem {
    fn create(input: &LineItemInput) -> ValidationResult<LineItem> {
        let name = validate_item_name(&input.name)?;
        validate_quantity(input.quantity)?;
        validate_unit_price(input.unit_price)?;

        let line_total = validate_receipt_amount(
            "line total",
            input.unit_price.checked_multiply_quantity(input.quantity),
        )?;

        Ok(LineItem {
            id: new_id(),
            name,
            quantity: input.quantity,
            unit_price: input.unit_price,
            line_total,
        })
    }
}

// =============================================================================
// Transaction
// =============================================================================

/// A sale to record in the ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TransactionInput {
    /// Assigned from the ledger's sequence when absent.
    #[serde(default)]
    pub receipt_number: Option<String>,
    /// Defaults to the time of recording.
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub customer_name: Option<String>,
    pub items: Vec<LineItemInput>,
    #[serde(default)]
    pub amount_paid: Money,
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl TransactionInput {
    /// An unpaid walk-in sale of `items`.
    pub fn new(items: Vec<LineItemInput>) -> Self {
        TransactionInput {
            items,
            ..TransactionInput::default()
        }
    }
}

/// A payment entered in the payment modal.
///
/// `amount_paid` replaces the receipt's running amount; it is the new
/// total paid, not an increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PaymentUpdate {
    pub amount_paid: Money,
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
}

impl PaymentUpdate {
    pub fn new(amount_paid: Money, payment_method: Option<PaymentMethod>) -> Self {
        PaymentUpdate {
            amount_paid,
            payment_method,
        }
    }
}

/// Shortcut buttons in the payment modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum QuickAmount {
    /// `total − amount_paid`
    PayRemaining,
    /// `total`
    PayFull,
}

/// A recorded receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    id: String,
    receipt_number: String,
    #[ts(as = "String")]
    date: DateTime<Utc>,
    customer_name: Option<String>,
    items: Vec<LineItem>,
    subtotal: Money,
    tax: Money,
    total: Money,
    payment_status: PaymentStatus,
    amount_paid: Money,
    payment_method: Option<PaymentMethod>,
    notes: Option<String>,
}

impl Transaction {
    /// Validates `input` and prices the receipt.
    ///
    /// `receipt_number` is what the ledger settled on (the caller's or the
    /// next in sequence); uniqueness is the ledger's concern.
    pub fn create(
        input: &TransactionInput,
        receipt_number: &str,
        tax_rate: TaxRate,
        now: DateTime<Utc>,
    ) -> ValidationResult<Transaction> {
        let receipt_number = validate_receipt_number(receipt_number)?;
        validate_receipt_size(input.items.len())?;
        let items = input
            .items
            .iter()
            .map(LineItem::create)
            .collect::<ValidationResult<Vec<_>>>()?;
        let customer_name = validate_customer_name(input.customer_name.as_deref())?;
        let notes = validate_notes(input.notes.as_deref())?;

        let subtotal = validate_receipt_amount(
            "subtotal",
            items
                .iter()
                .try_fold(Money::zero(), |sum, item| sum.checked_add(item.line_total)),
        )?;
        let tax = subtotal.calculate_tax(tax_rate);
        let total = validate_receipt_amount("total", subtotal.checked_add(tax))?;
        validate_payment_amount(input.amount_paid, total)?;

        Ok(Transaction {
            id: new_id(),
            receipt_number,
            date: input.date.unwrap_or(now),
            customer_name,
            items,
            subtotal,
            tax,
            total,
            payment_status: payment_status(input.amount_paid, total),
            amount_paid: input.amount_paid,
            payment_method: input.payment_method,
            notes,
        })
    }

    /// Records a payment. On error the receipt is unchanged.
    ///
    /// A missing method keeps the one already on the receipt.
    pub fn apply_payment(&mut self, update: &PaymentUpdate) -> ValidationResult<PaymentStatus> {
        validate_payment_amount(update.amount_paid, self.total)?;

        self.amount_paid = update.amount_paid;
        self.payment_status = payment_status(self.amount_paid, self.total);
        if let Some(method) = update.payment_method {
            self.payment_method = Some(method);
        }
        Ok(self.payment_status)
    }

    /// What is still owed.
    pub fn remaining_balance(&self) -> Money {
        self.total - self.amount_paid
    }

    /// The amount a quick-amount button fills in.
    pub fn quick_amount(&self, quick: QuickAmount) -> Money {
        match quick {
            QuickAmount::PayRemaining => self.remaining_balance(),
            QuickAmount::PayFull => self.total,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn receipt_number(&self) -> &str {
        &self.receipt_number
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn customer_name(&self) -> Option<&str> {
        self.customer_name.as_deref()
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn subtotal(&self) -> Money {
        self.subtotal
    }

    pub fn tax(&self) -> Money {
        self.tax
    }

    pub fn total(&self) -> Money {
        self.total
    }

    /// Payment status, always consistent with amount paid and total.
    pub fn payment_status(&self) -> PaymentStatus {
        self.payment_status
    }

    pub fn amount_paid(&self) -> Money {
        self.amount_paid
    }

    pub fn payment_method(&self) -> Option<PaymentMethod> {
        self.payment_method
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }
}

// =============================================================================
// Statistics
// =============================================================================

/// Counts shown above the inventory list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InventoryStats {
    pub total: usize,
    pub in_stock: usize,
    pub low_stock: usize,
    pub out_of_stock: usize,
}

impl InventoryStats {
    /// Tallies a full scan of products.
    pub fn collect<'a>(products: impl IntoIterator<Item = &'a Product>) -> Self {
        products
            .into_iter()
            .fold(InventoryStats::default(), |mut stats, product| {
                stats.total += 1;
                match product.status() {
                    StockStatus::InStock => stats.in_stock += 1,
                    StockStatus::LowStock => stats.low_stock += 1,
                    StockStatus::OutOfStock => stats.out_of_stock += 1,
                }
                stats
            })
    }
}

/// Counts and amounts shown above the transaction list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LedgerStats {
    pub total: usize,
    pub paid: usize,
    pub partially_paid: usize,
    pub unpaid: usize,
    /// Σ total of paid receipts.
    pub total_revenue: Money,
    /// Σ remaining balance of receipts that are not paid.
    pub pending_amount: Money,
}

impl LedgerStats {
    /// Tallies a full scan of transactions.
    pub fn collect<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Self {
        transactions
            .into_iter()
            .fold(LedgerStats::default(), |mut stats, txn| {
                stats.total += 1;
                match txn.payment_status() {
                    PaymentStatus::Paid => {
                        stats.paid += 1;
                        stats.total_revenue += txn.total();
                    }
                    PaymentStatus::PartiallyPaid => {
                        stats.partially_paid += 1;
                        stats.pending_amount += txn.remaining_balance();
                    }
                    PaymentStatus::Unpaid => {
                        stats.unpaid += 1;
                        stats.pending_amount += txn.remaining_balance();
                    }
                }
                stats
            })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
