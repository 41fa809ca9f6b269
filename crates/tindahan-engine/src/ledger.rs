//! # Transaction Ledger
//!
//! The authoritative receipt collection.
//!
//! ## Payment Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Receipt Lifecycle                                    │
//! │                                                                         │
//! │  record_transaction()   items priced, tax added, total frozen           │
//! │          │                                                              │
//! │          ▼                                                              │
//! │  ┌──────────┐   record_payment()   ┌───────────────┐                    │
//! │  │  Unpaid  │ ◄──────────────────► │ PartiallyPaid │                    │
//! │  └──────────┘                      └───────────────┘                    │
//! │        ▲                                   ▲                            │
//! │        │         record_payment()          │                            │
//! │        └──────────────►┌──────┐◄───────────┘                            │
//! │                        │ Paid │                                         │
//! │                        └──────┘                                         │
//! │                                                                         │
//! │  Every arrow is the same call; the status is never assigned directly.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use tracing::{debug, info, warn};

use tindahan_core::search::SearchQuery;
use tindahan_core::{
    CoreError, CoreResult, LedgerStats, Money, PaymentUpdate, QuickAmount, StatusFilter, TaxRate,
    Transaction, TransactionInput, ValidationError,
};

/// Receipt prefix used when no configuration is given.
pub const DEFAULT_RECEIPT_PREFIX: &str = "RCP";

/// The receipt collection.
///
/// ## Invariants
/// - Ids and receipt numbers are unique
/// - Every receipt's `payment_status` matches `amount_paid` vs `total`
/// - Items and totals never change after recording
#[derive(Debug, Clone)]
pub struct Ledger {
    transactions: Vec<Transaction>,
    tax_rate: TaxRate,
    receipt_prefix: String,
    next_receipt: u64,
}

impl Default for Ledger {
    fn default() -> Self {
        Ledger::new(TaxRate::default(), DEFAULT_RECEIPT_PREFIX)
    }
}

impl Ledger {
    /// Creates an empty ledger.
    ///
    /// ## Arguments
    /// * `tax_rate` - applied to every receipt recorded here
    /// * `receipt_prefix` - generated receipt numbers look like `RCP-001`
    pub fn new(tax_rate: TaxRate, receipt_prefix: impl Into<String>) -> Self {
        Ledger {
            transactions: Vec::new(),
            tax_rate,
            receipt_prefix: receipt_prefix.into(),
            next_receipt: 1,
        }
    }

    pub fn tax_rate(&self) -> TaxRate {
        self.tax_rate
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Prices and records a sale.
    ///
    /// A receipt number given in `input` must not already exist; without
    /// one, the next free number in the ledger's sequence is used.
    pub fn record_transaction(&mut self, input: &TransactionInput) -> CoreResult<Transaction> {
        let requested = input
            .receipt_number
            .as_deref()
            .map(str::trim)
            .filter(|number| !number.is_empty());
        let receipt_number = match requested {
            Some(number) => {
                if self.receipt_exists(number) {
                    warn!(receipt_number = %number, "Rejected duplicate receipt number");
                    return Err(ValidationError::Duplicate {
                        field: "receipt number".to_string(),
                        value: number.to_string(),
                    }
                    .into());
                }
                number.to_string()
            }
            None => self.next_receipt_number(),
        };

        let txn = Transaction::create(input, &receipt_number, self.tax_rate, Utc::now())
            .inspect_err(|e| {
                warn!(receipt_number = %receipt_number, error = %e, "Rejected transaction");
            })?;

        if requested.is_none() {
            self.next_receipt += 1;
        }

        info!(
            transaction_id = %txn.id(),
            receipt_number = %txn.receipt_number(),
            items = txn.items().len(),
            total = %txn.total(),
            status = %txn.payment_status(),
            "Transaction recorded"
        );

        self.transactions.push(txn.clone());
        Ok(txn)
    }

    /// Sets the amount paid on receipt `id`.
    ///
    /// ## Returns
    /// - `Ok(Transaction)` - the receipt with its recomputed status
    /// - `Err(TransactionNotFound)` - no such id
    /// - `Err(Validation)` - amount below zero or above the total; the
    ///   receipt is unchanged
    pub fn record_payment(&mut self, id: &str, update: &PaymentUpdate) -> CoreResult<Transaction> {
        let txn = self
            .transactions
            .iter_mut()
            .find(|t| t.id() == id)
            .ok_or_else(|| CoreError::TransactionNotFound(id.to_string()))?;

        let previous = txn.payment_status();
        let status = txn.apply_payment(update).inspect_err(|e| {
            warn!(transaction_id = %id, amount = %update.amount_paid, error = %e, "Rejected payment");
        })?;

        if txn.amount_paid().is_positive() && txn.payment_method().is_none() {
            warn!(
                receipt_number = %txn.receipt_number(),
                "Payment recorded without a payment method"
            );
        }

        info!(
            receipt_number = %txn.receipt_number(),
            amount_paid = %txn.amount_paid(),
            from = %previous,
            to = %status,
            "Payment recorded"
        );
        Ok(txn.clone())
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    /// Gets a receipt by id.
    pub fn get(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id() == id)
    }

    /// Gets a receipt by its human-facing number.
    pub fn get_by_receipt_number(&self, receipt_number: &str) -> Option<&Transaction> {
        self.transactions
            .iter()
            .find(|t| t.receipt_number() == receipt_number)
    }

    /// The full collection in recording order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// The amount a quick-amount button in the payment modal fills in.
    pub fn quick_amount(&self, id: &str, quick: QuickAmount) -> CoreResult<Money> {
        self.get(id)
            .map(|t| t.quick_amount(quick))
            .ok_or_else(|| CoreError::TransactionNotFound(id.to_string()))
    }

    // =========================================================================
    // Projections
    // =========================================================================
    // Every list view is newest first.

    /// All receipts, newest first.
    pub fn list_sorted(&self) -> Vec<Transaction> {
        self.project(&SearchQuery::new(""), StatusFilter::All)
    }

    /// Receipts whose number, customer or any item name contains `query`.
    pub fn search(&self, query: &str) -> Vec<Transaction> {
        self.project(&SearchQuery::new(query), StatusFilter::All)
    }

    /// Receipts with the given payment status (`All` passes everything).
    pub fn filter_by_status(&self, filter: StatusFilter) -> Vec<Transaction> {
        self.project(&SearchQuery::new(""), filter)
    }

    /// Search and status filter together: the list the transactions screen
    /// renders.
    pub fn query(&self, query: &str, filter: StatusFilter) -> Vec<Transaction> {
        self.project(&SearchQuery::new(query), filter)
    }

    /// Counts, revenue and pending balance over the full collection.
    pub fn aggregate_stats(&self) -> LedgerStats {
        LedgerStats::collect(&self.transactions)
    }

    fn project(&self, query: &SearchQuery, filter: StatusFilter) -> Vec<Transaction> {
        let mut results: Vec<Transaction> = self
            .transactions
            .iter()
            .filter(|t| filter.matches(t.payment_status()) && matches_query(t, query))
            .cloned()
            .collect();
        results.sort_by(|a, b| b.date().cmp(&a.date()));

        debug!(
            query = %query.as_str(),
            filter = ?filter,
            count = results.len(),
            "Ledger projection"
        );
        results
    }

    // =========================================================================
    // Receipt Numbers
    // =========================================================================

    fn receipt_exists(&self, receipt_number: &str) -> bool {
        self.get_by_receipt_number(receipt_number).is_some()
    }

    /// Next number in the sequence that is not already taken.
    fn next_receipt_number(&mut self) -> String {
        loop {
            let candidate = format!("{}-{:03}", self.receipt_prefix, self.next_receipt);
            if !self.receipt_exists(&candidate) {
                return candidate;
            }
            self.next_receipt += 1;
        }
    }
}

fn matches_query(txn: &Transaction, query: &SearchQuery) -> bool {
    query.matches(txn.receipt_number())
        || query.matches_opt(txn.customer_name())
        || txn.items().iter().any(|item| query.matches(&item.name))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone};
    use tindahan_core::{LineItemInput, PaymentMethod, PaymentStatus};

    fn pesos(p: i64) -> Money {
        Money::from_major_minor(p, 0)
    }

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, day, hour, 0, 0).unwrap()
    }

    /// Untaxed ledger so totals are round numbers.
    fn flat_ledger() -> Ledger {
        Ledger::new(TaxRate::zero(), "T")
    }

    fn sale(item: &str, total: Money) -> TransactionInput {
        TransactionInput::new(vec![LineItemInput::new(item, 1, total)])
    }

    fn sample_ledger() -> Ledger {
        let mut ledger = Ledger::new(TaxRate::zero(), DEFAULT_RECEIPT_PREFIX);
        let receipts = [
            ("RCP-001", 15, Some("Juan Dela Cruz"), "Premium Coffee Beans"),
            ("RCP-002", 16, Some("Maria Santos"), "Artisan Pastries"),
            ("RCP-003", 17, Some("Pedro Garcia"), "Premium Coffee Beans"),
            ("RCP-004", 16, None, "Organic Green Tea"),
        ];
        for (number, day, customer, item) in receipts {
            let input = TransactionInput {
                receipt_number: Some(number.to_string()),
                date: Some(at(day, 10)),
                customer_name: customer.map(String::from),
                ..sale(item, pesos(10))
            };
            ledger.record_transaction(&input).unwrap();
        }
        ledger
    }

    fn numbers(transactions: &[Transaction]) -> Vec<&str> {
        transactions.iter().map(|t| t.receipt_number()).collect()
    }

    #[test]
    fn test_record_transaction_prices_receipt() {
        let mut ledger = Ledger::default();
        let input = TransactionInput::new(vec![
            LineItemInput::new("Artisan Pastries", 3, Money::from_cents(425)),
            LineItemInput::new("Specialty Milk", 2, Money::from_cents(375)),
        ]);
        let txn = ledger.record_transaction(&input).unwrap();

        assert_eq!(txn.receipt_number(), "RCP-001");
        assert_eq!(txn.subtotal().cents(), 2025);
        assert_eq!(txn.tax().cents(), 243);
        assert_eq!(txn.total().cents(), 2268);
        assert_eq!(txn.payment_status(), PaymentStatus::Unpaid);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_receipt_numbers_follow_sequence_and_skip_taken() {
        let mut ledger = flat_ledger();
        let first = ledger.record_transaction(&sale("Tea", pesos(5))).unwrap();
        assert_eq!(first.receipt_number(), "T-001");

        let manual = TransactionInput {
            receipt_number: Some("T-002".to_string()),
            ..sale("Tea", pesos(5))
        };
        ledger.record_transaction(&manual).unwrap();

        let third = ledger.record_transaction(&sale("Tea", pesos(5))).unwrap();
        assert_eq!(third.receipt_number(), "T-003");
    }

    #[test]
    fn test_duplicate_receipt_number_rejected() {
        let mut ledger = sample_ledger();
        let input = TransactionInput {
            receipt_number: Some(" RCP-002 ".to_string()),
            ..sale("Tea", pesos(5))
        };
        let err = ledger.record_transaction(&input).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Duplicate { .. })
        ));
        assert_eq!(ledger.len(), 4);
    }

    #[test]
    fn test_rejected_transaction_does_not_consume_number() {
        let mut ledger = flat_ledger();
        assert!(ledger
            .record_transaction(&TransactionInput::new(vec![]))
            .is_err());
        let txn = ledger.record_transaction(&sale("Tea", pesos(5))).unwrap();
        assert_eq!(txn.receipt_number(), "T-001");
    }

    #[test]
    fn test_oversized_line_is_rejected_not_panicking() {
        let mut ledger = Ledger::default();
        let input = TransactionInput::new(vec![LineItemInput::new(
            "Gold Bar",
            3,
            Money::from_cents(i64::MAX / 2),
        )]);

        let err = ledger.record_transaction(&input).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::OutOfRange { .. })
        ));
        assert!(ledger.is_empty());

        let txn = ledger.record_transaction(&sale("Tea", pesos(5))).unwrap();
        assert_eq!(txn.receipt_number(), "RCP-001");
    }

    #[test]
    fn test_partial_then_full_payment() {
        let mut ledger = flat_ledger();
        let txn = ledger.record_transaction(&sale("Groceries", pesos(100))).unwrap();
        assert_eq!(txn.payment_status(), PaymentStatus::Unpaid);

        let txn = ledger
            .record_payment(txn.id(), &PaymentUpdate::new(pesos(40), Some(PaymentMethod::Cash)))
            .unwrap();
        assert_eq!(txn.payment_status(), PaymentStatus::PartiallyPaid);
        assert_eq!(txn.remaining_balance(), pesos(60));

        let txn = ledger
            .record_payment(txn.id(), &PaymentUpdate::new(pesos(100), None))
            .unwrap();
        assert_eq!(txn.payment_status(), PaymentStatus::Paid);
        assert_eq!(txn.payment_method(), Some(PaymentMethod::Cash));
    }

    #[test]
    fn test_overpayment_rejected_without_mutation() {
        let mut ledger = flat_ledger();
        let txn = ledger.record_transaction(&sale("Groceries", pesos(100))).unwrap();
        ledger
            .record_payment(txn.id(), &PaymentUpdate::new(pesos(40), None))
            .unwrap();

        let err = ledger
            .record_payment(txn.id(), &PaymentUpdate::new(pesos(150), Some(PaymentMethod::Card)))
            .unwrap_err();
        assert!(err.is_validation());

        let err = ledger
            .record_payment(txn.id(), &PaymentUpdate::new(pesos(-1), None))
            .unwrap_err();
        assert!(err.is_validation());

        let stored = ledger.get(txn.id()).unwrap();
        assert_eq!(stored.amount_paid(), pesos(40));
        assert_eq!(stored.payment_status(), PaymentStatus::PartiallyPaid);
        assert_eq!(stored.payment_method(), None);
    }

    #[test]
    fn test_every_status_reachable_in_one_call() {
        let mut ledger = flat_ledger();
        let id = ledger
            .record_transaction(&sale("Groceries", pesos(100)))
            .unwrap()
            .id()
            .to_string();

        let steps = [
            (pesos(100), PaymentStatus::Paid),
            (Money::zero(), PaymentStatus::Unpaid),
            (pesos(30), PaymentStatus::PartiallyPaid),
            (Money::zero(), PaymentStatus::Unpaid),
            (pesos(100), PaymentStatus::Paid),
            (pesos(99), PaymentStatus::PartiallyPaid),
        ];
        for (amount, expected) in steps {
            let txn = ledger
                .record_payment(&id, &PaymentUpdate::new(amount, None))
                .unwrap();
            assert_eq!(txn.payment_status(), expected);
        }
    }

    #[test]
    fn test_record_payment_unknown_id() {
        let mut ledger = sample_ledger();
        let err = ledger
            .record_payment("nope", &PaymentUpdate::new(pesos(1), None))
            .unwrap_err();
        assert_eq!(err, CoreError::TransactionNotFound("nope".to_string()));
    }

    #[test]
    fn test_quick_amounts_feed_record_payment() {
        let mut ledger = flat_ledger();
        let id = ledger
            .record_transaction(&sale("Groceries", pesos(100)))
            .unwrap()
            .id()
            .to_string();
        ledger
            .record_payment(&id, &PaymentUpdate::new(pesos(40), None))
            .unwrap();

        assert_eq!(ledger.quick_amount(&id, QuickAmount::PayRemaining).unwrap(), pesos(60));
        let full = ledger.quick_amount(&id, QuickAmount::PayFull).unwrap();
        let txn = ledger
            .record_payment(&id, &PaymentUpdate::new(full, None))
            .unwrap();
        assert_eq!(txn.payment_status(), PaymentStatus::Paid);

        assert!(ledger.quick_amount("nope", QuickAmount::PayFull).is_err());
    }

    #[test]
    fn test_list_sorted_newest_first() {
        let ledger = sample_ledger();
        // RCP-002 and RCP-004 share a date; recording order breaks the tie
        assert_eq!(
            numbers(&ledger.list_sorted()),
            vec!["RCP-003", "RCP-002", "RCP-004", "RCP-001"]
        );
    }

    #[test]
    fn test_search_receipt_customer_and_items() {
        let ledger = sample_ledger();

        assert_eq!(numbers(&ledger.search("rcp-004")), vec!["RCP-004"]);
        assert_eq!(numbers(&ledger.search("MARIA")), vec!["RCP-002"]);
        assert_eq!(numbers(&ledger.search("coffee")), vec!["RCP-003", "RCP-001"]);
        assert!(ledger.search("pepsi").is_empty());
    }

    #[test]
    fn test_empty_search_returns_everything() {
        let ledger = sample_ledger();
        assert_eq!(ledger.search("").len(), ledger.len());
        assert_eq!(ledger.search(""), ledger.list_sorted());
    }

    #[test]
    fn test_filter_by_status() {
        let mut ledger = sample_ledger();
        let paid_id = ledger.get_by_receipt_number("RCP-001").unwrap().id().to_string();
        let partial_id = ledger.get_by_receipt_number("RCP-002").unwrap().id().to_string();
        ledger
            .record_payment(&paid_id, &PaymentUpdate::new(pesos(10), Some(PaymentMethod::Card)))
            .unwrap();
        let half = Money::from_cents(500);
        ledger
            .record_payment(&partial_id, &PaymentUpdate::new(half, Some(PaymentMethod::Cash)))
            .unwrap();

        assert_eq!(numbers(&ledger.filter_by_status(StatusFilter::Paid)), vec!["RCP-001"]);
        assert_eq!(
            numbers(&ledger.filter_by_status(StatusFilter::PartiallyPaid)),
            vec!["RCP-002"]
        );
        assert_eq!(
            numbers(&ledger.filter_by_status(StatusFilter::Unpaid)),
            vec!["RCP-003", "RCP-004"]
        );
        assert_eq!(ledger.filter_by_status(StatusFilter::All).len(), 4);
    }

    #[test]
    fn test_query_combines_search_and_filter() {
        let mut ledger = sample_ledger();
        let id = ledger.get_by_receipt_number("RCP-003").unwrap().id().to_string();
        ledger
            .record_payment(&id, &PaymentUpdate::new(pesos(10), None))
            .unwrap();

        assert_eq!(numbers(&ledger.query("coffee", StatusFilter::Paid)), vec!["RCP-003"]);
        assert_eq!(numbers(&ledger.query("coffee", StatusFilter::Unpaid)), vec!["RCP-001"]);
    }

    #[test]
    fn test_stats_revenue_and_pending() {
        let mut ledger = flat_ledger();
        let paid = ledger.record_transaction(&sale("Rice", pesos(50))).unwrap();
        ledger.record_transaction(&sale("Oil", pesos(20))).unwrap();
        ledger
            .record_payment(paid.id(), &PaymentUpdate::new(pesos(50), Some(PaymentMethod::Cash)))
            .unwrap();

        let stats = ledger.aggregate_stats();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.paid, 1);
        assert_eq!(stats.unpaid, 1);
        assert_eq!(stats.partially_paid, 0);
        assert_eq!(stats.total_revenue, pesos(50));
        assert_eq!(stats.pending_amount, pesos(20));
    }
}
