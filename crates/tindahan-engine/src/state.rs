//! # Store State
//!
//! Shared handle to the catalog and ledger for a multi-client shell.
//!
//! ## Thread Safety
//! Each engine sits behind its own `Arc<RwLock<T>>`:
//! 1. Mutations take the write lock, so writes to one collection are serialized
//! 2. Projections take the read lock and run alongside each other
//! 3. Catalog and ledger never block one another
//!
//! Engines validate before they write, so a panic inside a closure cannot
//! leave half-applied state behind. A poisoned lock is therefore recovered
//! rather than propagated.
//!
//! ## Change Notifications
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Store Event Flow                                     │
//! │                                                                         │
//! │  UI Action              StoreState                  Subscribers         │
//! │  ─────────              ──────────                  ───────────         │
//! │                                                                         │
//! │  Save product ────────► add_product() ─────┐                            │
//! │                                            │  write lock held           │
//! │  Record payment ──────► record_payment() ──┤  until event sent          │
//! │                                            ▼                            │
//! │                              broadcast::Sender<StoreEvent> ──► rx.recv()│
//! │                                                                         │
//! │  Failed calls send nothing. Events arrive in mutation order.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::trace;
use ts_rs::TS;

use tindahan_core::{
    CoreResult, PaymentUpdate, Product, ProductInput, Transaction, TransactionInput,
};

use crate::catalog::Catalog;
use crate::config::StoreConfig;
use crate::ledger::Ledger;
use crate::reports::DashboardSummary;

/// A committed change, sent after the collection is updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum StoreEvent {
    ProductAdded(Product),
    ProductUpdated(Product),
    ProductDeleted(Product),
    TransactionRecorded(Transaction),
    PaymentRecorded(Transaction),
}

/// Cloneable handle to the store's engines.
#[derive(Debug, Clone)]
pub struct StoreState {
    catalog: Arc<RwLock<Catalog>>,
    ledger: Arc<RwLock<Ledger>>,
    events: broadcast::Sender<StoreEvent>,
}

impl StoreState {
    /// Wraps existing engines.
    ///
    /// `event_capacity` is clamped to at least 1.
    pub fn new(catalog: Catalog, ledger: Ledger, event_capacity: usize) -> Self {
        let (events, _) = broadcast::channel(event_capacity.max(1));
        StoreState {
            catalog: Arc::new(RwLock::new(catalog)),
            ledger: Arc::new(RwLock::new(ledger)),
            events,
        }
    }

    /// Empty store using the configured tax rate, receipt prefix and
    /// channel capacity.
    pub fn from_config(config: &StoreConfig) -> Self {
        StoreState::new(
            Catalog::new(),
            Ledger::new(config.tax_rate(), config.receipt_prefix()),
            config.event_capacity,
        )
    }

    /// Receives every event sent after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    // =========================================================================
    // Raw Access
    // =========================================================================

    /// Executes a function with read access to the catalog.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let stats = store.with_catalog(|catalog| catalog.aggregate_stats());
    /// ```
    pub fn with_catalog<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Catalog) -> R,
    {
        let catalog = self.catalog.read().unwrap_or_else(PoisonError::into_inner);
        f(&catalog)
    }

    /// Executes a function with read access to the ledger.
    pub fn with_ledger<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Ledger) -> R,
    {
        let ledger = self.ledger.read().unwrap_or_else(PoisonError::into_inner);
        f(&ledger)
    }

    fn with_catalog_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Catalog) -> R,
    {
        let mut catalog = self.catalog.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut catalog)
    }

    fn with_ledger_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Ledger) -> R,
    {
        let mut ledger = self.ledger.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut ledger)
    }

    // =========================================================================
    // Mutations
    // =========================================================================
    // The event is sent while the write lock is still held, so subscribers
    // see changes in the order they were applied.

    pub fn add_product(&self, input: &ProductInput) -> CoreResult<Product> {
        self.with_catalog_mut(|catalog| {
            let product = catalog.add_product(input)?;
            self.publish(StoreEvent::ProductAdded(product.clone()));
            Ok(product)
        })
    }

    pub fn update_product(&self, id: &str, input: &ProductInput) -> CoreResult<Product> {
        self.with_catalog_mut(|catalog| {
            let product = catalog.update_product(id, input)?;
            self.publish(StoreEvent::ProductUpdated(product.clone()));
            Ok(product)
        })
    }

    pub fn delete_product(&self, id: &str) -> CoreResult<Product> {
        self.with_catalog_mut(|catalog| {
            let product = catalog.delete_product(id)?;
            self.publish(StoreEvent::ProductDeleted(product.clone()));
            Ok(product)
        })
    }

    pub fn record_transaction(&self, input: &TransactionInput) -> CoreResult<Transaction> {
        self.with_ledger_mut(|ledger| {
            let txn = ledger.record_transaction(input)?;
            self.publish(StoreEvent::TransactionRecorded(txn.clone()));
            Ok(txn)
        })
    }

    pub fn record_payment(&self, id: &str, update: &PaymentUpdate) -> CoreResult<Transaction> {
        self.with_ledger_mut(|ledger| {
            let txn = ledger.record_payment(id, update)?;
            self.publish(StoreEvent::PaymentRecorded(txn.clone()));
            Ok(txn)
        })
    }

    // =========================================================================
    // Snapshots
    // =========================================================================

    /// Copy of the product collection.
    pub fn products(&self) -> Vec<Product> {
        self.with_catalog(|catalog| catalog.products().to_vec())
    }

    /// Copy of the receipt collection, in recording order.
    pub fn transactions(&self) -> Vec<Transaction> {
        self.with_ledger(|ledger| ledger.transactions().to_vec())
    }

    /// Dashboard built from both engines.
    ///
    /// The catalog lock is released before the ledger lock is taken.
    pub fn dashboard(&self, now: DateTime<Utc>) -> DashboardSummary {
        let catalog = self.with_catalog(Catalog::clone);
        self.with_ledger(|ledger| DashboardSummary::build(&catalog, ledger, now))
    }

    fn publish(&self, event: StoreEvent) {
        // No subscribers is not an error
        if let Err(broadcast::error::SendError(event)) = self.events.send(event) {
            trace!(?event, "No subscribers for store event");
        }
    }
}

impl Default for StoreState {
    fn default() -> Self {
        StoreState::from_config(&StoreConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use tindahan_core::{LineItemInput, Money, PaymentStatus, StockStatus, TaxRate};

    fn pesos(p: i64) -> Money {
        Money::from_major_minor(p, 0)
    }

    fn flat_store() -> StoreState {
        StoreState::new(Catalog::new(), Ledger::new(TaxRate::zero(), "T"), 16)
    }

    #[tokio::test]
    async fn test_subscribers_see_mutations_in_order() {
        let store = flat_store();
        let mut rx = store.subscribe();

        let sugar = store
            .add_product(&ProductInput::new("Sugar", Money::from_cents(250), 5))
            .unwrap();
        store
            .update_product(sugar.id(), &ProductInput::new("Sugar", Money::from_cents(250), 0))
            .unwrap();
        let txn = store
            .record_transaction(&TransactionInput::new(vec![LineItemInput::new(
                "Sugar",
                1,
                pesos(100),
            )]))
            .unwrap();
        store
            .record_payment(txn.id(), &PaymentUpdate::new(pesos(40), None))
            .unwrap();
        store.delete_product(sugar.id()).unwrap();

        match rx.recv().await.unwrap() {
            StoreEvent::ProductAdded(p) => assert_eq!(p.status(), StockStatus::LowStock),
            other => panic!("unexpected event: {:?}", other),
        }
        match rx.recv().await.unwrap() {
            StoreEvent::ProductUpdated(p) => assert_eq!(p.status(), StockStatus::OutOfStock),
            other => panic!("unexpected event: {:?}", other),
        }
        assert!(matches!(
            rx.recv().await.unwrap(),
            StoreEvent::TransactionRecorded(_)
        ));
        match rx.recv().await.unwrap() {
            StoreEvent::PaymentRecorded(t) => {
                assert_eq!(t.payment_status(), PaymentStatus::PartiallyPaid)
            }
            other => panic!("unexpected event: {:?}", other),
        }
        assert!(matches!(
            rx.recv().await.unwrap(),
            StoreEvent::ProductDeleted(_)
        ));
    }

    #[tokio::test]
    async fn test_failed_mutation_sends_nothing() {
        let store = flat_store();
        let mut rx = store.subscribe();

        assert!(store
            .add_product(&ProductInput::new("Bad", Money::from_cents(100), -1))
            .is_err());
        assert!(store.delete_product("missing").is_err());

        assert!(matches!(
            rx.try_recv(),
            Err(broadcast::error::TryRecvError::Empty)
        ));
    }

    #[test]
    fn test_oversized_receipt_leaves_store_usable() {
        let store = flat_store();
        let huge = LineItemInput::new("Gold bar", 3, Money::from_cents(i64::MAX / 2));
        assert!(store
            .record_transaction(&TransactionInput::new(vec![huge]))
            .is_err());

        // Neither lock was poisoned by the rejected receipt
        let txn = store
            .record_transaction(&TransactionInput::new(vec![LineItemInput::new(
                "Sugar",
                1,
                pesos(100),
            )]))
            .unwrap();
        assert_eq!(txn.receipt_number(), "T-001");
        assert_eq!(store.transactions().len(), 1);
    }

    #[test]
    fn test_mutations_without_subscribers_succeed() {
        let store = flat_store();
        store
            .add_product(&ProductInput::new("Rice", pesos(50), 40))
            .unwrap();
        assert_eq!(store.products().len(), 1);
    }

    #[test]
    fn test_clones_share_collections() {
        let store = flat_store();
        let handle = store.clone();

        let workers: Vec<_> = (0..4)
            .map(|i| {
                let store = handle.clone();
                thread::spawn(move || {
                    store
                        .add_product(&ProductInput::new(format!("Item {}", i), pesos(10), 20))
                        .unwrap();
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }

        assert_eq!(store.with_catalog(|c| c.len()), 4);
        assert_eq!(store.with_catalog(|c| c.aggregate_stats().in_stock), 4);
    }

    #[test]
    fn test_event_serializes_tagged() {
        let store = flat_store();
        let product = store
            .add_product(&ProductInput::new("Rice", pesos(50), 40))
            .unwrap();
        let json = serde_json::to_value(StoreEvent::ProductAdded(product)).unwrap();
        assert_eq!(json["type"], "product_added");
        assert_eq!(json["payload"]["name"], "Rice");
        assert_eq!(json["payload"]["status"], "in_stock");
    }

    #[test]
    fn test_dashboard_reads_both_engines() {
        let store = flat_store();
        store
            .add_product(&ProductInput::new("Tea", pesos(9), 3))
            .unwrap();
        store
            .record_transaction(&TransactionInput::new(vec![LineItemInput::new(
                "Tea",
                2,
                pesos(9),
            )]))
            .unwrap();

        let dashboard = store.dashboard(Utc::now());
        assert_eq!(dashboard.inventory.low_stock, 1);
        assert_eq!(dashboard.ledger.pending_amount, pesos(18));
        assert_eq!(dashboard.best_sellers[0].units_sold, 2);
        assert_eq!(store.transactions().len(), 1);
    }
}
