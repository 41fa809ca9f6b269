//! # Reports
//!
//! Read-only roll-ups behind the dashboard and reports screens. Nothing here
//! is stored; every call rescans the engines.
//!
//! ## Sales Windows
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Period    Receipts counted                                             │
//! │  ───────   ──────────────────────────────────────────────────────────── │
//! │  Today     same calendar day as `now` (UTC)                             │
//! │  Week      the 7 days ending at `now`                                   │
//! │  Month     same calendar month as `now`                                 │
//! │  AllTime   everything                                                   │
//! │                                                                         │
//! │  Receipts dated after `now` are never counted.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Duration, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use tindahan_core::{InventoryStats, LedgerStats, Money, Product, Transaction, ValidationError};

use crate::catalog::Catalog;
use crate::ledger::Ledger;

/// Best sellers shown on the dashboard card.
pub const DASHBOARD_TOP_PRODUCTS: usize = 3;

// =============================================================================
// Best Sellers
// =============================================================================

/// Units and gross sales of one product across all receipts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductSales {
    /// Name as it first appeared on a receipt.
    pub name: String,
    pub units_sold: i64,
    pub gross_sales: Money,
}

/// Products ranked by units sold, then gross sales, then name.
///
/// Line items are grouped by name ignoring case, since receipts carry names
/// rather than product ids.
pub fn best_sellers(ledger: &Ledger, limit: usize) -> Vec<ProductSales> {
    let mut by_name: HashMap<String, ProductSales> = HashMap::new();

    for item in ledger.transactions().iter().flat_map(Transaction::items) {
        let entry = by_name
            .entry(item.name.to_lowercase())
            .or_insert_with(|| ProductSales {
                name: item.name.clone(),
                units_sold: 0,
                gross_sales: Money::zero(),
            });
        entry.units_sold += item.quantity;
        entry.gross_sales += item.line_total;
    }

    let mut ranked: Vec<ProductSales> = by_name.into_values().collect();
    ranked.sort_by(|a, b| {
        b.units_sold
            .cmp(&a.units_sold)
            .then_with(|| b.gross_sales.cmp(&a.gross_sales))
            .then_with(|| a.name.cmp(&b.name))
    });
    ranked.truncate(limit);
    ranked
}

// =============================================================================
// Sales Summary
// =============================================================================

/// Reporting window for [`sales_summary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    Today,
    Week,
    #[default]
    Month,
    AllTime,
}

impl Period {
    /// True when a receipt dated `date` falls inside this window.
    pub fn contains(&self, date: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        if date > now {
            return false;
        }
        match self {
            Period::Today => date.date_naive() == now.date_naive(),
            Period::Week => date > now - Duration::days(7),
            Period::Month => date.year() == now.year() && date.month() == now.month(),
            Period::AllTime => true,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Period::Today => "Today",
            Period::Week => "This Week",
            Period::Month => "This Month",
            Period::AllTime => "All Time",
        }
    }
}

impl std::str::FromStr for Period {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "today" | "daily" => Ok(Period::Today),
            "week" | "weekly" => Ok(Period::Week),
            "month" | "monthly" => Ok(Period::Month),
            "all" | "all_time" | "alltime" => Ok(Period::AllTime),
            _ => Err(ValidationError::InvalidFormat {
                field: "period".to_string(),
                reason: "must be one of: today, week, month, all".to_string(),
            }),
        }
    }
}

/// Sales inside one window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SalesSummary {
    pub period: Period,
    pub transactions: usize,
    /// Σ total
    pub gross_sales: Money,
    /// Σ amount paid
    pub collected: Money,
    /// Σ remaining balance
    pub outstanding: Money,
}

/// Totals the receipts dated inside `period` as seen at `now`.
pub fn sales_summary(ledger: &Ledger, period: Period, now: DateTime<Utc>) -> SalesSummary {
    ledger
        .transactions()
        .iter()
        .filter(|txn| period.contains(txn.date(), now))
        .fold(
            SalesSummary {
                period,
                transactions: 0,
                gross_sales: Money::zero(),
                collected: Money::zero(),
                outstanding: Money::zero(),
            },
            |mut summary, txn| {
                summary.transactions += 1;
                summary.gross_sales += txn.total();
                summary.collected += txn.amount_paid();
                summary.outstanding += txn.remaining_balance();
                summary
            },
        )
}

// =============================================================================
// Dashboard
// =============================================================================

/// Everything the admin dashboard renders in one snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub inventory: InventoryStats,
    pub ledger: LedgerStats,
    /// Products that need restocking, emptiest first.
    pub low_stock_alerts: Vec<Product>,
    pub best_sellers: Vec<ProductSales>,
    pub weekly_sales: SalesSummary,
    pub monthly_sales: SalesSummary,
}

impl DashboardSummary {
    pub fn build(catalog: &Catalog, ledger: &Ledger, now: DateTime<Utc>) -> Self {
        DashboardSummary {
            inventory: catalog.aggregate_stats(),
            ledger: ledger.aggregate_stats(),
            low_stock_alerts: catalog.low_stock_alerts(),
            best_sellers: best_sellers(ledger, DASHBOARD_TOP_PRODUCTS),
            weekly_sales: sales_summary(ledger, Period::Week, now),
            monthly_sales: sales_summary(ledger, Period::Month, now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ApiError, ErrorCode};
    use chrono::TimeZone;
    use tindahan_core::{
        CoreError, LineItemInput, PaymentUpdate, ProductInput, TaxRate, TransactionInput,
    };

    fn at(month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, month, day, 12, 0, 0).unwrap()
    }

    fn pesos(p: i64) -> Money {
        Money::from_major_minor(p, 0)
    }

    fn record(ledger: &mut Ledger, date: DateTime<Utc>, items: &[(&str, i64, i64)]) -> String {
        let input = TransactionInput {
            date: Some(date),
            ..TransactionInput::new(
                items
                    .iter()
                    .map(|(name, qty, price)| LineItemInput::new(*name, *qty, pesos(*price)))
                    .collect(),
            )
        };
        ledger.record_transaction(&input).unwrap().id().to_string()
    }

    fn flat_ledger() -> Ledger {
        Ledger::new(TaxRate::zero(), "T")
    }

    #[test]
    fn test_best_sellers_ranked_by_units() {
        let mut ledger = flat_ledger();
        record(&mut ledger, at(1, 15), &[("Coffee", 2, 13), ("Tea", 1, 9)]);
        record(&mut ledger, at(1, 16), &[("Tea", 4, 9), ("Milk", 1, 4)]);
        record(&mut ledger, at(1, 16), &[("coffee", 1, 13)]);

        let ranked = best_sellers(&ledger, 10);
        let summary: Vec<(&str, i64, Money)> = ranked
            .iter()
            .map(|p| (p.name.as_str(), p.units_sold, p.gross_sales))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("Tea", 5, pesos(45)),
                ("Coffee", 3, pesos(39)),
                ("Milk", 1, pesos(4)),
            ]
        );
    }

    #[test]
    fn test_best_sellers_ties_break_on_sales() {
        let mut ledger = flat_ledger();
        record(&mut ledger, at(1, 15), &[("Bread", 2, 5), ("Cheese", 2, 20)]);

        let ranked = best_sellers(&ledger, 1);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].name, "Cheese");
    }

    #[test]
    fn test_best_sellers_empty_ledger() {
        assert!(best_sellers(&flat_ledger(), 3).is_empty());
    }

    #[test]
    fn test_period_windows() {
        let now = at(3, 10);
        assert!(Period::Today.contains(now - Duration::hours(11), now));
        assert!(!Period::Today.contains(now - Duration::days(1), now));

        assert!(Period::Week.contains(now - Duration::days(6), now));
        assert!(!Period::Week.contains(now - Duration::days(7), now));

        assert!(Period::Month.contains(at(3, 1), now));
        assert!(!Period::Month.contains(at(2, 29), now));

        assert!(Period::AllTime.contains(at(1, 1), now));
        assert!(!Period::AllTime.contains(now + Duration::days(1), now));
    }

    #[test]
    fn test_period_from_str() {
        assert_eq!("weekly".parse::<Period>().unwrap(), Period::Week);
        assert_eq!("ALL".parse::<Period>().unwrap(), Period::AllTime);

        match "yearly".parse::<Period>() {
            Err(ValidationError::InvalidFormat { field, .. }) => assert_eq!(field, "period"),
            other => panic!("expected InvalidFormat, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_period_maps_to_validation_api_error() {
        let err = "fortnight".parse::<Period>().unwrap_err();
        let api: ApiError = CoreError::from(err).into();
        assert_eq!(api.code, ErrorCode::ValidationError);
        assert!(api.message.contains("period"));
    }

    #[test]
    fn test_sales_summary_amounts() {
        let mut ledger = flat_ledger();
        let paid = record(&mut ledger, at(3, 9), &[("Rice", 1, 50)]);
        let partial = record(&mut ledger, at(3, 5), &[("Oil", 1, 20)]);
        record(&mut ledger, at(2, 20), &[("Eggs", 1, 30)]);

        ledger
            .record_payment(&paid, &PaymentUpdate::new(pesos(50), None))
            .unwrap();
        ledger
            .record_payment(&partial, &PaymentUpdate::new(pesos(5), None))
            .unwrap();

        let month = sales_summary(&ledger, Period::Month, at(3, 10));
        assert_eq!(month.transactions, 2);
        assert_eq!(month.gross_sales, pesos(70));
        assert_eq!(month.collected, pesos(55));
        assert_eq!(month.outstanding, pesos(15));

        let all = sales_summary(&ledger, Period::AllTime, at(3, 10));
        assert_eq!(all.transactions, 3);
        assert_eq!(all.outstanding, pesos(45));

        let today = sales_summary(&ledger, Period::Today, at(3, 10));
        assert_eq!(today.transactions, 0);
        assert_eq!(today.gross_sales, Money::zero());
    }

    #[test]
    fn test_dashboard_snapshot() {
        let mut catalog = Catalog::new();
        catalog
            .add_product(&ProductInput::new("Coffee", pesos(13), 50))
            .unwrap();
        catalog
            .add_product(&ProductInput::new("Pastries", pesos(4), 0))
            .unwrap();
        catalog
            .add_product(&ProductInput::new("Tea", pesos(9), 8))
            .unwrap();

        let mut ledger = flat_ledger();
        record(&mut ledger, at(3, 9), &[("Coffee", 2, 13)]);

        let dashboard = DashboardSummary::build(&catalog, &ledger, at(3, 10));
        assert_eq!(dashboard.inventory.total, 3);
        assert_eq!(dashboard.inventory.low_stock, 1);
        assert_eq!(dashboard.inventory.out_of_stock, 1);

        let alerts: Vec<&str> = dashboard.low_stock_alerts.iter().map(|p| p.name()).collect();
        assert_eq!(alerts, vec!["Pastries", "Tea"]);

        assert_eq!(dashboard.ledger.unpaid, 1);
        assert_eq!(dashboard.ledger.pending_amount, pesos(26));
        assert_eq!(dashboard.best_sellers[0].name, "Coffee");
        assert_eq!(dashboard.weekly_sales.gross_sales, pesos(26));
        assert_eq!(dashboard.monthly_sales.transactions, 1);
    }
}
