//! # tindahan-engine: Stateful Core of Tindahan POS
//!
//! Holds the store's canonical collections and exposes the operations and
//! projections the UI calls.
//!
//! ## Module Organization
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      tindahan-engine                                    │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐                   │
//! │  │   catalog    │  │    ledger    │  │   reports    │                   │
//! │  │  Catalog     │  │  Ledger      │  │  Dashboard   │                   │
//! │  │  add/update  │  │  record_*    │  │  best seller │                   │
//! │  │  search/sort │  │  search/     │  │  sales by    │                   │
//! │  │  stats       │  │  filter      │  │  period      │                   │
//! │  └──────┬───────┘  └──────┬───────┘  └──────────────┘                   │
//! │         └────────┬────────┘                                             │
//! │                  ▼                                                      │
//! │          ┌──────────────┐   ┌──────────────┐   ┌──────────────┐         │
//! │          │    state     │   │    config    │   │    error     │         │
//! │          │ StoreState   │   │ StoreConfig  │   │ ApiError     │         │
//! │          │ StoreEvent   │   │ store.toml   │   │ ConfigError  │         │
//! │          └──────────────┘   └──────────────┘   └──────────────┘         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use tindahan_core::{Money, ProductInput, StockStatus};
//! use tindahan_engine::Catalog;
//!
//! let mut catalog = Catalog::new();
//! let sugar = catalog
//!     .add_product(&ProductInput::new("Sugar", Money::from_cents(250), 5))
//!     .unwrap();
//! assert_eq!(sugar.status(), StockStatus::LowStock);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod config;
pub mod error;
pub mod ledger;
pub mod reports;
pub mod seed;
pub mod state;
pub mod telemetry;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::{sort_products, Catalog};
pub use config::StoreConfig;
pub use error::{ApiError, ConfigError, ConfigResult, ErrorCode};
pub use ledger::Ledger;
pub use reports::{best_sellers, sales_summary, DashboardSummary, Period, ProductSales, SalesSummary};
pub use state::{StoreEvent, StoreState};
