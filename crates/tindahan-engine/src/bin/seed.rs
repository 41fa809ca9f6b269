//! # Demo Store Seeder
//!
//! Builds the demo store and prints its dashboard as JSON.
//!
//! ## Usage
//! ```bash
//! # Default config location
//! cargo run -p tindahan-engine --bin seed
//!
//! # Explicit config file
//! cargo run -p tindahan-engine --bin seed -- --config ./store.toml
//! ```

use std::env;
use std::path::PathBuf;

use chrono::Utc;
use tracing::info;

use tindahan_engine::config::StoreConfig;
use tindahan_engine::seed::demo_store;
use tindahan_engine::telemetry::init_tracing;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut config_path: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Tindahan POS Demo Seeder");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --config <PATH>  Store config file (default: platform config dir)");
                println!("  -h, --help           Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    init_tracing();

    let config = StoreConfig::load(config_path)?;
    let store = demo_store(&config)?;

    let dashboard = store.dashboard(Utc::now());
    info!(
        products = dashboard.inventory.total,
        low_stock = dashboard.inventory.low_stock,
        out_of_stock = dashboard.inventory.out_of_stock,
        revenue = %config.format_currency(dashboard.ledger.total_revenue),
        pending = %config.format_currency(dashboard.ledger.pending_amount),
        "Dashboard ready"
    );

    println!("{}", serde_json::to_string_pretty(&dashboard)?);
    Ok(())
}
