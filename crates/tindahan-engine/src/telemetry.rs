//! # Tracing Setup
//!
//! ## Log Levels
//! - `RUST_LOG=debug` - Show debug messages
//! - `RUST_LOG=tindahan=trace` - Show trace for tindahan crates only
//! - Default: INFO, with DEBUG for tindahan crates

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or unparseable.
pub const DEFAULT_FILTER: &str = "info,tindahan=debug";

/// Installs the global fmt subscriber.
///
/// Call once from a binary's `main`. A second call (or a subscriber set by
/// a test harness) is left in place.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
