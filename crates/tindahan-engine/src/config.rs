//! # Store Configuration
//!
//! Settings the engines and the UI read at startup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                            │
//! │     TINDAHAN_STORE_NAME="Aling Nena's"                                  │
//! │     TINDAHAN_TAX_RATE_BPS=1200                                          │
//! │                                                                         │
//! │  2. TOML Config File                                                    │
//! │     ~/.config/tindahan-pos/store.toml (Linux)                           │
//! │     ~/Library/Application Support/ph.Tindahan.tindahan-pos/store.toml   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                    │
//! │     PHP (₱), 12% VAT, RCP-001 numbering                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # store.toml
//! store_name = "Sari-Sari Store"
//! currency_code = "PHP"
//! currency_symbol = "₱"
//! currency_decimals = 2
//! tax_rate_bps = 1200
//! receipt_prefix = "RCP"
//! event_capacity = 64
//! ```
//!
//! ## Thread Safety
//! Configuration is read-only after loading, so no lock is needed.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};
use ts_rs::TS;

use tindahan_core::{Money, TaxRate, DEFAULT_TAX_RATE_BPS};

use crate::error::{ConfigError, ConfigResult};
use crate::ledger::DEFAULT_RECEIPT_PREFIX;

/// Longest receipt prefix accepted; keeps receipt numbers printable.
const MAX_RECEIPT_PREFIX_LEN: usize = 10;

/// Store-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct StoreConfig {
    /// Store name (displayed on receipts)
    pub store_name: String,

    /// Currency code (ISO 4217)
    pub currency_code: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for currency
    pub currency_decimals: u8,

    /// Sales tax in basis points, e.g. 1200 = 12%
    pub tax_rate_bps: u32,

    /// Generated receipt numbers look like `{prefix}-001`
    pub receipt_prefix: String,

    /// Buffered change events per subscriber before the slowest lags
    pub event_capacity: usize,
}

impl Default for StoreConfig {
    /// Development defaults: a peso store with 12% VAT.
    fn default() -> Self {
        StoreConfig {
            store_name: "Tindahan POS Dev Store".to_string(),
            currency_code: "PHP".to_string(),
            currency_symbol: "₱".to_string(),
            currency_decimals: 2,
            tax_rate_bps: DEFAULT_TAX_RATE_BPS,
            receipt_prefix: DEFAULT_RECEIPT_PREFIX.to_string(),
            event_capacity: 64,
        }
    }
}

impl StoreConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`store.toml`), if it exists
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading store config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load store config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file, creating the directory if needed.
    pub fn save(&self, config_path: Option<PathBuf>) -> ConfigResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or(ConfigError::NoConfigPath)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Store config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.tax_rate_bps > 10_000 {
            return Err(ConfigError::Invalid(format!(
                "tax_rate_bps must be at most 10000, got {}",
                self.tax_rate_bps
            )));
        }

        let prefix = self.receipt_prefix.trim();
        if prefix.is_empty() {
            return Err(ConfigError::Invalid("receipt_prefix must not be empty".into()));
        }
        if prefix.chars().count() > MAX_RECEIPT_PREFIX_LEN {
            return Err(ConfigError::Invalid(format!(
                "receipt_prefix must be at most {} characters",
                MAX_RECEIPT_PREFIX_LEN
            )));
        }

        if self.event_capacity == 0 {
            return Err(ConfigError::Invalid(
                "event_capacity must be greater than 0".into(),
            ));
        }

        if self.currency_decimals > 4 {
            return Err(ConfigError::Invalid(format!(
                "currency_decimals must be at most 4, got {}",
                self.currency_decimals
            )));
        }

        Ok(())
    }

    /// Applies `TINDAHAN_*` overrides read through `lookup`.
    ///
    /// `load` passes the process environment; tests pass a map.
    /// Unparseable numbers are logged and ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup("TINDAHAN_STORE_NAME") {
            debug!(store_name = %name, "Overriding store name from environment");
            self.store_name = name;
        }

        if let Some(code) = lookup("TINDAHAN_CURRENCY_CODE") {
            self.currency_code = code;
        }

        if let Some(symbol) = lookup("TINDAHAN_CURRENCY_SYMBOL") {
            self.currency_symbol = symbol;
        }

        if let Some(bps) = lookup("TINDAHAN_TAX_RATE_BPS") {
            match bps.trim().parse::<u32>() {
                Ok(parsed) => {
                    debug!(tax_rate_bps = parsed, "Overriding tax rate from environment");
                    self.tax_rate_bps = parsed;
                }
                Err(_) => warn!(value = %bps, "Ignoring invalid TINDAHAN_TAX_RATE_BPS"),
            }
        }

        if let Some(prefix) = lookup("TINDAHAN_RECEIPT_PREFIX") {
            self.receipt_prefix = prefix;
        }

        if let Some(capacity) = lookup("TINDAHAN_EVENT_CAPACITY") {
            match capacity.trim().parse::<usize>() {
                Ok(parsed) => self.event_capacity = parsed,
                Err(_) => warn!(value = %capacity, "Ignoring invalid TINDAHAN_EVENT_CAPACITY"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("ph", "Tindahan", "tindahan-pos")
            .map(|dirs| dirs.config_dir().join("store.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// The configured tax rate.
    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::from_bps(self.tax_rate_bps)
    }

    /// The receipt prefix without surrounding whitespace.
    pub fn receipt_prefix(&self) -> &str {
        self.receipt_prefix.trim()
    }

    /// Formats an amount with the configured symbol.
    ///
    /// `Money` always holds centavos; `currency_decimals` only sets how
    /// many digits are shown. Fewer than two rounds half away from zero,
    /// more than two pads with zeros.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = StoreConfig::default();
    /// assert_eq!(config.format_currency(Money::from_cents(1234)), "₱12.34");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let decimals = self.currency_decimals as u32;
        let cents = (amount.cents() as i128).abs();

        // Magnitude in units of 10^-decimals
        let scaled = if decimals >= 2 {
            cents * 10_i128.pow(decimals - 2)
        } else {
            let step = 10_i128.pow(2 - decimals);
            (cents + step / 2) / step
        };
        let divisor = 10_i128.pow(decimals);
        let whole = scaled / divisor;
        let frac = scaled % divisor;

        format!(
            "{}{}{}",
            if amount.is_negative() && scaled != 0 { "-" } else { "" },
            self.currency_symbol,
            if decimals > 0 {
                format!("{}.{:0width$}", whole, frac, width = decimals as usize)
            } else {
                whole.to_string()
            }
        )
    }
}
