//! # Engine Errors
//!
//! Configuration failures plus the serializable error the UI receives.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Tindahan POS                           │
//! │                                                                         │
//! │  Catalog / Ledger ─── CoreError::ProductNotFound ──┐                    │
//! │                                                    │                    │
//! │  Catalog / Ledger ─── CoreError::Validation ───────┼──► ApiError ──► UI │
//! │                                                    │                    │
//! │  StoreConfig::load ── ConfigError::Parse ──────────┘                    │
//! │                                                                         │
//! │  try {                                                                  │
//! │    await invoke('record_payment', { id, update })                       │
//! │  } catch (e) {                                                          │
//! │    // e.code = "VALIDATION_ERROR"                                       │
//! │    // e.message = "amount ₱50.00 exceeds total ₱42.28"                 │
//! │  }                                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use thiserror::Error;
use ts_rs::TS;

use tindahan_core::CoreError;

// =============================================================================
// Configuration Errors
// =============================================================================

/// Failures while loading, validating or saving `store.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Reading or writing the file failed.
    #[error("Config I/O failed: {0}")]
    Io(String),

    /// The file is not valid TOML for a store config.
    #[error("Failed to parse config: {0}")]
    Parse(String),

    /// The config could not be written out as TOML.
    #[error("Failed to serialize config: {0}")]
    Serialize(String),

    /// A value is present but unusable.
    #[error("Invalid config: {0}")]
    Invalid(String),

    /// No path was given and the platform has no config directory.
    #[error("No config path available")]
    NoConfigPath,
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err.to_string())
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::Serialize(err.to_string())
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// API Error
// =============================================================================

/// What the frontend receives when an operation fails.
///
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: 550e8400-e29b-41d4-a716-446655440000"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// No product or receipt with that id
    NotFound,

    /// Input rejected; nothing was changed
    ValidationError,

    /// Config or other failure the user cannot fix from the form
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", &id),
            CoreError::TransactionNotFound(id) => ApiError::not_found("Transaction", &id),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Invalid(reason) => ApiError::validation(reason),
            other => {
                // Log the detail but keep paths out of the UI
                tracing::error!("Config error: {}", other);
                ApiError::internal("Store configuration could not be loaded")
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use tindahan_core::{Money, ValidationError};

    #[test]
    fn test_core_not_found_maps_to_not_found() {
        let api: ApiError = CoreError::ProductNotFound("abc".into()).into();
        assert_eq!(api.code, ErrorCode::NotFound);
        assert_eq!(api.message, "Product not found: abc");

        let api: ApiError = CoreError::TransactionNotFound("xyz".into()).into();
        assert_eq!(api.message, "Transaction not found: xyz");
    }

    #[test]
    fn test_validation_keeps_message() {
        let err = CoreError::Validation(ValidationError::ExceedsTotal {
            amount: Money::from_cents(5000),
            total: Money::from_cents(4228),
        });
        let expected = err.to_string();
        let api: ApiError = err.into();
        assert_eq!(api.code, ErrorCode::ValidationError);
        assert!(expected.contains(&api.message));
    }

    #[test]
    fn test_config_errors_hide_detail() {
        let api: ApiError = ConfigError::Parse("line 3: /home/me/store.toml".into()).into();
        assert_eq!(api.code, ErrorCode::Internal);
        assert!(!api.message.contains("/home"));

        let api: ApiError = ConfigError::Invalid("tax_rate_bps must be at most 10000".into()).into();
        assert_eq!(api.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_serializes_screaming_code() {
        let api = ApiError::not_found("Product", "abc");
        let json = serde_json::to_value(&api).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Product not found: abc");
    }
}
