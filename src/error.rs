//! Custom error types for tallybook
//!
//! This module defines the error hierarchy for the crate using thiserror
//! for ergonomic error definitions.

use std::fmt;

use thiserror::Error;

/// The main error type for tallybook operations
#[derive(Error, Debug)]
pub enum Error {
    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// A stored or snapshot document could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// Storage backend errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl Error {
    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for income streams
    pub fn income_stream_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Income stream",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for recurring payments
    pub fn recurring_payment_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Recurring payment",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for savings entries
    pub fn savings_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Savings entry",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a parse error
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

// User input that fails to parse is rejected as a validation error before
// it can reach the store

impl From<crate::models::money::MoneyParseError> for Error {
    fn from(err: crate::models::money::MoneyParseError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<crate::models::month::MonthParseError> for Error {
    fn from(err: crate::models::month::MonthParseError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Result type alias for tallybook operations
pub type Result<T> = std::result::Result<T, Error>;

/// A non-fatal write-through failure.
///
/// Raised when an in-memory mutation succeeded but the storage backend
/// failed to persist it. The in-memory state stays authoritative for the
/// session; callers drain these from the store and surface them to the user.
#[derive(Debug, Clone)]
pub struct PersistenceWarning {
    /// The container key whose write-through failed
    pub container: &'static str,
    /// Human-readable failure detail
    pub detail: String,
}

impl PersistenceWarning {
    pub fn new(container: &'static str, detail: impl Into<String>) -> Self {
        Self {
            container,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for PersistenceWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to persist '{}': {}", self.container, self.detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Validation("amount cannot be negative".into());
        assert_eq!(
            err.to_string(),
            "Validation error: amount cannot be negative"
        );
    }

    #[test]
    fn test_not_found_error() {
        let err = Error::transaction_not_found("txn-12345678");
        assert_eq!(err.to_string(), "Transaction not found: txn-12345678");
        assert!(err.is_not_found());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Storage(_)));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: Error = json_err.into();
        assert!(err.is_parse());
    }

    #[test]
    fn test_bad_input_becomes_validation_error() {
        let money_err = crate::models::Money::parse("abc").unwrap_err();
        let err: Error = money_err.into();
        assert!(err.is_validation());

        let month_err = crate::models::MonthKey::parse("2025-13").unwrap_err();
        let err: Error = month_err.into();
        assert!(err.is_validation());
    }

    #[test]
    fn test_persistence_warning_display() {
        let warning = PersistenceWarning::new("savings", "disk full");
        assert_eq!(
            warning.to_string(),
            "failed to persist 'savings': disk full"
        );
    }
}
