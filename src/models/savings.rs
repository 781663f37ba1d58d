//! Savings entry model
//!
//! One amount set aside per month. The store enforces the one-entry-per-month
//! rule; this module only defines the record itself.

use serde::{Deserialize, Serialize};

use super::ids::SavingsId;
use super::money::Money;
use super::month::MonthKey;

/// Validation errors for savings entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SavingsValidationError {
    NegativeAmount,
}

impl std::fmt::Display for SavingsValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NegativeAmount => write!(f, "Savings amount cannot be negative"),
        }
    }
}

impl std::error::Error for SavingsValidationError {}

/// Money put aside in a given month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsEntry {
    pub id: SavingsId,
    pub month: MonthKey,
    pub amount: Money,
    #[serde(default)]
    pub description: String,
}

impl SavingsEntry {
    /// Create a new savings entry
    pub fn new(month: MonthKey, amount: Money) -> Self {
        Self {
            id: SavingsId::new(),
            month,
            amount,
            description: String::new(),
        }
    }

    /// Create a savings entry with a description
    pub fn with_description(
        month: MonthKey,
        amount: Money,
        description: impl Into<String>,
    ) -> Self {
        let mut entry = Self::new(month, amount);
        entry.description = description.into();
        entry
    }

    /// Validate the savings entry
    pub fn validate(&self) -> Result<(), SavingsValidationError> {
        if self.amount.is_negative() {
            return Err(SavingsValidationError::NegativeAmount);
        }
        Ok(())
    }
}
