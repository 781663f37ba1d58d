//! Income stream model
//!
//! Tracks money expected to arrive in a given month: salary, freelance
//! invoices, benefit payments. A month can hold any number of streams.

use serde::{Deserialize, Serialize};

use super::ids::IncomeStreamId;
use super::money::Money;
use super::month::MonthKey;

/// Validation errors for income streams
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IncomeValidationError {
    NegativeAmount,
}

impl std::fmt::Display for IncomeValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NegativeAmount => write!(f, "Income amount cannot be negative"),
        }
    }
}

impl std::error::Error for IncomeValidationError {}

/// A source of income for a given month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeStream {
    pub id: IncomeStreamId,
    pub month: MonthKey,
    /// Where the money comes from (employer, client, agency)
    #[serde(default)]
    pub source: String,
    pub amount: Money,
    #[serde(default)]
    pub description: String,
}

impl IncomeStream {
    /// Create a new income stream
    pub fn new(month: MonthKey, source: impl Into<String>, amount: Money) -> Self {
        Self {
            id: IncomeStreamId::new(),
            month,
            source: source.into(),
            amount,
            description: String::new(),
        }
    }

    /// Create an income stream with a description
    pub fn with_description(
        month: MonthKey,
        source: impl Into<String>,
        amount: Money,
        description: impl Into<String>,
    ) -> Self {
        let mut stream = Self::new(month, source, amount);
        stream.description = description.into();
        stream
    }

    /// Validate the income stream
    pub fn validate(&self) -> Result<(), IncomeValidationError> {
        if self.amount.is_negative() {
            return Err(IncomeValidationError::NegativeAmount);
        }
        Ok(())
    }
}
