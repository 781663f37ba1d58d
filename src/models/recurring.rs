//! Recurring payment model
//!
//! Standing obligations like rent or subscriptions. Each payment carries a
//! date range; the monthly rollup only asks whether a payment is active in
//! a month, not on which exact days it lands.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::RecurringPaymentId;
use super::money::Money;
use super::month::MonthKey;

/// How often a recurring payment lands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    #[default]
    Monthly,
    Yearly,
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Daily => write!(f, "Daily"),
            Self::Weekly => write!(f, "Weekly"),
            Self::Monthly => write!(f, "Monthly"),
            Self::Yearly => write!(f, "Yearly"),
        }
    }
}

/// A standing payment obligation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringPayment {
    /// Unique identifier
    pub id: RecurringPaymentId,

    /// What the payment is for
    #[serde(default)]
    pub description: String,

    /// Amount charged each occurrence
    pub amount: Money,

    /// First date the payment applies
    pub start_date: NaiveDate,

    /// Last date the payment applies; None means it continues indefinitely
    pub end_date: Option<NaiveDate>,

    /// How often the payment lands
    #[serde(default)]
    pub frequency: Frequency,

    /// Day of the month the payment lands (1-31), for display and reminders
    pub day_of_month: Option<u32>,
}

impl RecurringPayment {
    /// Create a new open-ended recurring payment
    pub fn new(
        description: impl Into<String>,
        amount: Money,
        start_date: NaiveDate,
        frequency: Frequency,
    ) -> Self {
        Self {
            id: RecurringPaymentId::new(),
            description: description.into(),
            amount,
            start_date,
            end_date: None,
            frequency,
            day_of_month: None,
        }
    }

    /// Check whether this payment is active in the given month
    ///
    /// A payment counts for a month only once it has fully started: its
    /// start date must be on or before the first day of the month. It
    /// stops counting after the month containing its end date.
    pub fn active_in(&self, month: MonthKey) -> bool {
        let month_start = month.first_day();

        if self.start_date > month_start {
            return false;
        }

        match self.end_date {
            Some(end) => end >= month_start,
            None => true,
        }
    }

    /// Check if this payment has an end date
    pub fn is_open_ended(&self) -> bool {
        self.end_date.is_none()
    }

    /// Validate the recurring payment
    pub fn validate(&self) -> Result<(), RecurringValidationError> {
        if self.amount.is_negative() {
            return Err(RecurringValidationError::NegativeAmount);
        }

        if let Some(day) = self.day_of_month {
            if !(1..=31).contains(&day) {
                return Err(RecurringValidationError::InvalidDayOfMonth(day));
            }
        }

        Ok(())
    }
}

impl fmt::Display for RecurringPayment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.description, self.amount, self.frequency)
    }
}

/// Validation errors for recurring payments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecurringValidationError {
    NegativeAmount,
    InvalidDayOfMonth(u32),
}

impl fmt::Display for RecurringValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeAmount => write!(f, "Payment amount cannot be negative"),
            Self::InvalidDayOfMonth(day) => {
                write!(f, "Day of month must be between 1 and 31, got {}", day)
            }
        }
    }
}

impl std::error::Error for RecurringValidationError {}
