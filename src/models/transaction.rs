//! Transaction model
//!
//! Represents one-off money movements, with support for shared costs where
//! part of the amount is owed back by someone else.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::TransactionId;
use super::money::Money;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money going out
    #[default]
    Expense,
    /// Money coming in outside of regular income streams
    Income,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expense => write!(f, "Expense"),
            Self::Income => write!(f, "Income"),
        }
    }
}

/// A one-off financial transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// Transaction date
    pub date: NaiveDate,

    /// What the money was for
    #[serde(default)]
    pub description: String,

    /// The full amount paid or received
    pub original_amount: Money,

    /// Portion of the original amount someone else owes back
    #[serde(default)]
    pub amount_owed: Money,

    /// Effective cost after reimbursement, always original_amount - amount_owed.
    /// Stored for readability of the persisted document but recomputed on
    /// every write, never trusted as input.
    #[serde(default)]
    pub final_amount: Money,

    /// Whether this is money out or money in
    #[serde(default)]
    pub kind: TransactionKind,

    /// Free-form category label
    #[serde(default)]
    pub category: String,

    /// Who owes the reimbursement, if anyone
    pub owed_by: Option<String>,
}

impl Transaction {
    /// Create a new transaction with no shared portion
    pub fn new(
        date: NaiveDate,
        description: impl Into<String>,
        original_amount: Money,
        kind: TransactionKind,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            date,
            description: description.into(),
            original_amount,
            amount_owed: Money::zero(),
            final_amount: original_amount,
            kind,
            category: String::new(),
            owed_by: None,
        }
    }

    /// Create a transaction with all common fields
    pub fn with_details(
        date: NaiveDate,
        description: impl Into<String>,
        original_amount: Money,
        amount_owed: Money,
        owed_by: Option<String>,
        kind: TransactionKind,
        category: impl Into<String>,
    ) -> Self {
        let mut txn = Self::new(date, description, original_amount, kind);
        txn.amount_owed = amount_owed;
        txn.owed_by = owed_by;
        txn.category = category.into();
        txn.recompute_final_amount();
        txn
    }

    /// Check if this is an expense
    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Check if this is incidental income
    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    /// Check if part of this transaction is owed back
    pub fn is_shared(&self) -> bool {
        !self.amount_owed.is_zero()
    }

    /// Recompute the effective cost from the entered amounts
    ///
    /// The result may be negative when more is owed back than was paid;
    /// that state is kept visible rather than clamped.
    pub fn recompute_final_amount(&mut self) {
        self.final_amount = self.original_amount - self.amount_owed;
    }

    /// Validate the transaction
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.original_amount.is_negative() {
            return Err(TransactionValidationError::NegativeOriginalAmount(
                self.original_amount,
            ));
        }

        if self.amount_owed.is_negative() {
            return Err(TransactionValidationError::NegativeAmountOwed(
                self.amount_owed,
            ));
        }

        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d"),
            self.description,
            self.final_amount
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    NegativeOriginalAmount(Money),
    NegativeAmountOwed(Money),
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeOriginalAmount(amount) => {
                write!(f, "Original amount cannot be negative: {}", amount)
            }
            Self::NegativeAmountOwed(amount) => {
                write!(f, "Amount owed cannot be negative: {}", amount)
            }
        }
    }
}

impl std::error::Error for TransactionValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    #[test]
    fn test_new_transaction() {
        let txn = Transaction::new(
            test_date(),
            "Groceries",
            Money::from_cents(4275),
            TransactionKind::Expense,
        );

        assert_eq!(txn.date, test_date());
        assert_eq!(txn.description, "Groceries");
        assert_eq!(txn.original_amount, Money::from_cents(4275));
        assert_eq!(txn.amount_owed, Money::zero());
        assert_eq!(txn.final_amount, Money::from_cents(4275));
        assert!(txn.is_expense());
        assert!(!txn.is_shared());
    }

    #[test]
    fn test_shared_cost() {
        let txn = Transaction::with_details(
            test_date(),
            "Dinner for two",
            Money::from_cents(6000),
            Money::from_cents(3000),
            Some("Sam".to_string()),
            TransactionKind::Expense,
            "dining",
        );

        assert!(txn.is_shared());
        assert_eq!(txn.final_amount, Money::from_cents(3000));
        assert_eq!(txn.owed_by.as_deref(), Some("Sam"));
    }

    #[test]
    fn test_recompute_final_amount() {
        let mut txn = Transaction::new(
            test_date(),
            "Concert tickets",
            Money::from_cents(9000),
            TransactionKind::Expense,
        );

        txn.amount_owed = Money::from_cents(4500);
        txn.recompute_final_amount();
        assert_eq!(txn.final_amount, Money::from_cents(4500));
    }

    #[test]
    fn test_owed_can_exceed_original() {
        let txn = Transaction::with_details(
            test_date(),
            "Group booking deposit",
            Money::from_cents(2000),
            Money::from_cents(5000),
            Some("Alex".to_string()),
            TransactionKind::Expense,
            "travel",
        );

        // Kept as-is so the surplus owed stays visible
        assert_eq!(txn.final_amount, Money::from_cents(-3000));
        assert!(txn.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_negative_original() {
        let txn = Transaction::new(
            test_date(),
            "Refund entered wrong",
            Money::from_cents(-500),
            TransactionKind::Expense,
        );

        assert_eq!(
            txn.validate(),
            Err(TransactionValidationError::NegativeOriginalAmount(
                Money::from_cents(-500)
            ))
        );
    }

    #[test]
    fn test_validate_rejects_negative_owed() {
        let mut txn = Transaction::new(
            test_date(),
            "Groceries",
            Money::from_cents(4275),
            TransactionKind::Expense,
        );
        txn.amount_owed = Money::from_cents(-100);

        assert_eq!(
            txn.validate(),
            Err(TransactionValidationError::NegativeAmountOwed(
                Money::from_cents(-100)
            ))
        );
    }

    #[test]
    fn test_kind_serialization_is_lowercase() {
        let json = serde_json::to_string(&TransactionKind::Expense).unwrap();
        assert_eq!(json, "\"expense\"");

        let kind: TransactionKind = serde_json::from_str("\"income\"").unwrap();
        assert_eq!(kind, TransactionKind::Income);
    }

    #[test]
    fn test_serialization() {
        let txn = Transaction::with_details(
            test_date(),
            "Dinner for two",
            Money::from_cents(6000),
            Money::from_cents(3000),
            Some("Sam".to_string()),
            TransactionKind::Expense,
            "dining",
        );

        let json = serde_json::to_string(&txn).unwrap();
        let deserialized: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(txn, deserialized);
    }

    #[test]
    fn test_display() {
        let mut txn = Transaction::new(
            test_date(),
            "Groceries",
            Money::from_cents(4275),
            TransactionKind::Expense,
        );
        txn.recompute_final_amount();

        assert_eq!(format!("{}", txn), "2025-01-15 Groceries $42.75");
    }
}
