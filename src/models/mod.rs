//! Core data models for tallybook
//!
//! This module contains all the data structures that represent the tracking
//! domain: transactions, income streams, recurring payments, and savings.

pub mod ids;
pub mod income;
pub mod money;
pub mod month;
pub mod recurring;
pub mod savings;
pub mod transaction;

pub use ids::{IncomeStreamId, RecurringPaymentId, SavingsId, TransactionId};
pub use income::IncomeStream;
pub use money::Money;
pub use month::MonthKey;
pub use recurring::{Frequency, RecurringPayment};
pub use savings::SavingsEntry;
pub use transaction::{Transaction, TransactionKind};
