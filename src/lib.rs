//! tallybook - Month-by-month personal finance tracking core
//!
//! This library provides the core of a personal finance tracker: typed
//! records for transactions, income streams, recurring payments, and
//! savings, a record store with JSON write-through persistence, and a pure
//! monthly summary over the store's contents. Rendering and input handling
//! are left to the embedding application.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `logging`: Tracing subscriber setup
//! - `models`: Core data models (transactions, income streams, recurring payments, savings)
//! - `storage`: Pluggable document storage backends
//! - `store`: The record store holding the four containers
//! - `summary`: Monthly filtering and totals
//!
//! # Example
//!
//! ```rust
//! use tallybook::models::{Money, MonthKey, Transaction, TransactionKind};
//! use tallybook::storage::MemoryBackend;
//! use tallybook::store::RecordStore;
//! use tallybook::summary::MonthlySummary;
//!
//! # fn main() -> tallybook::Result<()> {
//! let mut store = RecordStore::new(MemoryBackend::new());
//!
//! store.add_transaction(Transaction::new(
//!     chrono::NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
//!     "Groceries",
//!     Money::from_cents(4275),
//!     TransactionKind::Expense,
//! ))?;
//!
//! let summary = MonthlySummary::generate(&store, MonthKey::new(2024, 5)?);
//! assert_eq!(summary.total_expenses, Money::from_cents(4275));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod storage;
pub mod store;
pub mod summary;

pub use error::{Error, PersistenceWarning, Result};
pub use store::{RecordStore, Snapshot};
pub use summary::MonthlySummary;
