//! Storage layer for tallybook
//!
//! The record store delegates persistence to a backend that saves and loads
//! whole documents addressed by container key. Two backends ship with the
//! crate: JSON files with atomic writes, and an in-memory map for tests and
//! ephemeral sessions.

pub mod file;
pub mod memory;

pub use file::JsonFileBackend;
pub use memory::MemoryBackend;

use crate::error::Result;

/// Document key for the transactions container
pub const KEY_TRANSACTIONS: &str = "transactions";

/// Document key for the income streams container
pub const KEY_INCOME_STREAMS: &str = "incomeStreams";

/// Document key for the recurring payments container
pub const KEY_RECURRING_PAYMENTS: &str = "recurringPayments";

/// Document key for the savings container
pub const KEY_SAVINGS: &str = "savings";

/// A place to persist container documents
///
/// Implementations store whole text documents addressed by key and replace
/// them wholesale on save. The store assumes nothing about where the text
/// lands or how it is encoded at rest.
pub trait StorageBackend {
    /// Persist a document under the given key, replacing any previous version
    fn save(&self, key: &str, document: &str) -> Result<()>;

    /// Load the document stored under the given key, or None if absent
    fn load(&self, key: &str) -> Result<Option<String>>;
}
