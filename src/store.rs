//! The record store
//!
//! Single source of truth for the four record containers: transactions,
//! income streams, recurring payments, and savings. Every mutation validates
//! first, applies in memory, then writes the affected container through to
//! the storage backend. A failed write-through never rolls back the
//! in-memory change; it is logged and queued as a warning for the caller
//! to surface.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, PersistenceWarning, Result};
use crate::models::{
    IncomeStream, IncomeStreamId, RecurringPayment, RecurringPaymentId, SavingsEntry, SavingsId,
    Transaction, TransactionId,
};
use crate::storage::{
    StorageBackend, KEY_INCOME_STREAMS, KEY_RECURRING_PAYMENTS, KEY_SAVINGS, KEY_TRANSACTIONS,
};

/// Serializable transactions document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct TransactionsDocument {
    #[serde(default)]
    transactions: Vec<Transaction>,
}

/// Serializable income streams document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct IncomeStreamsDocument {
    #[serde(default)]
    income_streams: Vec<IncomeStream>,
}

/// Serializable recurring payments document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RecurringPaymentsDocument {
    #[serde(default)]
    recurring_payments: Vec<RecurringPayment>,
}

/// Serializable savings document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SavingsDocument {
    #[serde(default)]
    savings: Vec<SavingsEntry>,
}

/// A full copy of the store's contents
///
/// Snapshots are plain data: taking one never touches the backend, and
/// restoring one swaps all four containers at once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub income_streams: Vec<IncomeStream>,
    #[serde(default)]
    pub recurring_payments: Vec<RecurringPayment>,
    #[serde(default)]
    pub savings: Vec<SavingsEntry>,
}

impl Snapshot {
    /// Serialize the snapshot as a JSON document
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a snapshot from a JSON document
    pub fn from_json(document: &str) -> Result<Self> {
        Ok(serde_json::from_str(document)?)
    }
}

/// Holds the four record containers and writes every mutation through
/// to its storage backend
pub struct RecordStore {
    backend: Box<dyn StorageBackend>,
    transactions: Vec<Transaction>,
    income_streams: Vec<IncomeStream>,
    recurring_payments: Vec<RecurringPayment>,
    savings: Vec<SavingsEntry>,
    warnings: Vec<PersistenceWarning>,
}

impl RecordStore {
    /// Create an empty store on top of the given backend
    pub fn new(backend: impl StorageBackend + 'static) -> Self {
        Self {
            backend: Box::new(backend),
            transactions: Vec::new(),
            income_streams: Vec::new(),
            recurring_payments: Vec::new(),
            savings: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Create a store and populate it from the backend's documents
    pub fn open(backend: impl StorageBackend + 'static) -> Self {
        let mut store = Self::new(backend);
        store.load_all();
        store
    }

    /// Load all four containers from the backend
    ///
    /// Containers load independently: a missing or unreadable document
    /// leaves that container empty and does not stop the others.
    pub fn load_all(&mut self) {
        let backend = self.backend.as_ref();

        self.transactions =
            load_container::<TransactionsDocument>(backend, KEY_TRANSACTIONS).transactions;
        self.income_streams =
            load_container::<IncomeStreamsDocument>(backend, KEY_INCOME_STREAMS).income_streams;
        self.recurring_payments =
            load_container::<RecurringPaymentsDocument>(backend, KEY_RECURRING_PAYMENTS)
                .recurring_payments;
        self.savings = load_container::<SavingsDocument>(backend, KEY_SAVINGS).savings;
    }

    /// Get all transactions
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Get all income streams
    pub fn income_streams(&self) -> &[IncomeStream] {
        &self.income_streams
    }

    /// Get all recurring payments
    pub fn recurring_payments(&self) -> &[RecurringPayment] {
        &self.recurring_payments
    }

    /// Get all savings entries
    pub fn savings(&self) -> &[SavingsEntry] {
        &self.savings
    }

    // Transactions

    /// Add a transaction
    ///
    /// The effective cost is recomputed before storing, so callers never
    /// control `final_amount` directly.
    pub fn add_transaction(&mut self, mut txn: Transaction) -> Result<Transaction> {
        txn.validate()
            .map_err(|e| Error::Validation(e.to_string()))?;
        txn.recompute_final_amount();

        self.transactions.push(txn.clone());
        self.persist_transactions();
        Ok(txn)
    }

    /// Replace the transaction with the given id wholesale
    pub fn update_transaction(
        &mut self,
        id: TransactionId,
        mut txn: Transaction,
    ) -> Result<Transaction> {
        txn.validate()
            .map_err(|e| Error::Validation(e.to_string()))?;

        let index = match self.transactions.iter().position(|t| t.id == id) {
            Some(index) => index,
            None => return Err(Error::transaction_not_found(id.to_string())),
        };

        txn.id = id;
        txn.recompute_final_amount();
        self.transactions[index] = txn.clone();
        self.persist_transactions();
        Ok(txn)
    }

    /// Remove the transaction with the given id, if present
    pub fn remove_transaction(&mut self, id: TransactionId) -> bool {
        let before = self.transactions.len();
        self.transactions.retain(|t| t.id != id);
        let removed = self.transactions.len() < before;

        if removed {
            self.persist_transactions();
        } else {
            debug!("No transaction {} to remove", id);
        }
        removed
    }

    // Income streams

    /// Add an income stream; a month can hold any number of them
    pub fn add_income_stream(&mut self, stream: IncomeStream) -> Result<IncomeStream> {
        stream
            .validate()
            .map_err(|e| Error::Validation(e.to_string()))?;

        self.income_streams.push(stream.clone());
        self.persist_income_streams();
        Ok(stream)
    }

    /// Replace the income stream with the given id wholesale
    pub fn update_income_stream(
        &mut self,
        id: IncomeStreamId,
        mut stream: IncomeStream,
    ) -> Result<IncomeStream> {
        stream
            .validate()
            .map_err(|e| Error::Validation(e.to_string()))?;

        let index = match self.income_streams.iter().position(|s| s.id == id) {
            Some(index) => index,
            None => return Err(Error::income_stream_not_found(id.to_string())),
        };

        stream.id = id;
        self.income_streams[index] = stream.clone();
        self.persist_income_streams();
        Ok(stream)
    }

    /// Remove the income stream with the given id, if present
    pub fn remove_income_stream(&mut self, id: IncomeStreamId) -> bool {
        let before = self.income_streams.len();
        self.income_streams.retain(|s| s.id != id);
        let removed = self.income_streams.len() < before;

        if removed {
            self.persist_income_streams();
        } else {
            debug!("No income stream {} to remove", id);
        }
        removed
    }

    // Recurring payments

    /// Add a recurring payment rule
    pub fn add_recurring_payment(
        &mut self,
        payment: RecurringPayment,
    ) -> Result<RecurringPayment> {
        payment
            .validate()
            .map_err(|e| Error::Validation(e.to_string()))?;

        self.recurring_payments.push(payment.clone());
        self.persist_recurring_payments();
        Ok(payment)
    }

    /// Replace the recurring payment with the given id wholesale
    pub fn update_recurring_payment(
        &mut self,
        id: RecurringPaymentId,
        mut payment: RecurringPayment,
    ) -> Result<RecurringPayment> {
        payment
            .validate()
            .map_err(|e| Error::Validation(e.to_string()))?;

        let index = match self.recurring_payments.iter().position(|p| p.id == id) {
            Some(index) => index,
            None => return Err(Error::recurring_payment_not_found(id.to_string())),
        };

        payment.id = id;
        self.recurring_payments[index] = payment.clone();
        self.persist_recurring_payments();
        Ok(payment)
    }

    /// Remove the recurring payment with the given id, if present
    pub fn remove_recurring_payment(&mut self, id: RecurringPaymentId) -> bool {
        let before = self.recurring_payments.len();
        self.recurring_payments.retain(|p| p.id != id);
        let removed = self.recurring_payments.len() < before;

        if removed {
            self.persist_recurring_payments();
        } else {
            debug!("No recurring payment {} to remove", id);
        }
        removed
    }

    // Savings

    /// Add a savings entry, replacing any existing entry for the same month
    pub fn add_savings(&mut self, entry: SavingsEntry) -> Result<SavingsEntry> {
        entry
            .validate()
            .map_err(|e| Error::Validation(e.to_string()))?;

        self.savings.retain(|s| s.month != entry.month);
        self.savings.push(entry.clone());
        self.persist_savings();
        Ok(entry)
    }

    /// Replace the savings entry with the given id wholesale
    ///
    /// If the replacement moves the entry to a month that already has one,
    /// the occupant is dropped so the month keeps a single entry.
    pub fn update_savings(
        &mut self,
        id: SavingsId,
        mut entry: SavingsEntry,
    ) -> Result<SavingsEntry> {
        entry
            .validate()
            .map_err(|e| Error::Validation(e.to_string()))?;

        if !self.savings.iter().any(|s| s.id == id) {
            return Err(Error::savings_not_found(id.to_string()));
        }

        entry.id = id;
        self.savings
            .retain(|s| s.id != id && s.month != entry.month);
        self.savings.push(entry.clone());
        self.persist_savings();
        Ok(entry)
    }

    /// Remove the savings entry with the given id, if present
    pub fn remove_savings(&mut self, id: SavingsId) -> bool {
        let before = self.savings.len();
        self.savings.retain(|s| s.id != id);
        let removed = self.savings.len() < before;

        if removed {
            self.persist_savings();
        } else {
            debug!("No savings entry {} to remove", id);
        }
        removed
    }

    // Snapshot and restore

    /// Copy the current contents of all four containers
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            transactions: self.transactions.clone(),
            income_streams: self.income_streams.clone(),
            recurring_payments: self.recurring_payments.clone(),
            savings: self.savings.clone(),
        }
    }

    /// Replace all four containers with the snapshot's contents
    pub fn restore(&mut self, snapshot: Snapshot) {
        self.transactions = snapshot.transactions;
        self.income_streams = snapshot.income_streams;
        self.recurring_payments = snapshot.recurring_payments;
        self.savings = snapshot.savings;
        self.persist_all();
    }

    /// Restore from a serialized snapshot document
    ///
    /// The document is parsed in full before anything is applied, so a
    /// malformed document leaves the store exactly as it was.
    pub fn restore_json(&mut self, document: &str) -> Result<()> {
        let snapshot = Snapshot::from_json(document)?;
        self.restore(snapshot);
        Ok(())
    }

    // Warnings

    /// Check whether any write-through failures are waiting to be surfaced
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Drain the queued write-through warnings
    pub fn take_warnings(&mut self) -> Vec<PersistenceWarning> {
        std::mem::take(&mut self.warnings)
    }

    // Write-through

    fn persist_transactions(&mut self) {
        let document = TransactionsDocument {
            transactions: self.transactions.clone(),
        };
        self.persist(KEY_TRANSACTIONS, &document);
    }

    fn persist_income_streams(&mut self) {
        let document = IncomeStreamsDocument {
            income_streams: self.income_streams.clone(),
        };
        self.persist(KEY_INCOME_STREAMS, &document);
    }

    fn persist_recurring_payments(&mut self) {
        let document = RecurringPaymentsDocument {
            recurring_payments: self.recurring_payments.clone(),
        };
        self.persist(KEY_RECURRING_PAYMENTS, &document);
    }

    fn persist_savings(&mut self) {
        let document = SavingsDocument {
            savings: self.savings.clone(),
        };
        self.persist(KEY_SAVINGS, &document);
    }

    fn persist_all(&mut self) {
        self.persist_transactions();
        self.persist_income_streams();
        self.persist_recurring_payments();
        self.persist_savings();
    }

    fn persist<T: Serialize>(&mut self, key: &'static str, document: &T) {
        let text = match serde_json::to_string_pretty(document) {
            Ok(text) => text,
            Err(e) => {
                warn!("Failed to serialize '{}' document: {}", key, e);
                self.warnings.push(PersistenceWarning::new(key, e.to_string()));
                return;
            }
        };

        match self.backend.save(key, &text) {
            Ok(()) => debug!("Persisted '{}' document", key),
            Err(e) => {
                warn!("Write-through for '{}' failed: {}", key, e);
                self.warnings.push(PersistenceWarning::new(key, e.to_string()));
            }
        }
    }
}

/// Load one container document, falling back to empty on any failure
fn load_container<T: DeserializeOwned + Default>(backend: &dyn StorageBackend, key: &str) -> T {
    match backend.load(key) {
        Ok(Some(text)) => match serde_json::from_str(&text) {
            Ok(document) => document,
            Err(e) => {
                warn!("Stored '{}' document is unreadable, starting empty: {}", key, e);
                T::default()
            }
        },
        Ok(None) => T::default(),
        Err(e) => {
            warn!("Failed to load '{}' document, starting empty: {}", key, e);
            T::default()
        }
    }
}
