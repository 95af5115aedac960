//! The transaction store: sole owner of the collection and its persisted mirror.

use std::{fmt, sync::Arc};

use financia_domain::{seed_transactions, NewTransaction, Transaction, TransactionId};
use tracing::{debug, info, warn};

use crate::{storage::TransactionStorage, time::Clock, CoreError};

/// Where the collection came from at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// The slot held a valid collection.
    Stored,
    /// The slot was empty; seed data was used.
    Seed,
    /// The slot could not be read or parsed; seed data was used.
    Recovered,
}

impl fmt::Display for LoadSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LoadSource::Stored => "stored",
            LoadSource::Seed => "seed",
            LoadSource::Recovered => "recovered",
        };
        f.write_str(label)
    }
}

/// Outcome of [`TransactionStore::load`].
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub source: LoadSource,
    pub count: usize,
    pub warnings: Vec<String>,
}

/// Ordered transaction collection with write-through persistence.
pub struct TransactionStore {
    transactions: Vec<Transaction>,
    storage: Box<dyn TransactionStorage>,
    clock: Arc<dyn Clock>,
    last_persist_error: Option<String>,
}

impl TransactionStore {
    /// Reads the slot once, falling back to seed data when it is absent or unusable.
    pub fn load(storage: Box<dyn TransactionStorage>, clock: Arc<dyn Clock>) -> (Self, LoadReport) {
        let location = storage.location();
        let (transactions, source, mut warnings) = match storage.load_transactions() {
            Ok(Some(stored)) => (stored, LoadSource::Stored, Vec::new()),
            Ok(None) => {
                debug!(%location, "no stored transactions, using seed data");
                (seed_transactions(clock.now()), LoadSource::Seed, Vec::new())
            }
            Err(err) => {
                warn!(%location, error = %err, "stored transactions unreadable, using seed data");
                (
                    seed_transactions(clock.now()),
                    LoadSource::Recovered,
                    vec![format!("stored transactions could not be read: {err}")],
                )
            }
        };
        warnings.extend(integrity_warnings(&transactions));
        info!(%location, %source, count = transactions.len(), "transactions loaded");
        let report = LoadReport {
            source,
            count: transactions.len(),
            warnings,
        };
        let store = Self {
            transactions,
            storage,
            clock,
            last_persist_error: None,
        };
        (store, report)
    }

    /// Validates `entry`, appends it under a fresh id and writes through.
    pub fn add(&mut self, entry: NewTransaction) -> Result<TransactionId, CoreError> {
        validate_entry(&entry)?;
        let transaction = Transaction::from_new(entry);
        let id = transaction.id.clone();
        debug!(%id, amount = transaction.amount, kind = %transaction.kind, "transaction added");
        self.transactions.push(transaction);
        self.persist();
        Ok(id)
    }

    /// Removes every transaction carrying `id` and returns the first of them.
    pub fn remove(&mut self, id: &TransactionId) -> Result<Transaction, CoreError> {
        let removed = self
            .get(id)
            .cloned()
            .ok_or_else(|| CoreError::TransactionNotFound(id.clone()))?;
        let before = self.transactions.len();
        self.transactions.retain(|txn| &txn.id != id);
        debug!(%id, count = before - self.transactions.len(), "transaction removed");
        self.persist();
        Ok(removed)
    }

    /// Snapshot of the collection in insertion order.
    pub fn list(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn get(&self, id: &TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| &txn.id == id)
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Overwrites the persisted slot with the current collection.
    pub fn save(&mut self) -> Result<(), CoreError> {
        self.storage.save_transactions(&self.transactions)?;
        self.last_persist_error = None;
        Ok(())
    }

    /// Message of the most recent failed write-through, cleared by the next success.
    pub fn last_persist_error(&self) -> Option<&str> {
        self.last_persist_error.as_deref()
    }

    pub fn storage_location(&self) -> String {
        self.storage.location()
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    fn persist(&mut self) {
        if let Err(err) = self.save() {
            warn!(
                location = %self.storage.location(),
                error = %err,
                "write-through of transactions failed"
            );
            self.last_persist_error = Some(err.to_string());
        }
    }
}

/// Entry-boundary validation for manually entered or accepted transactions.
pub fn validate_entry(entry: &NewTransaction) -> Result<(), CoreError> {
    if entry.description.trim().is_empty() {
        return Err(CoreError::Validation("description must not be empty".into()));
    }
    if !entry.amount.is_finite() {
        return Err(CoreError::Validation("amount must be a number".into()));
    }
    if entry.amount < 0.0 {
        return Err(CoreError::Validation("amount must not be negative".into()));
    }
    Ok(())
}

fn integrity_warnings(transactions: &[Transaction]) -> Vec<String> {
    let mut warnings = Vec::new();
    let mut seen = std::collections::HashSet::new();
    for txn in transactions {
        if !seen.insert(&txn.id) {
            warnings.push(format!("transaction id {} appears more than once", txn.id));
        }
        if !txn.amount.is_finite() || txn.amount < 0.0 {
            warnings.push(format!(
                "transaction {} has an invalid amount {}",
                txn.id, txn.amount
            ));
        }
    }
    warnings
}
