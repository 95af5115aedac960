use std::sync::Mutex;

use financia_domain::Transaction;

use crate::CoreError;

/// Durable single-slot persistence for the full transaction collection.
pub trait TransactionStorage: Send + Sync {
    /// Reads the slot. `Ok(None)` means the slot has never been written.
    fn load_transactions(&self) -> Result<Option<Vec<Transaction>>, CoreError>;

    /// Overwrites the slot with `transactions`.
    fn save_transactions(&self, transactions: &[Transaction]) -> Result<(), CoreError>;

    /// Human-readable location used in logs.
    fn location(&self) -> String;
}

/// In-process slot holding the serialized collection, for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slot: Mutex<Option<String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with `raw` already in the slot, valid JSON or not.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(raw.into())),
        }
    }

    /// Current slot contents.
    pub fn raw(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|guard| guard.clone())
    }
}

impl TransactionStorage for MemoryStorage {
    fn load_transactions(&self) -> Result<Option<Vec<Transaction>>, CoreError> {
        let guard = self
            .slot
            .lock()
            .map_err(|_| CoreError::Storage("memory slot poisoned".into()))?;
        match guard.as_deref() {
            Some(raw) => Ok(Some(serde_json::from_str(raw)?)),
            None => Ok(None),
        }
    }

    fn save_transactions(&self, transactions: &[Transaction]) -> Result<(), CoreError> {
        let json = serde_json::to_string(transactions)?;
        let mut guard = self
            .slot
            .lock()
            .map_err(|_| CoreError::Storage("memory slot poisoned".into()))?;
        *guard = Some(json);
        Ok(())
    }

    fn location(&self) -> String {
        "memory".into()
    }
}
