use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};

use crate::{
    storage::{MemoryStorage, TransactionStorage},
    summary_service::{SummaryService, TypeFilter},
    time::{Clock, FixedClock},
    transaction_service::{LoadSource, TransactionStore},
    CoreError,
};
use financia_domain::{NewTransaction, Transaction, TransactionType};

struct FailingStorage;

impl TransactionStorage for FailingStorage {
    fn load_transactions(&self) -> Result<Option<Vec<Transaction>>, CoreError> {
        Ok(Some(Vec::new()))
    }

    fn save_transactions(&self, _transactions: &[Transaction]) -> Result<(), CoreError> {
        Err(CoreError::Storage("disk full".into()))
    }

    fn location(&self) -> String {
        "failing".into()
    }
}

fn clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(Utc.with_ymd_and_hms(2025, 2, 10, 12, 0, 0).unwrap()))
}

fn generated(count: usize) -> Vec<NewTransaction> {
    let base = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    (0..count)
        .map(|idx| {
            let kind = if idx % 3 == 0 {
                TransactionType::Income
            } else {
                TransactionType::Expense
            };
            NewTransaction::new(
                format!("Entry {idx}"),
                (idx as f64) * 1.25,
                kind,
                "Outros",
                base + Duration::hours((idx * 7 % 50) as i64),
            )
        })
        .collect()
}

#[test]
fn store_round_trips_through_the_persisted_slot() {
    let storage = Arc::new(MemoryStorage::new());
    let (mut store, _) = TransactionStore::load(Box::new(SharedSlot(storage.clone())), clock());
    for entry in generated(5) {
        store.add(entry).expect("add");
    }
    let removed_id = store.list()[1].id.clone();
    store.remove(&removed_id).expect("remove");

    let (reloaded, report) = TransactionStore::load(Box::new(SharedSlot(storage)), clock());
    assert_eq!(report.source, LoadSource::Stored);
    assert_eq!(reloaded.list(), store.list());
    assert!(reloaded.get(&removed_id).is_none());
}

#[test]
fn failed_write_through_keeps_the_mutation() {
    let (mut store, report) = TransactionStore::load(Box::new(FailingStorage), clock());
    assert_eq!(report.source, LoadSource::Stored);
    let id = store
        .add(NewTransaction::new(
            "Farmácia",
            35.0,
            TransactionType::Expense,
            "Saúde",
            Utc::now(),
        ))
        .expect("add succeeds in memory");
    assert!(store.get(&id).is_some());
    assert!(store
        .last_persist_error()
        .is_some_and(|message| message.contains("disk full")));
    assert!(store.save().is_err());
}

#[test]
fn balance_is_always_income_minus_expenses() {
    for size in [0, 1, 2, 17, 256] {
        let transactions: Vec<_> = generated(size)
            .into_iter()
            .map(Transaction::from_new)
            .collect();
        let summary = SummaryService::compute_summary(&transactions);
        assert_eq!(summary.balance, summary.income - summary.expenses);
    }
}

#[test]
fn unfiltered_listing_keeps_every_transaction() {
    let transactions: Vec<_> = generated(40)
        .into_iter()
        .map(Transaction::from_new)
        .collect();
    let listed = SummaryService::filter_and_sort(&transactions, TypeFilter::All, "");
    assert_eq!(listed.len(), transactions.len());
    assert!(listed.windows(2).all(|pair| pair[0].date >= pair[1].date));
}

/// Lets two stores share one in-memory slot, as two sessions share one file.
struct SharedSlot(Arc<MemoryStorage>);

impl TransactionStorage for SharedSlot {
    fn load_transactions(&self) -> Result<Option<Vec<Transaction>>, CoreError> {
        self.0.load_transactions()
    }

    fn save_transactions(&self, transactions: &[Transaction]) -> Result<(), CoreError> {
        self.0.save_transactions(transactions)
    }

    fn location(&self) -> String {
        self.0.location()
    }
}
