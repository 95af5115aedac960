//! Starter dataset used when no stored transactions exist.

use chrono::{DateTime, Utc};

use crate::transaction::{NewTransaction, Transaction, TransactionId, TransactionType};

/// Three illustrative entries dated `now`, with stable ids.
pub fn seed_transactions(now: DateTime<Utc>) -> Vec<Transaction> {
    vec![
        Transaction::with_id(
            TransactionId::new("1"),
            NewTransaction::new(
                "Salário Mensal",
                5000.0,
                TransactionType::Income,
                "Trabalho",
                now,
            ),
        ),
        Transaction::with_id(
            TransactionId::new("2"),
            NewTransaction::new("Aluguel", 1500.0, TransactionType::Expense, "Moradia", now),
        ),
        Transaction::with_id(
            TransactionId::new("3"),
            NewTransaction::new(
                "Supermercado",
                450.0,
                TransactionType::Expense,
                "Alimentação",
                now,
            ),
        ),
    ]
}
