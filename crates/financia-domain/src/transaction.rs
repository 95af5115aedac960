//! Domain models for recorded transactions and entry drafts.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

const GENERATED_ID_LEN: usize = 12;

/// Opaque identifier assigned to a transaction when it enters the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        let mut raw = Uuid::new_v4().simple().to_string();
        raw.truncate(GENERATED_ID_LEN);
        Self(raw)
    }

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TransactionId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A single recorded income or expense event. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub description: String,
    pub amount: f64,
    pub date: DateTime<Utc>,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
}

impl Transaction {
    /// Materializes an entry-form payload under a freshly generated id.
    pub fn from_new(entry: NewTransaction) -> Self {
        Self::with_id(TransactionId::generate(), entry)
    }

    pub fn with_id(id: TransactionId, entry: NewTransaction) -> Self {
        Self {
            id,
            description: entry.description,
            amount: entry.amount,
            date: entry.date,
            category: entry.category,
            kind: entry.kind,
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        format!(
            "{} {}{} ({})",
            self.description,
            self.kind.sign(),
            self.amount,
            self.category
        )
    }
}

/// Direction of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    #[default]
    Expense,
}

impl TransactionType {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }

    /// Sign prefix used in prompts and listings.
    pub fn sign(self) -> char {
        match self {
            TransactionType::Income => '+',
            TransactionType::Expense => '-',
        }
    }

    /// Lenient mapping for values produced by the external model: only an
    /// exact `"income"` is income, everything else is treated as an expense.
    pub fn from_model_value(value: &str) -> Self {
        if value == TransactionType::Income.as_str() {
            TransactionType::Income
        } else {
            TransactionType::Expense
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTransactionTypeError(pub String);

impl fmt::Display for ParseTransactionTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown transaction type `{}` (use income or expense)", self.0)
    }
}

impl std::error::Error for ParseTransactionTypeError {}

impl FromStr for TransactionType {
    type Err = ParseTransactionTypeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            _ => Err(ParseTransactionTypeError(value.to_string())),
        }
    }
}

/// Entry-form payload: a transaction that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub description: String,
    pub amount: f64,
    pub date: DateTime<Utc>,
    pub category: String,
    pub kind: TransactionType,
}

impl NewTransaction {
    pub fn new(
        description: impl Into<String>,
        amount: f64,
        kind: TransactionType,
        category: impl Into<String>,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            description: description.into(),
            amount,
            date,
            category: category.into(),
            kind,
        }
    }
}

/// Partial record extracted from free-form text. Any field may be missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionDraft {
    pub amount: Option<f64>,
    pub description: Option<String>,
    pub kind: Option<TransactionType>,
    pub category: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Transaction {
        Transaction::with_id(
            TransactionId::new("abc"),
            NewTransaction::new(
                "Aluguel",
                1500.0,
                TransactionType::Expense,
                "Moradia",
                Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap(),
            ),
        )
    }

    #[test]
    fn serializes_type_field_in_lowercase() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["type"], "expense");
        assert_eq!(json["id"], "abc");
        assert!(json.get("kind").is_none());
    }

    #[test]
    fn accepts_javascript_iso_timestamps() {
        let raw = r#"{"id":"1","description":"Salário Mensal","amount":5000,
            "date":"2024-03-05T12:00:00.000Z","category":"Trabalho","type":"income"}"#;
        let txn: Transaction = serde_json::from_str(raw).unwrap();
        assert_eq!(txn.id.as_str(), "1");
        assert!(txn.is_income());
        assert_eq!(txn.date, Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap());
    }

    #[test]
    fn model_type_values_fall_back_to_expense() {
        assert_eq!(
            TransactionType::from_model_value("income"),
            TransactionType::Income
        );
        assert_eq!(
            TransactionType::from_model_value("Income"),
            TransactionType::Expense
        );
        assert_eq!(
            TransactionType::from_model_value("receita"),
            TransactionType::Expense
        );
    }

    #[test]
    fn generated_ids_are_unique_and_short() {
        let a = TransactionId::generate();
        let b = TransactionId::generate();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 12);
    }
}
