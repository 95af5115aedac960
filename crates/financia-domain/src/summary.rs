//! Derived, ephemeral statistics over a transaction collection.

use serde::{Deserialize, Serialize};

use crate::transaction::TransactionType;

/// Income, expense and balance totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialSummary {
    pub income: f64,
    pub expenses: f64,
    pub balance: f64,
}

impl FinancialSummary {
    pub fn from_totals(income: f64, expenses: f64) -> Self {
        Self {
            income,
            expenses,
            balance: income - expenses,
        }
    }

    pub fn is_negative(&self) -> bool {
        self.balance < 0.0
    }
}

/// Expense total for one catalog category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub name: String,
    pub total: f64,
}

/// Short-term flow descriptor for recent activity charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityPoint {
    pub label: String,
    pub amount: f64,
    pub kind: TransactionType,
}

impl ActivityPoint {
    pub const LABEL_CHARS: usize = 10;

    pub fn new(description: &str, amount: f64, kind: TransactionType) -> Self {
        Self {
            label: description.chars().take(Self::LABEL_CHARS).collect(),
            amount,
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activity_labels_truncate_on_char_boundaries() {
        let point = ActivityPoint::new("Alimentação semanal", 10.0, TransactionType::Expense);
        assert_eq!(point.label, "Alimentaçã");
    }

    #[test]
    fn balance_may_go_negative() {
        let summary = FinancialSummary::from_totals(100.0, 250.0);
        assert_eq!(summary.balance, -150.0);
        assert!(summary.is_negative());
    }
}
