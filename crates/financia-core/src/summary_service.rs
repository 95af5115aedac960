//! Aggregation engine: pure derivations over a transaction collection.

use std::{fmt, str::FromStr};

use financia_domain::{
    ActivityPoint, CategoryCatalog, CategoryTotal, FinancialSummary, Transaction, TransactionType,
};

use crate::CoreError;

/// Number of entries shown in the short-term flow view.
pub const DEFAULT_RECENT_WINDOW: usize = 10;

/// Type restriction applied by [`SummaryService::filter_and_sort`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Income,
    Expense,
}

impl TypeFilter {
    pub fn matches(self, kind: TransactionType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Income => kind == TransactionType::Income,
            TypeFilter::Expense => kind == TransactionType::Expense,
        }
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TypeFilter::All => "all",
            TypeFilter::Income => "income",
            TypeFilter::Expense => "expense",
        };
        f.write_str(label)
    }
}

impl FromStr for TypeFilter {
    type Err = CoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(TypeFilter::All),
            "income" => Ok(TypeFilter::Income),
            "expense" => Ok(TypeFilter::Expense),
            other => Err(CoreError::Validation(format!(
                "unknown type filter `{other}` (use all, income or expense)"
            ))),
        }
    }
}

pub struct SummaryService;

impl SummaryService {
    /// Income, expense and balance totals in a single pass.
    pub fn compute_summary(transactions: &[Transaction]) -> FinancialSummary {
        let (income, expenses) =
            transactions
                .iter()
                .fold((0.0, 0.0), |(income, expenses), txn| match txn.kind {
                    TransactionType::Income => (income + txn.amount, expenses),
                    TransactionType::Expense => (income, expenses + txn.amount),
                });
        FinancialSummary::from_totals(income, expenses)
    }

    /// Expense totals per catalog category, in catalog order, omitting zero totals.
    /// Category names outside the catalog do not appear.
    pub fn category_totals(
        transactions: &[Transaction],
        catalog: &CategoryCatalog,
    ) -> Vec<CategoryTotal> {
        let mut totals = vec![0.0_f64; catalog.len()];
        for txn in transactions.iter().filter(|txn| txn.is_expense()) {
            if let Some(idx) = catalog
                .entries()
                .iter()
                .position(|category| category.name == txn.category)
            {
                totals[idx] += txn.amount;
            }
        }
        catalog
            .entries()
            .iter()
            .zip(totals)
            .filter(|(_, total)| *total != 0.0)
            .map(|(category, total)| CategoryTotal {
                name: category.name.clone(),
                total,
            })
            .collect()
    }

    /// The last `n` transactions in insertion order, regardless of date.
    pub fn recent_activity(transactions: &[Transaction], n: usize) -> Vec<ActivityPoint> {
        let start = transactions.len().saturating_sub(n);
        transactions[start..]
            .iter()
            .map(|txn| ActivityPoint::new(&txn.description, txn.amount, txn.kind))
            .collect()
    }

    /// Transactions matching `filter` whose description or category contains
    /// `search` (case-insensitive), most recent first. Equal dates keep their
    /// original relative order.
    pub fn filter_and_sort<'a>(
        transactions: &'a [Transaction],
        filter: TypeFilter,
        search: &str,
    ) -> Vec<&'a Transaction> {
        let needle = search.to_lowercase();
        let mut matched: Vec<&Transaction> = transactions
            .iter()
            .filter(|txn| filter.matches(txn.kind))
            .filter(|txn| {
                needle.is_empty()
                    || txn.description.to_lowercase().contains(&needle)
                    || txn.category.to_lowercase().contains(&needle)
            })
            .collect();
        matched.sort_by(|a, b| b.date.cmp(&a.date));
        matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use financia_domain::{NewTransaction, TransactionId};

    fn txn(id: &str, description: &str, amount: f64, kind: TransactionType, category: &str, day: u32) -> Transaction {
        Transaction::with_id(
            TransactionId::new(id),
            NewTransaction::new(
                description,
                amount,
                kind,
                category,
                Utc.with_ymd_and_hms(2024, 5, day, 8, 0, 0).unwrap(),
            ),
        )
    }

    fn scenario() -> Vec<Transaction> {
        vec![
            txn("1", "Salário Mensal", 5000.0, TransactionType::Income, "Trabalho", 1),
            txn("2", "Aluguel", 1500.0, TransactionType::Expense, "Moradia", 1),
            txn("3", "Supermercado", 450.0, TransactionType::Expense, "Alimentação", 1),
        ]
    }

    #[test]
    fn summary_matches_reference_scenario() {
        let summary = SummaryService::compute_summary(&scenario());
        assert_eq!(summary.income, 5000.0);
        assert_eq!(summary.expenses, 1950.0);
        assert_eq!(summary.balance, 3050.0);
    }

    #[test]
    fn empty_collection_sums_to_zero() {
        assert_eq!(
            SummaryService::compute_summary(&[]),
            FinancialSummary {
                income: 0.0,
                expenses: 0.0,
                balance: 0.0
            }
        );
    }

    #[test]
    fn category_totals_follow_catalog_order_and_skip_unknown() {
        let mut data = scenario();
        data.push(txn("4", "Feira", 50.0, TransactionType::Expense, "Alimentação", 2));
        data.push(txn("5", "Passagem", 900.0, TransactionType::Expense, "Viagem", 3));
        data.push(txn("6", "Reembolso", 80.0, TransactionType::Income, "Saúde", 3));

        let totals = SummaryService::category_totals(&data, &CategoryCatalog::default());
        assert_eq!(
            totals,
            vec![
                CategoryTotal {
                    name: "Alimentação".into(),
                    total: 500.0
                },
                CategoryTotal {
                    name: "Moradia".into(),
                    total: 1500.0
                },
            ]
        );
        let summary = SummaryService::compute_summary(&data);
        assert_eq!(summary.expenses, 2900.0);
    }

    #[test]
    fn zero_amount_expenses_do_not_produce_entries() {
        let data = vec![txn("1", "Brinde", 0.0, TransactionType::Expense, "Lazer", 1)];
        assert!(SummaryService::category_totals(&data, &CategoryCatalog::default()).is_empty());
    }

    #[test]
    fn recent_activity_uses_insertion_order() {
        let data = vec![
            txn("1", "Novo", 1.0, TransactionType::Expense, "Lazer", 20),
            txn("2", "Antigo", 2.0, TransactionType::Expense, "Lazer", 2),
            txn("3", "Meio", 3.0, TransactionType::Income, "Trabalho", 10),
        ];
        let recent = SummaryService::recent_activity(&data, 2);
        let labels: Vec<_> = recent.iter().map(|point| point.label.as_str()).collect();
        assert_eq!(labels, vec!["Antigo", "Meio"]);

        let all = SummaryService::recent_activity(&data, 50);
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].label, "Novo");
        assert!(SummaryService::recent_activity(&data, 0).is_empty());
    }

    #[test]
    fn filter_and_sort_orders_by_date_descending_and_keeps_ties_stable() {
        let data = vec![
            txn("a", "Padaria", 10.0, TransactionType::Expense, "Alimentação", 3),
            txn("b", "Salário", 10.0, TransactionType::Income, "Trabalho", 9),
            txn("c", "Mercado", 10.0, TransactionType::Expense, "Alimentação", 3),
        ];
        let ids: Vec<_> = SummaryService::filter_and_sort(&data, TypeFilter::All, "")
            .into_iter()
            .map(|txn| txn.id.as_str())
            .collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn filter_and_sort_matches_description_or_category_case_insensitively() {
        let data = scenario();
        let by_category = SummaryService::filter_and_sort(&data, TypeFilter::All, "ALIMENTAÇÃO");
        assert_eq!(by_category.len(), 1);
        assert_eq!(by_category[0].id.as_str(), "3");

        let by_description = SummaryService::filter_and_sort(&data, TypeFilter::Expense, "alug");
        assert_eq!(by_description.len(), 1);

        let income_only = SummaryService::filter_and_sort(&data, TypeFilter::Income, "aluguel");
        assert!(income_only.is_empty());
    }

    #[test]
    fn type_filter_parses_known_values() {
        assert_eq!("Income".parse::<TypeFilter>().unwrap(), TypeFilter::Income);
        assert!("both".parse::<TypeFilter>().is_err());
    }
}
