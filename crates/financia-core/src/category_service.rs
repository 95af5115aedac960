use financia_domain::{Category, CategoryCatalog, Transaction};

pub struct CategoryService;

impl CategoryService {
    /// Exact lookup by name; `None` for names outside the catalog.
    pub fn lookup<'a>(catalog: &'a CategoryCatalog, name: &str) -> Option<&'a Category> {
        catalog.find_by_name(name)
    }

    /// Lookup that tolerates case and surrounding whitespace, used to normalize
    /// user and model input onto catalog names.
    pub fn resolve_name<'a>(catalog: &'a CategoryCatalog, candidate: &str) -> Option<&'a Category> {
        let normalized = candidate.trim().to_lowercase();
        if normalized.is_empty() {
            return None;
        }
        catalog
            .entries()
            .iter()
            .find(|category| category.name.to_lowercase() == normalized)
    }

    /// Distinct category names on `transactions` that the catalog does not know,
    /// in first-seen order.
    pub fn unmatched<'a>(transactions: &'a [Transaction], catalog: &CategoryCatalog) -> Vec<&'a str> {
        let mut unknown: Vec<&str> = Vec::new();
        for txn in transactions {
            let name = txn.category.as_str();
            if !catalog.contains(name) && !unknown.contains(&name) {
                unknown.push(name);
            }
        }
        unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use financia_domain::{NewTransaction, TransactionType};

    #[test]
    fn resolve_name_ignores_case_and_padding() {
        let catalog = CategoryCatalog::default();
        let category = CategoryService::resolve_name(&catalog, "  saúde ").expect("match");
        assert_eq!(category.name, "Saúde");
        assert!(CategoryService::resolve_name(&catalog, "").is_none());
        assert!(CategoryService::lookup(&catalog, "saúde").is_none());
    }

    #[test]
    fn unmatched_lists_each_unknown_name_once() {
        let catalog = CategoryCatalog::default();
        let now = Utc::now();
        let transactions: Vec<_> = ["Viagem", "Lazer", "Viagem", "Pets"]
            .iter()
            .map(|category| {
                Transaction::from_new(NewTransaction::new(
                    "x",
                    1.0,
                    TransactionType::Expense,
                    *category,
                    now,
                ))
            })
            .collect();
        assert_eq!(
            CategoryService::unmatched(&transactions, &catalog),
            vec!["Viagem", "Pets"]
        );
    }
}
