//! Turns a natural-language draft into an entry-form payload.

use chrono::{DateTime, Utc};
use financia_domain::{CategoryCatalog, NewTransaction, TransactionDraft};

use crate::{category_service::CategoryService, transaction_service::validate_entry, CoreError};

pub struct DraftService;

impl DraftService {
    /// Fills the gaps of `draft` the way the entry form does: type defaults to
    /// expense, category to the catalog's first entry. Description and amount
    /// have no default and must be present.
    pub fn resolve(
        draft: &TransactionDraft,
        catalog: &CategoryCatalog,
        now: DateTime<Utc>,
    ) -> Result<NewTransaction, CoreError> {
        let description = draft
            .description
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| CoreError::Validation("draft has no description".into()))?;
        let amount = draft
            .amount
            .ok_or_else(|| CoreError::Validation("draft has no amount".into()))?;
        let category = Self::category_for(draft, catalog);
        let entry = NewTransaction::new(
            description,
            amount,
            draft.kind.unwrap_or_default(),
            category,
            now,
        );
        validate_entry(&entry)?;
        Ok(entry)
    }

    /// Category the form would preselect for `draft`.
    pub fn category_for(draft: &TransactionDraft, catalog: &CategoryCatalog) -> String {
        match draft.category.as_deref() {
            Some(name) => CategoryService::resolve_name(catalog, name)
                .map(|category| category.name.clone())
                .unwrap_or_else(|| name.trim().to_string()),
            None => catalog
                .first()
                .map(|category| category.name.clone())
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use financia_domain::TransactionType;

    #[test]
    fn missing_type_and_category_use_form_defaults() {
        let draft = TransactionDraft {
            amount: Some(32.5),
            description: Some("Uber".into()),
            ..TransactionDraft::default()
        };
        let entry = DraftService::resolve(&draft, &CategoryCatalog::default(), Utc::now()).unwrap();
        assert_eq!(entry.kind, TransactionType::Expense);
        assert_eq!(entry.category, "Alimentação");
        assert_eq!(entry.amount, 32.5);
    }

    #[test]
    fn category_case_is_normalized_onto_catalog() {
        let draft = TransactionDraft {
            amount: Some(80.0),
            description: Some("Consulta".into()),
            kind: Some(TransactionType::Expense),
            category: Some("saúde".into()),
        };
        let entry = DraftService::resolve(&draft, &CategoryCatalog::default(), Utc::now()).unwrap();
        assert_eq!(entry.category, "Saúde");
    }

    #[test]
    fn drafts_without_amount_or_description_are_rejected() {
        let catalog = CategoryCatalog::default();
        let no_amount = TransactionDraft {
            description: Some("Cinema".into()),
            ..TransactionDraft::default()
        };
        assert!(DraftService::resolve(&no_amount, &catalog, Utc::now()).is_err());

        let blank_description = TransactionDraft {
            amount: Some(10.0),
            description: Some("  ".into()),
            ..TransactionDraft::default()
        };
        assert!(DraftService::resolve(&blank_description, &catalog, Utc::now()).is_err());
    }
}
