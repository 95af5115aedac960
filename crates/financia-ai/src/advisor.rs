use std::sync::Arc;

use financia_domain::{AIInsight, CategoryCatalog, Transaction, TransactionDraft};
use tracing::{info, warn};

use crate::{payload, prompt, AiError, GenerativeModel};

/// Best-effort financial advisor backed by a [`GenerativeModel`].
///
/// Both operations swallow every failure: `request_insight` answers with the
/// generic fallback and `parse_transaction_text` with `None`. The underlying
/// error is logged.
#[derive(Clone)]
pub struct Advisor {
    model: Arc<dyn GenerativeModel>,
    catalog: CategoryCatalog,
    locale: String,
}

impl Advisor {
    pub fn new(
        model: Arc<dyn GenerativeModel>,
        catalog: CategoryCatalog,
        locale: impl Into<String>,
    ) -> Self {
        Self {
            model,
            catalog,
            locale: locale.into(),
        }
    }

    pub fn fallback_insight(&self) -> AIInsight {
        AIInsight::fallback(&self.locale)
    }

    pub fn request_insight(&self, transactions: &[Transaction]) -> AIInsight {
        if transactions.is_empty() {
            return self.fallback_insight();
        }
        match self.try_insight(transactions) {
            Ok(insight) => {
                info!(model = self.model.name(), priority = %insight.priority, "insight received");
                insight
            }
            Err(err) => {
                warn!(model = self.model.name(), error = %err, "insight request failed, using fallback");
                self.fallback_insight()
            }
        }
    }

    pub fn try_insight(&self, transactions: &[Transaction]) -> Result<AIInsight, AiError> {
        let request = prompt::insight_request(transactions, &self.locale);
        let text = self.model.generate(&request)?;
        payload::parse_insight(&text)
    }

    pub fn parse_transaction_text(&self, input: &str) -> Option<TransactionDraft> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }
        match self.try_parse(input) {
            Ok(draft) => Some(draft),
            Err(err) => {
                warn!(model = self.model.name(), error = %err, "transaction parsing failed");
                None
            }
        }
    }

    pub fn try_parse(&self, input: &str) -> Result<TransactionDraft, AiError> {
        let request = prompt::draft_request(input, &self.catalog);
        let text = self.model.generate(&request)?;
        payload::parse_draft(&text)
    }
}
