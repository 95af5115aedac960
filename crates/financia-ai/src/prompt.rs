//! Prompt and response-schema construction.

use financia_domain::{CategoryCatalog, Transaction};
use serde_json::{json, Value};

use crate::GenerationRequest;

/// One line per transaction: `+5000 on 2024-05-01 - Salary (Work)`.
pub fn transaction_context(transactions: &[Transaction]) -> String {
    transactions
        .iter()
        .map(|t| {
            format!(
                "{}{} on {} - {} ({})",
                t.kind.sign(),
                t.amount,
                t.date.format("%Y-%m-%d"),
                t.description,
                t.category
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Human language name handed to the model for a locale tag.
pub fn language_for(locale: &str) -> String {
    let lower = locale.trim().to_ascii_lowercase();
    let primary = lower.split(['-', '_']).next().unwrap_or_default();
    match primary {
        "pt" if lower.ends_with("br") => "Brazilian Portuguese".into(),
        "pt" => "Portuguese".into(),
        "en" => "English".into(),
        "es" => "Spanish".into(),
        "fr" => "French".into(),
        "de" => "German".into(),
        "it" => "Italian".into(),
        _ => locale.trim().to_string(),
    }
}

pub fn insight_request(transactions: &[Transaction], locale: &str) -> GenerationRequest {
    let system_instruction = format!(
        "You are an experienced and friendly personal financial advisor. \
         Analyze the data provided and return a JSON object with the fields \
         title, message, suggestion and priority ('low', 'medium' or 'high'). \
         Write every text field in {}.",
        language_for(locale)
    );
    let prompt = format!(
        "Analyze the following financial transactions and provide one useful insight \
         to help the user save or manage money better:\n\n{}",
        transaction_context(transactions)
    );
    GenerationRequest {
        system_instruction,
        prompt,
        response_schema: insight_schema(),
    }
}

pub fn draft_request(input: &str, catalog: &CategoryCatalog) -> GenerationRequest {
    let names = catalog.names().collect::<Vec<_>>().join(", ");
    let system_instruction = format!(
        "Extract the amount (number), description (string), type ('income' or 'expense') \
         and a suggested category from this list: {names}. Respond in JSON."
    );
    let prompt = format!("Extract the transaction details from this sentence: \"{input}\"");
    GenerationRequest {
        system_instruction,
        prompt,
        response_schema: draft_schema(),
    }
}

pub fn insight_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING" },
            "message": { "type": "STRING" },
            "suggestion": { "type": "STRING" },
            "priority": { "type": "STRING", "enum": ["low", "medium", "high"] }
        },
        "required": ["title", "message", "suggestion", "priority"]
    })
}

pub fn draft_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "amount": { "type": "NUMBER" },
            "description": { "type": "STRING" },
            "type": { "type": "STRING", "enum": ["income", "expense"] },
            "category": { "type": "STRING" }
        },
        "required": ["amount", "description", "type", "category"]
    })
}
