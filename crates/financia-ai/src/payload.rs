//! Validation of model output into domain values.

use financia_domain::{AIInsight, InsightPriority, TransactionDraft, TransactionType};
use serde::Deserialize;
use serde_json::Value;

use crate::AiError;

/// Strips a surrounding markdown code fence, if any.
pub fn extract_json_payload(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}

fn parse_object(text: &str) -> Result<Value, AiError> {
    let value: Value = serde_json::from_str(extract_json_payload(text))?;
    if value.is_object() {
        Ok(value)
    } else {
        Err(AiError::Malformed("expected a JSON object".into()))
    }
}

#[derive(Deserialize)]
struct RawInsight {
    title: String,
    message: String,
    suggestion: String,
    priority: String,
}

/// All four fields must be present strings and the priority one of the
/// known levels.
pub fn parse_insight(text: &str) -> Result<AIInsight, AiError> {
    let raw: RawInsight = serde_json::from_value(parse_object(text)?)?;
    let priority: InsightPriority = raw.priority.parse().map_err(AiError::Malformed)?;
    Ok(AIInsight {
        title: raw.title,
        message: raw.message,
        suggestion: raw.suggestion,
        priority,
    })
}

#[derive(Deserialize)]
struct RawDraft {
    amount: Option<f64>,
    description: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    category: Option<String>,
}

/// Missing or null fields stay absent; a field of the wrong JSON type fails
/// the whole draft.
pub fn parse_draft(text: &str) -> Result<TransactionDraft, AiError> {
    let raw: RawDraft = serde_json::from_value(parse_object(text)?)?;
    let non_blank = |value: Option<String>| {
        value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };
    Ok(TransactionDraft {
        amount: raw.amount.filter(|a| a.is_finite()).map(f64::abs),
        description: non_blank(raw.description),
        kind: non_blank(raw.kind).map(|k| TransactionType::from_model_value(&k)),
        category: non_blank(raw.category),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fence_is_stripped() {
        assert_eq!(extract_json_payload("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(extract_json_payload("```\n{}\n```"), "{}");
        assert_eq!(extract_json_payload("  {\"a\":1} "), "{\"a\":1}");
    }

    #[test]
    fn insight_requires_every_field() {
        let err = parse_insight(r#"{"title":"t","message":"m","priority":"low"}"#);
        assert!(matches!(err, Err(AiError::Malformed(_))));
    }

    #[test]
    fn insight_rejects_unknown_priority() {
        let err = parse_insight(
            r#"{"title":"t","message":"m","suggestion":"s","priority":"urgent"}"#,
        );
        assert!(matches!(err, Err(AiError::Malformed(_))));
    }

    #[test]
    fn insight_priority_is_case_insensitive() {
        let insight = parse_insight(
            r#"{"title":"t","message":"m","suggestion":"s","priority":"High"}"#,
        )
        .unwrap();
        assert_eq!(insight.priority, InsightPriority::High);
    }

    #[test]
    fn insight_rejects_arrays() {
        assert!(parse_insight(r#"["t","m","s","low"]"#).is_err());
    }

    #[test]
    fn draft_keeps_partial_fields() {
        let draft = parse_draft(r#"{"amount":30,"description":"  Almoço "}"#).unwrap();
        assert_eq!(draft.amount, Some(30.0));
        assert_eq!(draft.description.as_deref(), Some("Almoço"));
        assert_eq!(draft.kind, None);
        assert_eq!(draft.category, None);
    }

    #[test]
    fn draft_nulls_are_absent_and_unknown_type_is_expense() {
        let draft =
            parse_draft(r#"{"amount":null,"type":"refund","category":null}"#).unwrap();
        assert_eq!(draft.amount, None);
        assert_eq!(draft.kind, Some(TransactionType::Expense));
    }

    #[test]
    fn draft_negative_amount_uses_magnitude() {
        let draft = parse_draft(r#"{"amount":-12.5,"type":"income"}"#).unwrap();
        assert_eq!(draft.amount, Some(12.5));
        assert_eq!(draft.kind, Some(TransactionType::Income));
    }

    #[test]
    fn draft_wrong_field_type_fails() {
        assert!(parse_draft(r#"{"amount":"thirty"}"#).is_err());
        assert!(parse_draft("not json").is_err());
        assert!(parse_draft("null").is_err());
    }
}
