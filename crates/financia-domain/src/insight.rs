//! Advisory payloads produced by the external model.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Urgency attached to an insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightPriority {
    Low,
    Medium,
    High,
}

impl InsightPriority {
    pub fn as_str(self) -> &'static str {
        match self {
            InsightPriority::Low => "low",
            InsightPriority::Medium => "medium",
            InsightPriority::High => "high",
        }
    }
}

impl fmt::Display for InsightPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InsightPriority {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(InsightPriority::Low),
            "medium" => Ok(InsightPriority::Medium),
            "high" => Ok(InsightPriority::High),
            other => Err(format!("unknown insight priority `{other}`")),
        }
    }
}

/// Financial advice returned for a transaction history. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AIInsight {
    pub title: String,
    pub message: String,
    pub suggestion: String,
    pub priority: InsightPriority,
}

impl AIInsight {
    /// Generic advice used whenever the model cannot be consulted.
    pub fn fallback(locale: &str) -> Self {
        if locale.to_ascii_lowercase().starts_with("pt") {
            Self {
                title: "Conselho Geral".into(),
                message: "Mantenha o registro de todos os seus gastos para uma análise mais precisa."
                    .into(),
                suggestion: "Tente reduzir gastos não essenciais neste mês.".into(),
                priority: InsightPriority::Low,
            }
        } else {
            Self {
                title: "General Advice".into(),
                message: "Keep a record of all your spending for a more accurate analysis.".into(),
                suggestion: "Try to cut non-essential spending this month.".into(),
                priority: InsightPriority::Low,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_is_low_priority_in_every_language() {
        assert_eq!(AIInsight::fallback("pt-BR").priority, InsightPriority::Low);
        assert_eq!(AIInsight::fallback("en-US").priority, InsightPriority::Low);
        assert_eq!(AIInsight::fallback("pt-BR").title, "Conselho Geral");
    }

    #[test]
    fn priority_parses_case_insensitively() {
        assert_eq!("HIGH".parse::<InsightPriority>(), Ok(InsightPriority::High));
        assert!("urgent".parse::<InsightPriority>().is_err());
    }
}
