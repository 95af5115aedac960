//! Locale-aware rendering of amounts and dates.

use chrono::{DateTime, Local, Utc};

/// Separators and layout derived from a locale tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleFormat {
    pub decimal_separator: char,
    pub grouping_separator: char,
    /// Whether a space separates the currency symbol from the number.
    pub symbol_spacing: bool,
    pub date_pattern: &'static str,
}

impl LocaleFormat {
    pub fn for_locale(locale: &str) -> Self {
        let primary = locale
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match primary.as_str() {
            "pt" | "es" | "de" | "it" | "nl" | "id" | "tr" => Self {
                decimal_separator: ',',
                grouping_separator: '.',
                symbol_spacing: true,
                date_pattern: "%d/%m/%Y",
            },
            "fr" => Self {
                decimal_separator: ',',
                grouping_separator: ' ',
                symbol_spacing: true,
                date_pattern: "%d/%m/%Y",
            },
            _ => Self {
                decimal_separator: '.',
                grouping_separator: ',',
                symbol_spacing: false,
                date_pattern: "%Y-%m-%d",
            },
        }
    }
}

pub fn symbol_for(code: &str) -> String {
    match code {
        "BRL" => "R$".into(),
        "USD" => "$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        "JPY" => "¥".into(),
        "AUD" => "A$".into(),
        _ => code.into(),
    }
}

pub fn minor_units_for(code: &str) -> u8 {
    match code {
        "JPY" => 0,
        "KWD" | "BHD" => 3,
        _ => 2,
    }
}

pub fn format_number(locale: &LocaleFormat, value: f64, precision: u8) -> String {
    let body = format!("{:.*}", precision as usize, value.abs());
    let (int_part, frac_part) = match body.split_once('.') {
        Some((int_part, frac)) => (int_part, Some(frac)),
        None => (body.as_str(), None),
    };
    let mut out = String::new();
    if value < 0.0 && body.chars().any(|ch| ch != '0' && ch != '.') {
        out.push('-');
    }
    out.push_str(&group_digits(int_part, locale.grouping_separator));
    if let Some(frac) = frac_part {
        out.push(locale.decimal_separator);
        out.push_str(frac);
    }
    out
}

fn group_digits(digits: &str, separator: char) -> String {
    let len = digits.chars().count();
    let mut grouped = String::with_capacity(len + len / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx != 0 && (len - idx) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}

/// `R$ 1.234,56` for pt-BR/BRL, `$1,234.56` for en-US/USD.
pub fn format_currency(amount: f64, currency: &str, locale: &LocaleFormat) -> String {
    let body = format_number(locale, amount.abs(), minor_units_for(currency));
    let sign = if amount < 0.0 && body.chars().any(|ch| ch.is_ascii_digit() && ch != '0') {
        "-"
    } else {
        ""
    };
    let symbol = symbol_for(currency);
    if locale.symbol_spacing {
        format!("{sign}{symbol} {body}")
    } else {
        format!("{sign}{symbol}{body}")
    }
}

pub fn format_date(locale: &LocaleFormat, date: &DateTime<Utc>) -> String {
    date.with_timezone(&Local)
        .format(locale.date_pattern)
        .to_string()
}

/// Accepts `30`, `30.5`, `30,50` and `1.234,56`.
pub fn parse_amount(input: &str) -> Result<f64, String> {
    let trimmed = input.trim().trim_start_matches("R$").trim();
    let normalized = match (trimmed.rfind(','), trimmed.rfind('.')) {
        (Some(comma), Some(dot)) if comma > dot => trimmed.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => trimmed.replace(',', ""),
        (Some(_), None) => trimmed.replace(',', "."),
        _ => trimmed.to_string(),
    };
    let value: f64 = normalized
        .parse()
        .map_err(|_| format!("`{}` is not a valid amount", input.trim()))?;
    if !value.is_finite() {
        return Err("amount must be a finite number".into());
    }
    if value < 0.0 {
        return Err("amount must not be negative".into());
    }
    Ok(value)
}
