use std::fmt;

use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

use crate::cli::context::CommandError;
use crate::cli::output;

pub fn print_info(message: impl fmt::Display) {
    output::info(message);
}

pub fn print_warning(message: impl fmt::Display) {
    output::warning(message);
}

pub fn print_error(message: impl fmt::Display) {
    output::error(message);
}

pub fn print_success(message: impl fmt::Display) {
    output::success(message);
}

pub fn print_hint(message: impl fmt::Display) {
    output::hint(message);
}

/// Yes/no question.
pub fn confirm_action(
    theme: &ColorfulTheme,
    prompt: &str,
    default: bool,
) -> Result<bool, CommandError> {
    Confirm::with_theme(theme)
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(CommandError::from)
}

/// Free-form text; an empty answer is rejected.
pub fn prompt_text(theme: &ColorfulTheme, prompt: &str) -> Result<String, CommandError> {
    Input::<String>::with_theme(theme)
        .with_prompt(prompt)
        .validate_with(|value: &String| -> Result<(), &str> {
            if value.trim().is_empty() {
                Err("Value must not be empty")
            } else {
                Ok(())
            }
        })
        .interact_text()
        .map_err(CommandError::from)
}

/// Free-form text validated by `parse`.
pub fn prompt_parsed<T>(
    theme: &ColorfulTheme,
    prompt: &str,
    parse: fn(&str) -> Result<T, String>,
) -> Result<T, CommandError> {
    let raw = Input::<String>::with_theme(theme)
        .with_prompt(prompt)
        .validate_with(|value: &String| -> Result<(), String> { parse(value).map(|_| ()) })
        .interact_text()
        .map_err(CommandError::from)?;
    parse(&raw).map_err(CommandError::InvalidArguments)
}

/// Single choice from `items`, returning its index.
pub fn select_index(
    theme: &ColorfulTheme,
    prompt: &str,
    items: &[String],
    default: usize,
) -> Result<usize, CommandError> {
    Select::with_theme(theme)
        .with_prompt(prompt)
        .items(items)
        .default(default.min(items.len().saturating_sub(1)))
        .interact()
        .map_err(CommandError::from)
}
