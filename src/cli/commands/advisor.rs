use colored::Colorize;
use financia_core::{Clock, DraftService};
use financia_domain::{AIInsight, InsightPriority, TransactionDraft, TransactionType};

use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::format::parse_amount;
use crate::cli::io;
use crate::cli::jobs::{JobOutcome, Submission};
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;

use super::transaction;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "insight",
            "Ask the advisor for a tip about your transactions",
            "insight [show]",
            cmd_insight,
        ),
        CommandEntry::new(
            "parse",
            "Turn a sentence into a draft transaction",
            "parse <text...>",
            cmd_parse,
        ),
        CommandEntry::new(
            "draft",
            "Review, record or drop the parsed draft",
            "draft [show|accept|discard]",
            cmd_draft,
        ),
    ]
}

fn cmd_insight(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {}
        [sub] if sub.eq_ignore_ascii_case("show") => {
            match &context.last_insight {
                Some(insight) => render_insight(insight),
                None => io::print_info("No insight yet. Run `insight` to request one."),
            }
            return Ok(());
        }
        _ => return Err(CommandError::InvalidArguments("usage: insight [show]".into())),
    }

    if context.store.is_empty() {
        io::print_info("Add a transaction before asking for an insight.");
        return Ok(());
    }
    hint_unavailable(context);
    let submission = context.jobs.submit_insight(context.store.list().to_vec())?;
    handle_submission(context, submission, "Requesting insight");
    Ok(())
}

fn cmd_parse(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let text = args.join(" ");
    if text.trim().is_empty() {
        return Err(CommandError::InvalidArguments("usage: parse <text...>".into()));
    }
    hint_unavailable(context);
    let submission = context.jobs.submit_parse(text)?;
    handle_submission(context, submission, "Parsing");
    Ok(())
}

fn cmd_draft(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let action = args.first().map(|a| a.to_lowercase());
    match action.as_deref() {
        None | Some("show") => {
            match &context.pending_draft {
                Some(draft) => render_draft(context, draft),
                None => io::print_info("No pending draft. Use `parse <text>` to create one."),
            }
            Ok(())
        }
        Some("accept") => accept_draft(context),
        Some("discard") => {
            if context.pending_draft.take().is_some() {
                io::print_success("Draft discarded.");
            } else {
                io::print_info("No pending draft.");
            }
            Ok(())
        }
        Some(other) => Err(CommandError::InvalidArguments(format!(
            "unknown draft action `{other}` (use show, accept or discard)"
        ))),
    }
}

fn accept_draft(context: &mut ShellContext) -> CommandResult {
    let Some(mut draft) = context.pending_draft.clone() else {
        return Err(CommandError::Message(
            "No pending draft. Use `parse <text>` to create one.".into(),
        ));
    };
    if context.is_interactive() {
        if draft.description.is_none() {
            draft.description = Some(io::prompt_text(&context.theme, "Description")?);
        }
        if draft.amount.is_none() {
            draft.amount = Some(io::prompt_parsed(&context.theme, "Amount", parse_amount)?);
        }
    }
    let entry = DraftService::resolve(&draft, &context.catalog, context.store.clock().now())?;
    transaction::record(context, entry)?;
    context.pending_draft = None;
    Ok(())
}

fn hint_unavailable(context: &ShellContext) {
    let ai = &context.config.ai;
    if !ai.enabled {
        io::print_hint("AI assistance is disabled (`config set ai.enabled true`).");
    } else if ai.resolve_api_key().is_none() {
        io::print_hint(format!(
            "No API key found in {}; the advisor cannot be reached.",
            ai.api_key_env
        ));
    }
}

fn handle_submission(context: &mut ShellContext, submission: Submission, label: &str) {
    match submission {
        Submission::Started => io::print_info(format!(
            "{label} in the background; the result will appear before the next prompt."
        )),
        Submission::Completed(outcome) => apply_outcome(context, outcome),
    }
}

/// Stores and prints a finished advisory request.
pub(crate) fn apply_outcome(context: &mut ShellContext, outcome: JobOutcome) {
    match outcome {
        JobOutcome::Insight(insight) => {
            render_insight(&insight);
            context.last_insight = Some(insight);
        }
        JobOutcome::Draft {
            draft: Some(draft), ..
        } => {
            render_draft(context, &draft);
            io::print_hint("Use `draft accept` to record it or `draft discard` to drop it.");
            context.pending_draft = Some(draft);
        }
        JobOutcome::Draft { input, draft: None } => io::print_warning(format!(
            "Could not extract a transaction from \"{input}\". Use `add` to enter it manually."
        )),
    }
}

fn render_insight(insight: &AIInsight) {
    output_section(format!("Insight: {}", insight.title));
    io::print_info(format!("  {}", insight.message));
    io::print_info(format!("  Suggestion: {}", insight.suggestion));
    let priority = match insight.priority {
        InsightPriority::High => insight.priority.as_str().red().bold(),
        InsightPriority::Medium => insight.priority.as_str().yellow(),
        InsightPriority::Low => insight.priority.as_str().normal(),
    };
    io::print_info(format!("  Priority: {priority}"));
}

fn render_draft(context: &ShellContext, draft: &TransactionDraft) {
    let missing = || "(missing)".dimmed().to_string();
    output_section("Draft transaction");
    io::print_info(format!(
        "  Description: {}",
        draft.description.clone().unwrap_or_else(missing)
    ));
    io::print_info(format!(
        "  Amount     : {}",
        draft
            .amount
            .map(|amount| context.money(amount))
            .unwrap_or_else(missing)
    ));
    io::print_info(format!(
        "  Type       : {}",
        match draft.kind {
            Some(kind) => kind.to_string(),
            None => format!("{} (default)", TransactionType::default()),
        }
    ));
    let category = DraftService::category_for(draft, &context.catalog);
    let note = match &draft.category {
        Some(_) if context.catalog.contains(&category) => "",
        Some(_) => " (not in catalog)",
        None => " (default)",
    };
    io::print_info(format!("  Category   : {category}{note}"));
}
