use colored::Colorize;
use financia_core::{CategoryService, Clock, CoreError, SummaryService, TypeFilter};
use financia_domain::{Displayable, NewTransaction, Transaction, TransactionType};

use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::format::{format_date, parse_amount};
use crate::cli::io;
use crate::cli::output::{self, section as output_section};
use crate::cli::registry::CommandEntry;
use crate::cli::ui::table::{flexible_width, Table, TableColumn};

const ADD_USAGE: &str = "add [<description> <amount> [income|expense] [category]]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "add",
            "Record a transaction (opens a form when no arguments are given)",
            ADD_USAGE,
            cmd_add,
        ),
        CommandEntry::new(
            "remove",
            "Delete a transaction",
            "remove <id|@position>",
            cmd_remove,
        ),
        CommandEntry::new(
            "list",
            "List transactions, newest first",
            "list [all|income|expense] [search text]",
            cmd_list,
        ),
        CommandEntry::new(
            "show",
            "Show one transaction in detail",
            "show <id|@position>",
            cmd_show,
        ),
        CommandEntry::new("save", "Write all transactions to storage", "save", cmd_save),
    ]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let entry = if args.is_empty() {
        if !context.is_interactive() {
            return Err(CommandError::InvalidArguments(format!("usage: {ADD_USAGE}")));
        }
        prompt_entry(context)?
    } else {
        entry_from_args(context, args)?
    };
    record(context, entry)
}

/// Adds `entry` to the store and reports the outcome.
pub(crate) fn record(context: &mut ShellContext, entry: NewTransaction) -> CommandResult {
    let summary = format!(
        "{} {} `{}` in {}",
        entry.kind,
        context.money(entry.amount),
        entry.description.trim(),
        entry.category
    );
    let id = context.store.add(entry)?;
    context.last_listing.clear();
    io::print_success(format!("Added {summary} (id {id})."));
    context.warn_on_persist_failure();
    Ok(())
}

fn entry_from_args(context: &ShellContext, args: &[&str]) -> Result<NewTransaction, CommandError> {
    let [description, amount, rest @ ..] = args else {
        return Err(CommandError::InvalidArguments(format!("usage: {ADD_USAGE}")));
    };
    let amount = parse_amount(amount).map_err(CommandError::InvalidArguments)?;
    let kind = match rest.first() {
        Some(value) => value
            .parse::<TransactionType>()
            .map_err(|err| CommandError::InvalidArguments(err.to_string()))?,
        None => TransactionType::default(),
    };
    let category = match rest.get(1..) {
        Some(words) if !words.is_empty() => resolve_category(context, &words.join(" "))?,
        _ => default_category(context),
    };
    Ok(NewTransaction::new(
        *description,
        amount,
        kind,
        category,
        context.store.clock().now(),
    ))
}

fn prompt_entry(context: &ShellContext) -> Result<NewTransaction, CommandError> {
    let description = io::prompt_text(&context.theme, "Description")?;
    let amount = io::prompt_parsed(&context.theme, "Amount", parse_amount)?;
    let kinds = vec!["Expense".to_string(), "Income".to_string()];
    let kind = match io::select_index(&context.theme, "Type", &kinds, 0)? {
        1 => TransactionType::Income,
        _ => TransactionType::Expense,
    };
    let entries = context.catalog.entries();
    let labels: Vec<String> = entries.iter().map(Displayable::display_label).collect();
    let choice = io::select_index(&context.theme, "Category", &labels, 0)?;
    let category = entries
        .get(choice)
        .map(|category| category.name.clone())
        .unwrap_or_else(|| default_category(context));
    Ok(NewTransaction::new(
        description.trim(),
        amount,
        kind,
        category,
        context.store.clock().now(),
    ))
}

fn resolve_category(context: &ShellContext, name: &str) -> Result<String, CommandError> {
    CategoryService::resolve_name(&context.catalog, name)
        .map(|category| category.name.clone())
        .ok_or_else(|| {
            let names: Vec<&str> = context.catalog.names().collect();
            CommandError::InvalidArguments(format!(
                "Unknown category `{name}`. Available: {}",
                names.join(", ")
            ))
        })
}

fn default_category(context: &ShellContext) -> String {
    context
        .catalog
        .first()
        .map(|category| category.name.clone())
        .unwrap_or_default()
}

fn cmd_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let reference = single_reference(args, "remove <id|@position>")?;
    let id = context.resolve_reference(reference)?;
    if context.is_interactive() {
        let label = context
            .store
            .get(&id)
            .map(Displayable::display_label)
            .unwrap_or_else(|| id.to_string());
        if !io::confirm_action(&context.theme, &format!("Remove {label}?"), true)? {
            io::print_info("Nothing removed.");
            return Ok(());
        }
    }
    let removed = context.store.remove(&id)?;
    context.last_listing.clear();
    io::print_success(format!(
        "Removed `{}` ({}).",
        removed.description,
        context.money(removed.amount)
    ));
    context.warn_on_persist_failure();
    Ok(())
}

fn cmd_show(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let reference = single_reference(args, "show <id|@position>")?;
    let id = context.resolve_reference(reference)?;
    let Some(txn) = context.store.get(&id) else {
        return Err(CoreError::TransactionNotFound(id).into());
    };
    let category = context.catalog.display_for(&txn.category);
    let locale = context.locale_format();
    output_section(format!("Transaction {}", txn.id));
    io::print_info(format!("  Description: {}", txn.description));
    io::print_info(format!("  Amount     : {}", signed_amount(context, txn)));
    io::print_info(format!("  Type       : {}", txn.kind));
    io::print_info(format!("  Category   : {} [{}]", txn.category, category.icon));
    io::print_info(format!(
        "  Date       : {} ({})",
        format_date(&locale, &txn.date),
        txn.date.to_rfc3339()
    ));
    Ok(())
}

fn cmd_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (filter, terms) = match args.split_first() {
        Some((first, rest)) => match first.parse::<TypeFilter>() {
            Ok(filter) => (filter, rest),
            Err(_) => (TypeFilter::All, args),
        },
        None => (TypeFilter::All, args),
    };
    let search = terms.join(" ");

    let locale = context.locale_format();
    let mut table = Table::new(vec![
        TableColumn::right("#"),
        TableColumn::left("Date"),
        TableColumn::left("Description").max_width(flexible_width(70, 16).min(48)),
        TableColumn::left("Category"),
        TableColumn::left("Type"),
        TableColumn::right("Amount"),
    ]);
    let mut ids = Vec::new();
    for (idx, txn) in SummaryService::filter_and_sort(context.store.list(), filter, &search)
        .into_iter()
        .enumerate()
    {
        ids.push(txn.id.clone());
        table.push_row(vec![
            format!("@{}", idx + 1),
            format_date(&locale, &txn.date),
            txn.description.clone(),
            txn.category.clone(),
            txn.kind.to_string(),
            signed_amount(context, txn),
        ]);
    }
    context.last_listing = ids;

    if table.is_empty() {
        io::print_info("No transactions match.");
        return Ok(());
    }
    let mut title = format!("Transactions ({}", table.rows.len());
    if filter != TypeFilter::All {
        title.push_str(&format!(", {filter}"));
    }
    if !search.trim().is_empty() {
        title.push_str(&format!(", matching \"{}\"", search.trim()));
    }
    title.push(')');
    output_section(title);
    output::raw(table.render());
    Ok(())
}

fn cmd_save(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.store.save()?;
    io::print_success(format!(
        "Saved {} transaction(s) to {}.",
        context.store.len(),
        context.store.storage_location()
    ));
    Ok(())
}

fn single_reference<'a>(args: &[&'a str], usage: &str) -> Result<&'a str, CommandError> {
    match args {
        [reference] => Ok(*reference),
        _ => Err(CommandError::InvalidArguments(format!("usage: {usage}"))),
    }
}

/// `+R$ 5.000,00` in green for income, `-R$ 450,00` in red for expenses.
pub(crate) fn signed_amount(context: &ShellContext, txn: &Transaction) -> String {
    let text = format!("{}{}", txn.kind.sign(), context.money(txn.amount));
    match txn.kind {
        TransactionType::Income => text.green().to_string(),
        TransactionType::Expense => text.red().to_string(),
    }
}
