use colored::Colorize;
use financia_core::{CategoryService, SummaryService};
use financia_domain::TransactionType;

use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::{self, current_preferences, section as output_section};
use crate::cli::registry::CommandEntry;
use crate::cli::ui::table::{Table, TableColumn};

const BAR_WIDTH: usize = 20;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "summary",
            "Show total income, expenses and balance",
            "summary",
            cmd_summary,
        ),
        CommandEntry::new(
            "categories",
            "Show the category catalog with expense totals",
            "categories",
            cmd_categories,
        ),
        CommandEntry::new(
            "recent",
            "Chart the most recently added transactions",
            "recent [count]",
            cmd_recent,
        ),
    ]
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let summary = SummaryService::compute_summary(context.store.list());
    output_section("Summary");
    io::print_info(format!("  Income   : {}", context.money(summary.income).green()));
    io::print_info(format!("  Expenses : {}", context.money(summary.expenses).red()));
    let balance = context.money(summary.balance);
    if summary.is_negative() {
        io::print_info(format!("  Balance  : {}", balance.red().bold()));
        io::print_warning("Expenses exceed income.");
    } else {
        io::print_info(format!("  Balance  : {}", balance.bold()));
    }
    Ok(())
}

fn cmd_categories(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let transactions = context.store.list();
    let totals = SummaryService::category_totals(transactions, &context.catalog);
    let expenses = SummaryService::compute_summary(transactions).expenses;

    let mut table = Table::new(vec![
        TableColumn::left("Category"),
        TableColumn::left("Icon"),
        TableColumn::right("Spent"),
        TableColumn::right("Share"),
    ]);
    for category in context.catalog.entries() {
        let total = totals
            .iter()
            .find(|entry| entry.name == category.name)
            .map(|entry| entry.total);
        let (spent, share) = match total {
            Some(total) if expenses > 0.0 => (
                context.money(total),
                format!("{:.1}%", total / expenses * 100.0),
            ),
            Some(total) => (context.money(total), "-".to_string()),
            None => ("-".to_string(), "-".to_string()),
        };
        table.push_row(vec![
            category.name.clone(),
            category.icon.clone(),
            spent,
            share,
        ]);
    }
    output_section("Categories");
    output::raw(table.render());

    let unmatched = CategoryService::unmatched(transactions, &context.catalog);
    if !unmatched.is_empty() {
        io::print_hint(format!(
            "Not in the catalog and left out of the totals: {}",
            unmatched.join(", ")
        ));
    }
    Ok(())
}

fn cmd_recent(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let window = match args.first() {
        Some(raw) => raw
            .parse::<usize>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| {
                CommandError::InvalidArguments(format!("`{raw}` is not a positive count"))
            })?,
        None => context.config.recent_window,
    };
    let points = SummaryService::recent_activity(context.store.list(), window);
    if points.is_empty() {
        io::print_info("No transactions yet.");
        return Ok(());
    }

    let peak = points.iter().map(|p| p.amount).fold(0.0_f64, f64::max);
    let bar_char = if current_preferences().plain_mode { '#' } else { '█' };
    let mut table = Table::new(vec![
        TableColumn::left("Label"),
        TableColumn::right("Amount"),
        TableColumn::left("Flow"),
    ]);
    for point in &points {
        let length = if peak > 0.0 {
            ((point.amount / peak) * BAR_WIDTH as f64).round() as usize
        } else {
            0
        };
        let bar = bar_char.to_string().repeat(length.max(1));
        let (amount, bar) = match point.kind {
            TransactionType::Income => (
                format!("+{}", context.money(point.amount)).green().to_string(),
                bar.green().to_string(),
            ),
            TransactionType::Expense => (
                format!("-{}", context.money(point.amount)).red().to_string(),
                bar.red().to_string(),
            ),
        };
        table.push_row(vec![point.label.clone(), amount, bar]);
    }
    output_section(format!("Recent activity (last {})", points.len()));
    output::raw(table.render());
    Ok(())
}
