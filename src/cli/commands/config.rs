use financia_config::Config;

use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::{self, section as output_section};
use crate::cli::registry::CommandEntry;
use crate::cli::ui::table::{Table, TableColumn};

/// Keys read only when the shell starts.
const RESTART_KEYS: [&str; 2] = ["storage_slot", "data_dir"];

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "Show or change preferences",
        "config [show | set <key> <value>]",
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => show(context),
        [sub] if sub.eq_ignore_ascii_case("show") => show(context),
        [sub, key, value @ ..] if sub.eq_ignore_ascii_case("set") => {
            set(context, key, &value.join(" "))
        }
        _ => Err(CommandError::InvalidArguments(
            "usage: config [show | set <key> <value>]".into(),
        )),
    }
}

fn show(context: &ShellContext) -> CommandResult {
    let mut table = Table::new(vec![TableColumn::left("Key"), TableColumn::left("Value")]);
    for key in Config::KEYS {
        table.push_row(vec![key.to_string(), context.config.get(key)?]);
    }
    let key_status = if context.config.ai.resolve_api_key().is_some() {
        "present"
    } else {
        "missing"
    };
    table.push_row(vec![
        "ai.api_key".into(),
        format!("{key_status} (from {})", context.config.ai.api_key_env),
    ]);
    output_section("Configuration");
    output::raw(table.render());
    io::print_info(format!(
        "Stored at {}",
        context.config_manager.config_path().display()
    ));
    Ok(())
}

fn set(context: &mut ShellContext, key: &str, value: &str) -> CommandResult {
    let mut updated = context.config.clone();
    updated.set(key, value)?;
    context.config = updated;
    context.persist_config()?;
    context.refresh_from_config();
    io::print_success(format!("{key} = {}", context.config.get(key)?));
    if RESTART_KEYS.contains(&key) {
        io::print_hint("This setting takes effect the next time Financia starts.");
    }
    Ok(())
}
