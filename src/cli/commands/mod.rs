pub mod advisor;
pub mod config;
pub mod report;
pub mod system;
pub mod transaction;

use crate::cli::registry::CommandEntry;

pub(crate) fn all_definitions() -> Vec<CommandEntry> {
    let mut commands = Vec::new();
    commands.extend(system::definitions());
    commands.extend(transaction::definitions());
    commands.extend(report::definitions());
    commands.extend(advisor::definitions());
    commands.extend(config::definitions());
    commands
}
