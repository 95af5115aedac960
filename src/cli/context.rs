//! Shell state shared by every command handler.

use std::{io, sync::Arc, time::Duration};

use chrono::{DateTime, Utc};
use dialoguer::theme::ColorfulTheme;
use financia_ai::{Advisor, AiError, DisabledModel, GeminiClient, GenerativeModel};
use financia_config::{app_data_dir, Config, ConfigError, ConfigManager};
use financia_core::{
    Clock, CoreError, LoadReport, LoadSource, SummaryService, TransactionStore, TypeFilter,
};
use financia_domain::{AIInsight, CategoryCatalog, TransactionDraft, TransactionId};
use financia_storage_json::JsonSlotStorage;
use strsim::levenshtein;
use tracing::warn;

use crate::cli::{
    commands,
    format::{format_currency, LocaleFormat},
    io as cli_io,
    jobs::AdvisorJobs,
    output::{self, OutputPreferences},
    registry::{CommandEntry, CommandRegistry},
};
use crate::errors::CliError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Ai(#[from] AiError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

/// Wall-clock time source for the shell.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub theme: ColorfulTheme,
    pub store: TransactionStore,
    pub catalog: CategoryCatalog,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub jobs: AdvisorJobs,
    /// Latest natural-language draft awaiting `draft accept`.
    pub pending_draft: Option<TransactionDraft>,
    pub last_insight: Option<AIInsight>,
    /// Ids in the order of the most recent `list`, for `@n` references.
    pub last_listing: Vec<TransactionId>,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::with_base_dir(app_data_dir())?;
        let config = match config_manager.load() {
            Ok(config) => config,
            Err(err) => {
                warn!(path = %config_manager.config_path().display(), error = %err, "config unreadable");
                cli_io::print_warning(format!(
                    "Configuration could not be read ({err}); using defaults."
                ));
                Config::default()
            }
        };
        apply_output_preferences(&config, mode);

        let catalog = CategoryCatalog::default();
        let storage = JsonSlotStorage::new(config.resolve_data_dir(), &config.storage_slot)?;
        let (store, report) = TransactionStore::load(Box::new(storage), Arc::new(SystemClock));
        let jobs = AdvisorJobs::new(
            build_advisor(&config, &catalog),
            mode == CliMode::Interactive,
        );

        let context = ShellContext {
            mode,
            registry: CommandRegistry::new(commands::all_definitions()),
            theme: ColorfulTheme::default(),
            store,
            catalog,
            config_manager,
            config,
            jobs,
            pending_draft: None,
            last_insight: None,
            last_listing: Vec::new(),
            running: true,
        };
        context.report_load(&report);
        Ok(context)
    }

    fn report_load(&self, report: &LoadReport) {
        match report.source {
            LoadSource::Stored => cli_io::print_info(format!(
                "Loaded {} transaction(s) from {}.",
                report.count,
                self.store.storage_location()
            )),
            LoadSource::Seed => {
                cli_io::print_info("No saved transactions found; starting with sample data.")
            }
            LoadSource::Recovered => cli_io::print_warning(
                "Saved transactions could not be read; starting with sample data.",
            ),
        }
        for warning in &report.warnings {
            cli_io::print_warning(warning);
        }
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub fn prompt(&self) -> String {
        let running = self.jobs.in_flight();
        if running.is_empty() {
            "financia> ".to_string()
        } else {
            format!("financia [{}…]> ", running.join(", "))
        }
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let Some(handler) = self.registry.handler(command) else {
            self.suggest_command(raw);
            return Ok(LoopControl::Continue);
        };
        match handler(self, args) {
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{input}`. Type `help` to see available commands."
        ));
        let needle = input.to_lowercase();
        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, &needle), name))
            .min_by_key(|(distance, _)| *distance);
        if let Some((distance, name)) = best {
            if distance <= 3 {
                cli_io::print_hint(format!("Did you mean `{name}`?"));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, "Exit Financia?", true)
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(message);
                cli_io::print_hint("Use `help <command>` for usage details.");
            }
            CommandError::Ai(AiError::Busy(kind)) => {
                cli_io::print_warning(format!(
                    "An {kind} request is already running; wait for it to finish."
                ));
            }
            CommandError::Core(CoreError::Validation(message)) => {
                cli_io::print_error(format!("Invalid transaction: {message}"));
            }
            other => cli_io::print_error(other),
        }
    }

    /// Prints advisory results that completed in the background.
    pub fn drain_jobs(&mut self) {
        for outcome in self.jobs.drain() {
            commands::advisor::apply_outcome(self, outcome);
        }
    }

    pub fn is_interactive(&self) -> bool {
        self.mode == CliMode::Interactive
    }

    pub fn locale_format(&self) -> LocaleFormat {
        LocaleFormat::for_locale(&self.config.locale)
    }

    pub fn money(&self, amount: f64) -> String {
        format_currency(amount, &self.config.currency, &self.locale_format())
    }

    /// Resolves an id or an `@n` position from the latest listing.
    pub(crate) fn resolve_reference(&self, reference: &str) -> Result<TransactionId, CommandError> {
        if let Some(index) = reference.strip_prefix('@') {
            let position = index
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| {
                    CommandError::InvalidArguments(format!(
                        "`{reference}` is not a valid listing position"
                    ))
                })?;
            return self
                .listing_ids()
                .get(position - 1)
                .cloned()
                .ok_or_else(|| {
                    CommandError::InvalidArguments(format!(
                        "No transaction at position {position}; run `list` to see positions."
                    ))
                });
        }
        let id = TransactionId::new(reference);
        if self.store.get(&id).is_some() {
            Ok(id)
        } else {
            Err(CoreError::TransactionNotFound(id).into())
        }
    }

    fn listing_ids(&self) -> Vec<TransactionId> {
        if !self.last_listing.is_empty() {
            return self.last_listing.clone();
        }
        SummaryService::filter_and_sort(self.store.list(), TypeFilter::All, "")
            .into_iter()
            .map(|txn| txn.id.clone())
            .collect()
    }

    /// Warns when the write-through of the last mutation failed.
    pub(crate) fn warn_on_persist_failure(&self) {
        if let Some(message) = self.store.last_persist_error() {
            cli_io::print_warning(format!(
                "Change kept in memory but not saved: {message}. Use `save` to retry."
            ));
        }
    }

    pub(crate) fn persist_config(&self) -> CommandResult {
        self.config_manager.save(&self.config)?;
        Ok(())
    }

    /// Re-applies settings that affect output or the advisor.
    pub(crate) fn refresh_from_config(&mut self) {
        apply_output_preferences(&self.config, self.mode);
        self.jobs
            .set_advisor(build_advisor(&self.config, &self.catalog));
    }
}

pub fn build_advisor(config: &Config, catalog: &CategoryCatalog) -> Advisor {
    let model: Arc<dyn GenerativeModel> = if config.ai.enabled {
        Arc::new(
            GeminiClient::new(
                &config.ai.endpoint,
                &config.ai.model,
                config.ai.resolve_api_key(),
                Duration::from_secs(config.ai.timeout_secs),
            )
            .with_key_hint(&config.ai.api_key_env),
        )
    } else {
        Arc::new(DisabledModel)
    };
    Advisor::new(model, catalog.clone(), config.locale.clone())
}

fn apply_output_preferences(config: &Config, mode: CliMode) {
    output::set_preferences(OutputPreferences {
        color_enabled: config.ui_color_enabled && mode == CliMode::Interactive,
        plain_mode: mode == CliMode::Script,
    });
}
