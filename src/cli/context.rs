//! Shared runtime state for shell commands, plus dispatch and error reporting.

use std::{io, sync::Arc};

use chrono::NaiveDate;
use dialoguer::theme::ColorfulTheme;
use outlay_config::Config;
use outlay_core::{Clock, CoreError, CurrencyFormat, ExpenseStore, SystemClock, ValidationErrors};
use outlay_domain::Expense;
use outlay_storage_json::JsonBookStorage;
use strsim::levenshtein;

use super::{
    commands,
    io as cli_io,
    output::{self, OutputPreferences},
    registry::{CommandEntry, CommandRegistry},
};
use crate::{utils::settings::load_config, OutlayError};

/// Book owner used by the terminal shell.
pub const LOCAL_OWNER: &str = "local";

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
    Validation(ValidationErrors),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<ValidationErrors> for CommandError {
    fn from(errors: ValidationErrors) -> Self {
        CommandError::Validation(errors)
    }
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub store: ExpenseStore<JsonBookStorage>,
    pub config: Config,
    pub clock: Arc<dyn Clock>,
    pub currency: CurrencyFormat,
    pub theme: ColorfulTheme,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, OutlayError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let (_, config) = load_config()?;
        output::set_preferences(OutputPreferences {
            color: config.ui_color_enabled && mode == CliMode::Interactive,
            plain_labels: false,
        });

        let storage = JsonBookStorage::new(config.resolve_data_dir())?;
        let store = ExpenseStore::open(LOCAL_OWNER, Arc::new(storage))?;
        let currency = CurrencyFormat::new(config.currency_symbol.clone());

        Ok(Self {
            mode,
            registry,
            store,
            config,
            clock: Arc::new(SystemClock),
            currency,
            theme: ColorfulTheme::default(),
            running: true,
        })
    }

    pub(crate) fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub(crate) fn money(&self, amount: f64) -> String {
        self.currency.format(amount)
    }

    pub(crate) fn prompt(&self) -> String {
        format!("outlay ({} expenses)> ", self.store.snapshot().expenses.len())
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    /// Resolves an id prefix against the current snapshot.
    pub(crate) fn find_expense(&self, prefix: &str) -> Result<Expense, CommandError> {
        self.store
            .snapshot()
            .expense_by_prefix(prefix)
            .cloned()
            .ok_or_else(|| {
                CommandError::InvalidArguments(format!(
                    "no single expense matches id `{}`",
                    prefix
                ))
            })
    }

    /// Asks before destructive actions; script mode always proceeds.
    pub(crate) fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, prompt, false)
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let mut suggestions: Vec<_> = self
            .registry
            .names()
            .map(|key| (levenshtein(key, &input.to_lowercase()), key))
            .collect();
        suggestions.sort_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = suggestions.first() {
            if *distance <= 3 {
                cli_io::print_info(format!("Suggestion: `{}`?", best));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, "Exit shell?", true)
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(message);
                cli_io::print_hint("Use `help <command>` for usage details.");
            }
            CommandError::Validation(errors) => {
                for error in &errors.errors {
                    cli_io::print_error(format!("{}: {}", error.field, error.message));
                }
            }
            CommandError::Core(err) if err.is_not_found() => {
                cli_io::print_error(err.to_string());
                cli_io::print_hint("Run `expenses` or `budgets` to see what exists.");
            }
            other => cli_io::print_error(other.to_string()),
        }
    }
}
