use std::path::PathBuf;

use dialoguer::{theme::ColorfulTheme, Confirm};
use strsim::levenshtein;
use thiserror::Error;

use crate::cli::output;
use crate::cli::CliError;
use crate::config::{Config, ConfigManager};
use crate::core::services::OrderService;
use crate::core::BookingWizard;
use crate::errors::BookingError;
use crate::storage::JsonOrderStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub enum LoopControl {
    Continue,
    Exit,
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("No booking in progress. Use `start <service> <tailor>` first.")]
    NoActiveBooking,
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Core(#[from] BookingError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
}

/// Runtime state of one shell: configuration, the order service and the
/// wizard currently being filled in, if any.
pub struct ShellContext {
    pub mode: CliMode,
    pub running: bool,
    pub config: Config,
    pub orders: OrderService,
    pub wizard: Option<BookingWizard>,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::with_base_dir(mode, None)
    }

    /// Builds a context whose config and orders live under `base`, or the default home.
    pub fn with_base_dir(mode: CliMode, base: Option<PathBuf>) -> Result<Self, CliError> {
        let config_manager = match &base {
            Some(dir) => ConfigManager::with_base_dir(dir.clone())?,
            None => ConfigManager::new()?,
        };
        let config = config_manager.load()?;
        let store = JsonOrderStore::new(base)?;
        tracing::debug!(orders = %store.orders_dir().display(), ?mode, "shell context ready");
        Ok(Self {
            mode,
            running: true,
            config,
            orders: OrderService::new(Box::new(store)),
            wizard: None,
        })
    }

    pub fn prompt(&self) -> String {
        let location = match &self.wizard {
            Some(wizard) => match wizard.current_step() {
                Some(step) => format!("{}/{}", wizard.tailor_id(), step.label().to_lowercase()),
                None if wizard.measurement_form().is_some() => {
                    format!("{}/measurements-input", wizard.tailor_id())
                }
                None => wizard.tailor_id().to_string(),
            },
            None => "no booking".to_string(),
        };
        format!("atelier [{location}] ⮞ ")
    }

    pub fn wizard_mut(&mut self) -> Result<&mut BookingWizard, CommandError> {
        self.wizard.as_mut().ok_or(CommandError::NoActiveBooking)
    }

    pub fn wizard_ref(&self) -> Result<&BookingWizard, CommandError> {
        self.wizard.as_ref().ok_or(CommandError::NoActiveBooking)
    }

    pub fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("Exit shell?")
            .default(false)
            .interact()?;
        Ok(confirmed)
    }

    pub fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help` for usage details.");
            }
            CommandError::NoActiveBooking => {
                output::error(err.to_string());
                output::hint("Try `start tailored-suit tailor-42`.");
            }
            other => output::error(other.to_string()),
        }
        Ok(())
    }

    pub fn suggest(&self, input: &str, candidates: &[&str]) {
        let mut ranked: Vec<_> = candidates
            .iter()
            .map(|candidate| (levenshtein(candidate, input), *candidate))
            .collect();
        ranked.sort_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = ranked.first() {
            if *distance <= 3 {
                output::hint(format!("Did you mean `{best}`?"));
            }
        }
    }
}
