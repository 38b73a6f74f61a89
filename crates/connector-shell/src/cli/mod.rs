//! CLI module for the connector shell
//!
//! This module wires configuration, the repository document and the terminal
//! together and dispatches to the clone, update and validate commands.

pub mod commands;
pub mod output;

pub use commands::{ConfigOverrides, EntityTarget, ShellCli, ShellCommands};
pub use output::{OutputFormat, ReportOutput};

use tracing::debug;

use connector_validation::{InteractiveIo, Severity};

use crate::config::ShellConfig;
use crate::console::{AttemptLimit, ConsoleIo};
use crate::error::ShellError;
use crate::repository::FileRepository;
use crate::shell::Shell;

/// Exit codes for CLI operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Successful execution; the configuration was accepted or is valid
    Success = 0,
    /// Validation found unacceptable values
    ValidationFailed = 1,
    /// The operator cancelled the edit, nothing was saved
    Aborted = 2,
    /// Invalid input or arguments
    InvalidInput = 3,
    /// File not found or inaccessible
    FileError = 4,
    /// Internal error
    InternalError = 10,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl ExitCode {
    /// Determine exit code from a report severity
    pub fn from_severity(severity: Severity) -> Self {
        if severity.may_proceed() {
            ExitCode::Success
        } else {
            ExitCode::ValidationFailed
        }
    }

    /// Exit code for an error that ended the run
    pub fn from_error(err: &ShellError) -> Self {
        match err {
            ShellError::FileError(_) => ExitCode::FileError,
            e if e.is_user_error() => ExitCode::InvalidInput,
            _ => ExitCode::InternalError,
        }
    }
}

/// Load the effective configuration for a parsed command line
pub fn resolve_config(cli: &ShellCli) -> Result<ShellConfig, ShellError> {
    let config = ShellConfig::load(cli.config.as_deref())?;
    Ok(cli.overrides.apply(config))
}

/// Run the CLI with the given arguments and return the exit code
pub fn run(cli: ShellCli) -> Result<ExitCode, ShellError> {
    let config = resolve_config(&cli)?;
    debug!(repository = %config.repository.display(), "Resolved configuration");

    let repository = FileRepository::open(&config.repository)?;
    let mut shell = Shell::from_config(repository, &config)?;

    match cli.command {
        ShellCommands::Clone { target } => {
            let mut io = terminal(&config);
            commands::execute_clone(&mut shell, target, io.as_mut())
        }
        ShellCommands::Update { target } => {
            let mut io = terminal(&config);
            commands::execute_update(&mut shell, target, io.as_mut())
        }
        ShellCommands::Validate { target, format } => {
            let mut stdout = std::io::stdout();
            commands::execute_validate(&shell, target, format, &mut stdout)
        }
    }
}

fn terminal(config: &ShellConfig) -> Box<dyn InteractiveIo> {
    match config.max_attempts {
        Some(max) => Box::new(AttemptLimit::new(ConsoleIo::stdio(), max)),
        None => Box::new(ConsoleIo::stdio()),
    }
}
