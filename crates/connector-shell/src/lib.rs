//! Connector Shell
//!
//! Command-line front end over [`connector_validation`]: loads connectors,
//! connections and jobs from a repository document, lets an operator clone or
//! update them through a correction session on the terminal, and saves the
//! result once it validates.
//!
//! ## Modules
//!
//! - `config`: defaults, TOML file and `CONNECTOR_SHELL_*` overrides
//! - `repository`: the [`Repository`] seam and its file-backed implementation
//! - `console`: terminal collaborator and the edit pass limit
//! - `shell`: clone, update and validate over repository entities
//! - `cli`: argument parsing, output rendering and exit codes

pub mod cli;
pub mod config;
pub mod console;
pub mod error;
pub mod repository;
pub mod shell;

pub use cli::{ExitCode, OutputFormat, ShellCli, ShellCommands};
pub use config::{ShellConfig, ShellConfigBuilder};
pub use console::{AttemptLimit, ConsoleIo};
pub use error::{Result, ShellError};
pub use repository::{ConnectorRecord, FileRepository, Repository, RepositoryDocument};
pub use shell::{Managed, Shell};

/// Run the CLI and map any error to an exit code
///
/// # Example
///
/// ```rust,no_run
/// use clap::Parser;
/// use connector_shell::{run_cli, ShellCli};
///
/// fn main() {
///     let cli = ShellCli::parse();
///     let exit_code = run_cli(cli);
///     std::process::exit(exit_code.into());
/// }
/// ```
pub fn run_cli(cli: ShellCli) -> ExitCode {
    match cli::run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from_error(&e)
        }
    }
}
