//! CLI command definitions for the connector shell
//!
//! Provides Clap-based commands for cloning, updating and validating stored
//! connections and jobs.

use clap::{Args, Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;

use connector_validation::{Connection, InteractiveIo, Job, SessionSummary};

use super::output::{OutputFormat, ReportOutput};
use super::ExitCode;
use crate::config::{ShellConfig, ShellConfigBuilder};
use crate::error::Result;
use crate::repository::Repository;
use crate::shell::Shell;

/// Connector shell CLI
///
/// Edit stored connector configurations interactively. Every edit is
/// validated and re-prompted until the configuration is acceptable.
#[derive(Parser, Debug)]
#[command(name = "connector-shell")]
#[command(about = "Connector Shell - Edit and validate connector configurations", long_about = None)]
#[command(version)]
pub struct ShellCli {
    /// Output verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true, env = "CONNECTOR_SHELL_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: ConfigOverrides,

    #[command(subcommand)]
    pub command: ShellCommands,
}

/// Command line settings that take precedence over the configuration file
#[derive(Args, Debug, Default, Clone)]
pub struct ConfigOverrides {
    /// Repository document (json, yaml or toml)
    #[arg(short, long, global = true)]
    pub repository: Option<PathBuf>,

    /// Give up after this many edit passes
    #[arg(long, global = true)]
    pub max_attempts: Option<u32>,

    /// Reject job types a connector has no rules for
    #[arg(long, global = true)]
    pub strict_job_types: bool,
}

impl ConfigOverrides {
    /// Apply the overrides on top of a loaded configuration
    pub fn apply(&self, config: ShellConfig) -> ShellConfig {
        let mut builder = ShellConfigBuilder::from_config(config);
        if let Some(repository) = &self.repository {
            builder = builder.repository(repository.clone());
        }
        if let Some(max) = self.max_attempts {
            builder = builder.max_attempts(Some(max));
        }
        if self.strict_job_types {
            builder = builder.strict_job_types(true);
        }
        builder.build()
    }
}

/// Available shell commands
#[derive(Subcommand, Debug)]
pub enum ShellCommands {
    /// Clone a stored entity and save the edited copy as a new one
    Clone {
        #[command(subcommand)]
        target: EntityTarget,
    },

    /// Edit a stored entity in place
    Update {
        #[command(subcommand)]
        target: EntityTarget,
    },

    /// Validate a stored entity without editing it
    Validate {
        #[command(subcommand)]
        target: EntityTarget,

        /// Output format for the validation report
        #[arg(long, value_enum, default_value = "table", global = true)]
        format: OutputFormat,
    },
}

/// Entity a command operates on
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityTarget {
    /// A connection
    Connection {
        /// Persistence id of the connection
        #[arg(short = 'x', long = "xid")]
        xid: i64,
    },

    /// A job
    Job {
        /// Persistence id of the job
        #[arg(short = 'j', long = "jid")]
        jid: i64,
    },
}

impl EntityTarget {
    /// Subject line used in reports, e.g. "connection 3"
    pub fn subject(&self) -> String {
        match self {
            EntityTarget::Connection { xid } => format!("connection {}", xid),
            EntityTarget::Job { jid } => format!("job {}", jid),
        }
    }
}

/// Execute the clone command
pub fn execute_clone<R: Repository>(
    shell: &mut Shell<R>,
    target: EntityTarget,
    io: &mut dyn InteractiveIo,
) -> Result<ExitCode> {
    let summary = match target {
        EntityTarget::Connection { xid } => shell.clone_entity::<Connection>(xid, io)?,
        EntityTarget::Job { jid } => shell.clone_entity::<Job>(jid, io)?,
    };
    Ok(exit_code(&summary))
}

/// Execute the update command
pub fn execute_update<R: Repository>(
    shell: &mut Shell<R>,
    target: EntityTarget,
    io: &mut dyn InteractiveIo,
) -> Result<ExitCode> {
    let summary = match target {
        EntityTarget::Connection { xid } => shell.update_entity::<Connection>(xid, io)?,
        EntityTarget::Job { jid } => shell.update_entity::<Job>(jid, io)?,
    };
    Ok(exit_code(&summary))
}

/// Execute the validate command, rendering the report to `writer`
pub fn execute_validate<R: Repository, W: Write>(
    shell: &Shell<R>,
    target: EntityTarget,
    format: OutputFormat,
    writer: &mut W,
) -> Result<ExitCode> {
    let report = match target {
        EntityTarget::Connection { xid } => shell.validate_entity::<Connection>(xid)?,
        EntityTarget::Job { jid } => shell.validate_entity::<Job>(jid)?,
    };

    ReportOutput::from_report(target.subject(), &report).render_to(writer, format)?;
    Ok(ExitCode::from_severity(report.severity()))
}

fn exit_code(summary: &SessionSummary) -> ExitCode {
    if summary.is_accepted() {
        ExitCode::Success
    } else {
        ExitCode::Aborted
    }
}
