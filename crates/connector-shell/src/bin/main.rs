//! Connector Shell CLI
//!
//! # Usage
//!
//! ```bash
//! # Clone connection 3 and save the edited copy as a new connection
//! connector-shell --repository connectors.json clone connection --xid 3
//!
//! # Edit job 7 in place, giving up after five edit passes
//! connector-shell --max-attempts 5 update job --jid 7
//!
//! # Print the validation report of connection 3 as JSON
//! connector-shell validate connection -x 3 --format json
//! ```
//!
//! # Exit Codes
//!
//! - 0: Success - saved, or the configuration is valid
//! - 1: Validation failed
//! - 2: Edit cancelled, nothing saved
//! - 3: Invalid input or arguments
//! - 4: File not found or inaccessible
//! - 10: Internal error

use clap::Parser;
use connector_shell::{run_cli, ShellCli};
use tracing::Level;

fn main() {
    let cli = ShellCli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    // Prompts own stdout, logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let exit_code = run_cli(cli);
    std::process::exit(exit_code.into());
}
