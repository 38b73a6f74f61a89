//! Output formatting for validation reports
//!
//! Renders a report as JSON, YAML or a human-readable table with
//! severity-based coloring.

use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use std::io::{self, Write};

use connector_validation::{Severity, ValidationMessage, ValidationReport};

use crate::error::{Result, ShellError};

/// Output format options for CLI results
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default)]
pub enum OutputFormat {
    /// Human-readable table format with colors
    #[default]
    Table,
    /// JSON format for machine processing
    Json,
    /// YAML format
    Yaml,
}

/// Report structure for rendering
#[derive(Debug, Clone, Serialize)]
pub struct ReportOutput {
    /// What was validated, e.g. "connection 12"
    pub subject: String,
    /// Rolled-up severity
    pub severity: Severity,
    /// Whether the configuration may be used as is
    pub may_proceed: bool,
    /// Number of messages
    pub message_count: usize,
    pub messages: Vec<MessageOutput>,
    pub summary: String,
}

/// Individual message output structure
#[derive(Debug, Clone, Serialize)]
pub struct MessageOutput {
    pub severity: Severity,
    pub form: String,
    pub field: String,
    pub text: String,
}

impl MessageOutput {
    pub fn from_message(message: &ValidationMessage) -> Self {
        Self {
            severity: message.severity,
            form: message.form.clone(),
            field: message.field.clone(),
            text: message.text.clone(),
        }
    }
}

impl ReportOutput {
    /// Create output from a validation report
    pub fn from_report(subject: impl Into<String>, report: &ValidationReport) -> Self {
        let summary = match (report.severity(), report.len()) {
            (Severity::Fine, _) => "Configuration is valid".to_string(),
            (Severity::Acceptable, count) => {
                format!("Configuration is acceptable with {} message(s)", count)
            }
            (Severity::Unacceptable, count) => {
                format!("Configuration is unacceptable with {} message(s)", count)
            }
        };

        Self {
            subject: subject.into(),
            severity: report.severity(),
            may_proceed: report.may_proceed(),
            message_count: report.len(),
            messages: report.messages().map(MessageOutput::from_message).collect(),
            summary,
        }
    }

    /// Render to stdout in the specified format
    pub fn render(&self, format: OutputFormat) -> Result<()> {
        let mut stdout = io::stdout();
        self.render_to(&mut stdout, format)?;
        stdout.flush()?;
        Ok(())
    }

    /// Render to any writer in the specified format
    pub fn render_to<W: Write>(&self, writer: &mut W, format: OutputFormat) -> Result<()> {
        match format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(self)
                    .map_err(|e| ShellError::SerializationError(e.to_string()))?;
                writeln!(writer, "{}", json)?;
            }
            OutputFormat::Yaml => {
                let yaml = serde_yaml::to_string(self)
                    .map_err(|e| ShellError::SerializationError(e.to_string()))?;
                writeln!(writer, "{}", yaml)?;
            }
            OutputFormat::Table => self.render_table(writer)?,
        }
        Ok(())
    }

    fn render_table<W: Write>(&self, writer: &mut W) -> Result<()> {
        writeln!(writer)?;
        writeln!(writer, "{}", format!("Validation of {}", self.subject).cyan().bold())?;
        writeln!(writer, "{}", "=".repeat(60))?;
        writeln!(writer)?;

        let status_icon = if self.may_proceed { "+".green() } else { "x".red() };
        writeln!(writer, "{} {} ({})", status_icon, self.summary, severity_label(self.severity))?;

        if !self.messages.is_empty() {
            writeln!(writer)?;
            writeln!(writer, "{}", "Messages:".cyan().bold())?;
            writeln!(writer, "{}", "-".repeat(60))?;

            for message in &self.messages {
                writeln!(
                    writer,
                    "{} {} {}",
                    severity_icon(message.severity),
                    severity_label(message.severity),
                    message.text
                )?;
                writeln!(
                    writer,
                    "  {} {}",
                    "Field:".dimmed(),
                    format!("{}.{}", message.form, message.field).cyan()
                )?;
            }
        }

        Ok(())
    }
}

fn severity_icon(severity: Severity) -> colored::ColoredString {
    match severity {
        Severity::Unacceptable => "x".red(),
        Severity::Acceptable => "!".yellow(),
        Severity::Fine => "i".blue(),
    }
}

fn severity_label(severity: Severity) -> colored::ColoredString {
    match severity {
        Severity::Unacceptable => "UNACCEPTABLE".red().bold(),
        Severity::Acceptable => "ACCEPTABLE".yellow().bold(),
        Severity::Fine => "FINE".green(),
    }
}
