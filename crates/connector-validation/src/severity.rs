//! Severity levels for validation messages
//!
//! Severities are ordered from best to worst so that the rollup of a report
//! is simply the maximum of its message severities.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome level of a validation message or report
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    /// Nothing to report
    #[default]
    Fine,
    /// Something looks off, but the configuration may still be used
    Acceptable,
    /// The configuration must be corrected before it can be used
    Unacceptable,
}

impl Severity {
    /// Whether a configuration with this severity may proceed.
    pub fn may_proceed(self) -> bool {
        matches!(self, Severity::Fine | Severity::Acceptable)
    }

    /// The worse of two severities.
    pub fn worst(self, other: Severity) -> Severity {
        self.max(other)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Fine => write!(f, "FINE"),
            Severity::Acceptable => write!(f, "ACCEPTABLE"),
            Severity::Unacceptable => write!(f, "UNACCEPTABLE"),
        }
    }
}
