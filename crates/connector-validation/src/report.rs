//! Validation reports
//!
//! A report is built fresh for every validation pass. Messages are kept in
//! insertion order and the rollup severity only ever gets worse as messages
//! are appended.

use serde::Serialize;
use std::fmt;

use crate::severity::Severity;

/// A single message scoped to one field of one form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationMessage {
    /// Severity of this message
    pub severity: Severity,
    /// Form (sub-section) of the configuration the message concerns
    pub form: String,
    /// Field within the form
    pub field: String,
    /// Human-readable message
    pub text: String,
}

impl ValidationMessage {
    /// Create a new message
    pub fn new(
        severity: Severity,
        form: impl Into<String>,
        field: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            form: form.into(),
            field: field.into(),
            text: text.into(),
        }
    }

    /// Whether the message is scoped to the given form and field
    pub fn concerns(&self, form: &str, field: &str) -> bool {
        self.form == form && self.field == field
    }
}

impl fmt::Display for ValidationMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}.{}: {}", self.severity, self.form, self.field, self.text)
    }
}

/// Messages produced by one validation pass plus their rolled-up severity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    severity: Severity,
    messages: Vec<ValidationMessage>,
}

impl ValidationReport {
    /// Create an empty report; its severity is `Fine`
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message and fold its severity into the rollup
    pub fn add_message(
        &mut self,
        severity: Severity,
        form: impl Into<String>,
        field: impl Into<String>,
        text: impl Into<String>,
    ) {
        self.push(ValidationMessage::new(severity, form, field, text));
    }

    /// Append an already built message
    pub fn push(&mut self, message: ValidationMessage) {
        self.severity = self.severity.worst(message.severity);
        self.messages.push(message);
    }

    /// Recorded messages in insertion order
    pub fn messages(&self) -> std::slice::Iter<'_, ValidationMessage> {
        self.messages.iter()
    }

    /// Messages scoped to a single field
    pub fn messages_for<'a>(
        &'a self,
        form: &'a str,
        field: &'a str,
    ) -> impl Iterator<Item = &'a ValidationMessage> + 'a {
        self.messages.iter().filter(move |m| m.concerns(form, field))
    }

    /// Rolled-up severity
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Shorthand for `severity().may_proceed()`
    pub fn may_proceed(&self) -> bool {
        self.severity.may_proceed()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl<'a> IntoIterator for &'a ValidationReport {
    type Item = &'a ValidationMessage;
    type IntoIter = std::slice::Iter<'a, ValidationMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages()
    }
}
