//! Interactive I/O collaborator
//!
//! The correction loop talks to the operator only through this trait.

use crate::error::Result;

/// Everything needed to prompt for one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPrompt {
    pub form: String,
    pub field: String,
    /// Display label from the resource bundle
    pub label: String,
    pub help: Option<String>,
    /// Current value must not be echoed
    pub sensitive: bool,
}

impl FieldPrompt {
    pub fn new(form: impl Into<String>, field: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            form: form.into(),
            field: field.into(),
            label: label.into(),
            help: None,
            sensitive: false,
        }
    }

    pub fn with_help(mut self, help: Option<impl Into<String>>) -> Self {
        self.help = help.map(Into::into);
        self
    }

    pub fn with_sensitive(mut self, sensitive: bool) -> Self {
        self.sensitive = sensitive;
        self
    }
}

/// Operator answer to a field prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldInput {
    /// New value for the field; `None` clears it
    Value(Option<String>),
    /// The operator abandoned the edit
    Cancel,
}

/// Prompting and text output towards the operator
pub trait InteractiveIo {
    /// Ask for a field value, offering the current one
    fn read_field(&mut self, prompt: &FieldPrompt, current: Option<&str>) -> Result<FieldInput>;

    /// Show text to the operator
    fn show_text(&mut self, text: &str) -> Result<()>;
}

impl<T: InteractiveIo + ?Sized> InteractiveIo for &mut T {
    fn read_field(&mut self, prompt: &FieldPrompt, current: Option<&str>) -> Result<FieldInput> {
        (**self).read_field(prompt, current)
    }

    fn show_text(&mut self, text: &str) -> Result<()> {
        (**self).show_text(text)
    }
}
