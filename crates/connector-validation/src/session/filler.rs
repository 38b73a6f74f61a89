//! Edit step of a correction session
//!
//! Walks the entity name and every input of every form, showing the messages
//! the previous validation pass left for a field right before prompting for it.

use super::io::{FieldInput, FieldPrompt, InteractiveIo};
use crate::error::Result;
use crate::model::{Entity, ResourceBundle};
use crate::report::{ValidationMessage, ValidationReport};
use crate::severity::Severity;

/// Pseudo form and field used when prompting for the entity name
pub const NAME_FORM: &str = "entity";
pub const NAME_FIELD: &str = "name";

/// Result of one edit pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillOutcome {
    Completed,
    Cancelled,
}

/// Fills an entity's forms from operator input
pub struct FormFiller<'a> {
    bundle: &'a ResourceBundle,
}

impl<'a> FormFiller<'a> {
    pub fn new(bundle: &'a ResourceBundle) -> Self {
        Self { bundle }
    }

    /// Run one edit pass over the entity, mutating it in place
    pub fn fill<E: Entity>(
        &self,
        io: &mut dyn InteractiveIo,
        entity: &mut E,
        previous: Option<&ValidationReport>,
    ) -> Result<FillOutcome> {
        let label = self
            .bundle
            .get("entity.name.label")
            .unwrap_or("Name")
            .to_string();
        let prompt = FieldPrompt::new(NAME_FORM, NAME_FIELD, label);
        match io.read_field(&prompt, Some(entity.name()))? {
            FieldInput::Cancel => return Ok(FillOutcome::Cancelled),
            FieldInput::Value(Some(name)) => entity.set_name(name),
            FieldInput::Value(None) => {}
        }

        for form in entity.forms_mut().forms_mut() {
            io.show_text(&self.bundle.form_label(&form.name))?;

            for input in form.inputs.iter_mut() {
                if let Some(report) = previous {
                    for message in report.messages_for(&form.name, &input.name) {
                        io.show_text(&describe(message))?;
                    }
                }

                let prompt = FieldPrompt::new(
                    form.name.clone(),
                    input.name.clone(),
                    self.bundle.label(&form.name, &input.name),
                )
                .with_help(self.bundle.help(&form.name, &input.name))
                .with_sensitive(input.sensitive);

                match io.read_field(&prompt, input.value())? {
                    FieldInput::Cancel => return Ok(FillOutcome::Cancelled),
                    FieldInput::Value(value) => input.set_value(value),
                }
            }
        }

        Ok(FillOutcome::Completed)
    }
}

fn describe(message: &ValidationMessage) -> String {
    let kind = match message.severity {
        Severity::Unacceptable => "Error message",
        Severity::Acceptable => "Warning message",
        Severity::Fine => "Message",
    };
    format!("{}: {}", kind, message.text)
}
