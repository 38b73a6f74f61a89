//! Display strings for forms and inputs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Human-readable labels keyed by `<form>.<field>.label`,
/// `<form>.<field>.help` and `<form>.label`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceBundle {
    entries: BTreeMap<String, String>,
}

impl ResourceBundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Heading for a form, falling back to the form name
    pub fn form_label(&self, form: &str) -> String {
        self.get(&format!("{}.label", form))
            .map(str::to_string)
            .unwrap_or_else(|| form.to_string())
    }

    /// Prompt label for a field, falling back to the field name
    pub fn label(&self, form: &str, field: &str) -> String {
        self.get(&format!("{}.{}.label", form, field))
            .map(str::to_string)
            .unwrap_or_else(|| field.to_string())
    }

    pub fn help(&self, form: &str, field: &str) -> Option<&str> {
        self.get(&format!("{}.{}.help", form, field))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
