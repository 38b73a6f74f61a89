//! Forms and inputs
//!
//! A configuration is a [`FormSet`]: an ordered list of named forms, each an
//! ordered list of named string inputs. Validators address individual inputs
//! by `(form, field)`.

use serde::{Deserialize, Serialize};

/// A single named configuration value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Input {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<String>,
    /// Never echo the value back to the operator
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub sensitive: bool,
}

impl Input {
    /// Create an empty input
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
            sensitive: false,
        }
    }

    /// Create an empty sensitive input
    pub fn sensitive(name: impl Into<String>) -> Self {
        Self {
            sensitive: true,
            ..Self::new(name)
        }
    }

    /// Builder-style value setter
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.set_value(Some(value.into()));
        self
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Set the value; blank strings are stored as absent
    pub fn set_value(&mut self, value: Option<String>) {
        self.value = value.filter(|v| !v.trim().is_empty());
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_none()
    }
}

/// A named group of inputs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Form {
    pub name: String,
    #[serde(default)]
    pub inputs: Vec<Input>,
}

impl Form {
    pub fn new(name: impl Into<String>, inputs: Vec<Input>) -> Self {
        Self {
            name: name.into(),
            inputs,
        }
    }

    pub fn input(&self, name: &str) -> Option<&Input> {
        self.inputs.iter().find(|i| i.name == name)
    }

    pub fn input_mut(&mut self, name: &str) -> Option<&mut Input> {
        self.inputs.iter_mut().find(|i| i.name == name)
    }
}

/// Ordered collection of forms making up one configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormSet {
    forms: Vec<Form>,
}

impl FormSet {
    pub fn new(forms: Vec<Form>) -> Self {
        Self { forms }
    }

    pub fn forms(&self) -> &[Form] {
        &self.forms
    }

    pub fn forms_mut(&mut self) -> &mut [Form] {
        &mut self.forms
    }

    pub fn form(&self, name: &str) -> Option<&Form> {
        self.forms.iter().find(|f| f.name == name)
    }

    pub fn input(&self, form: &str, field: &str) -> Option<&Input> {
        self.form(form).and_then(|f| f.input(field))
    }

    /// Value of a field, `None` when the field is absent or empty
    pub fn value(&self, form: &str, field: &str) -> Option<&str> {
        self.input(form, field).and_then(Input::value)
    }

    /// Set a field value. Returns `false` if the form or field does not exist.
    pub fn set_value(&mut self, form: &str, field: &str, value: Option<String>) -> bool {
        match self
            .forms
            .iter_mut()
            .find(|f| f.name == form)
            .and_then(|f| f.input_mut(field))
        {
            Some(input) => {
                input.set_value(value);
                true
            }
            None => false,
        }
    }

    /// Builder-style setter; unknown fields are ignored
    pub fn with_value(mut self, form: &str, field: &str, value: impl Into<String>) -> Self {
        self.set_value(form, field, Some(value.into()));
        self
    }

    /// Total number of inputs across all forms
    pub fn input_count(&self) -> usize {
        self.forms.iter().map(|f| f.inputs.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FormSet {
        FormSet::new(vec![Form::new(
            "connection",
            vec![Input::new("jdbcDriver"), Input::sensitive("password")],
        )])
    }

    #[test]
    fn test_set_and_get_value() {
        let mut forms = sample();
        assert!(forms.set_value("connection", "jdbcDriver", Some("org.h2.Driver".to_string())));
        assert_eq!(forms.value("connection", "jdbcDriver"), Some("org.h2.Driver"));
    }

    #[test]
    fn test_blank_value_is_absent() {
        let mut forms = sample().with_value("connection", "jdbcDriver", "org.h2.Driver");
        forms.set_value("connection", "jdbcDriver", Some("   ".to_string()));
        assert_eq!(forms.value("connection", "jdbcDriver"), None);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let mut forms = sample();
        assert!(!forms.set_value("connection", "missing", Some("x".to_string())));
        assert!(!forms.set_value("table", "jdbcDriver", Some("x".to_string())));
        assert_eq!(forms.input_count(), 2);
    }

    #[test]
    fn test_serde_shape() {
        let forms = sample().with_value("connection", "jdbcDriver", "org.h2.Driver");
        let json = serde_json::to_value(&forms).unwrap();
        assert_eq!(json[0]["name"], "connection");
        assert_eq!(json[0]["inputs"][0]["value"], "org.h2.Driver");
        assert_eq!(json[0]["inputs"][1]["sensitive"], true);

        let back: FormSet = serde_json::from_value(json).unwrap();
        assert_eq!(back, forms);
    }
}
