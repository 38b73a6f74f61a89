//! Rule functions shared by connector validators
//!
//! Each function appends zero or more messages to the report it is given and
//! never short-circuits other rules.

use crate::model::FormSet;
use crate::report::ValidationReport;
use crate::severity::Severity;

/// Require a field to be present.
///
/// Returns the value when present so the caller can run format checks on it;
/// a missing field gets exactly one `Unacceptable` message and no format check.
pub fn require<'a>(
    report: &mut ValidationReport,
    config: &'a FormSet,
    form: &str,
    field: &str,
    missing: &str,
) -> Option<&'a str> {
    let value = config.value(form, field);
    if value.is_none() {
        report.add_message(Severity::Unacceptable, form, field, missing);
    }
    value
}

/// Two fields of one form of which exactly one must be set
#[derive(Debug, Clone, Copy)]
pub struct ExclusivePair<'a> {
    pub form: &'a str,
    pub first: &'a str,
    pub second: &'a str,
    /// Text when neither field is set
    pub missing: &'a str,
    /// Text when both fields are set
    pub conflicting: &'a str,
}

/// Enforce that exactly one field of the pair is set.
///
/// Violations produce one `Unacceptable` message per field so either one can
/// be highlighted.
pub fn exactly_one_of(report: &mut ValidationReport, config: &FormSet, pair: &ExclusivePair<'_>) {
    let first = config.value(pair.form, pair.first).is_some();
    let second = config.value(pair.form, pair.second).is_some();

    let text = match (first, second) {
        (false, false) => pair.missing,
        (true, true) => pair.conflicting,
        _ => return,
    };

    report.add_message(Severity::Unacceptable, pair.form, pair.first, text);
    report.add_message(Severity::Unacceptable, pair.form, pair.second, text);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Form, Input};

    const PAIR: ExclusivePair<'static> = ExclusivePair {
        form: "table",
        first: "tableName",
        second: "sql",
        missing: "one is required",
        conflicting: "only one is allowed",
    };

    fn table(table_name: Option<&str>, sql: Option<&str>) -> FormSet {
        let mut forms = FormSet::new(vec![Form::new(
            "table",
            vec![Input::new("tableName"), Input::new("sql")],
        )]);
        forms.set_value("table", "tableName", table_name.map(str::to_string));
        forms.set_value("table", "sql", sql.map(str::to_string));
        forms
    }

    #[test]
    fn test_require_reports_missing_once() {
        let config = table(None, None);
        let mut report = ValidationReport::new();
        assert_eq!(require(&mut report, &config, "table", "tableName", "missing"), None);
        assert_eq!(report.len(), 1);
        assert_eq!(report.severity(), Severity::Unacceptable);
    }

    #[test]
    fn test_require_returns_present_value() {
        let config = table(Some("customers"), None);
        let mut report = ValidationReport::new();
        assert_eq!(
            require(&mut report, &config, "table", "tableName", "missing"),
            Some("customers")
        );
        assert!(report.is_empty());
    }

    #[test]
    fn test_exactly_one_of_neither() {
        let mut report = ValidationReport::new();
        exactly_one_of(&mut report, &table(None, None), &PAIR);

        let fields: Vec<_> = report.messages().map(|m| (m.field.as_str(), m.text.as_str())).collect();
        assert_eq!(
            fields,
            vec![("tableName", "one is required"), ("sql", "one is required")]
        );
    }

    #[test]
    fn test_exactly_one_of_both() {
        let mut report = ValidationReport::new();
        exactly_one_of(&mut report, &table(Some("t"), Some("select 1")), &PAIR);
        assert_eq!(report.len(), 2);
        assert!(report.messages().all(|m| m.text == "only one is allowed"));
    }

    #[test]
    fn test_exactly_one_of_single() {
        for config in [table(Some("t"), None), table(None, Some("select 1"))] {
            let mut report = ValidationReport::new();
            exactly_one_of(&mut report, &config, &PAIR);
            assert!(report.is_empty());
        }
    }
}
