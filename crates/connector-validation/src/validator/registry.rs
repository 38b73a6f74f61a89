//! Lookup of validators by connector id

use std::collections::HashMap;
use std::sync::Arc;

use super::{rejected_job_type, Validator};
use crate::error::{Error, Result};
use crate::model::{Entity, FormSet, JobType};
use crate::report::ValidationReport;

/// Wraps a validator so unrecognized job types are rejected instead of accepted
pub struct StrictJobTypes {
    inner: Arc<dyn Validator>,
}

impl StrictJobTypes {
    pub fn new(inner: Arc<dyn Validator>) -> Self {
        Self { inner }
    }
}

impl Validator for StrictJobTypes {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn validate_connection(&self, config: &FormSet) -> ValidationReport {
        self.inner.validate_connection(config)
    }

    fn validate_job(&self, job_type: &JobType, config: &FormSet) -> ValidationReport {
        if self.inner.supports_job_type(job_type) {
            self.inner.validate_job(job_type, config)
        } else {
            rejected_job_type(self.name(), job_type)
        }
    }

    fn supports_job_type(&self, job_type: &JobType) -> bool {
        self.inner.supports_job_type(job_type)
    }
}

/// Validators registered per connector
#[derive(Default)]
pub struct ValidatorRegistry {
    validators: HashMap<i64, Arc<dyn Validator>>,
    strict_job_types: bool,
}

impl ValidatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject job types a validator has no rules for
    pub fn with_strict_job_types(mut self, strict: bool) -> Self {
        self.strict_job_types = strict;
        self
    }

    /// Register a validator, replacing any previous one for the connector
    pub fn register(&mut self, connector_id: i64, validator: Arc<dyn Validator>) {
        self.validators.insert(connector_id, validator);
    }

    pub fn with_validator(mut self, connector_id: i64, validator: Arc<dyn Validator>) -> Self {
        self.register(connector_id, validator);
        self
    }

    /// Validator for a connector, wrapped in [`StrictJobTypes`] in strict mode
    pub fn get(&self, connector_id: i64) -> Result<Arc<dyn Validator>> {
        let validator = self
            .validators
            .get(&connector_id)
            .cloned()
            .ok_or(Error::UnknownConnector(connector_id))?;

        if self.strict_job_types {
            Ok(Arc::new(StrictJobTypes::new(validator)))
        } else {
            Ok(validator)
        }
    }

    /// Validate an entity with the validator of its connector
    pub fn validate<E: Entity>(&self, entity: &E) -> Result<ValidationReport> {
        let validator = self.get(entity.connector_id())?;
        Ok(validator.validate(&entity.kind(), entity.forms()))
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Connection, Job};
    use crate::severity::Severity;
    use crate::validator::generic_jdbc::{self, GenericJdbcValidator};
    use crate::validator::{JOB_FORM, JOB_TYPE_FIELD};

    #[test]
    fn test_unknown_connector() {
        let registry = ValidatorRegistry::new();
        let connection = Connection::new("c", 42, generic_jdbc::connection_forms());
        assert!(matches!(registry.validate(&connection), Err(Error::UnknownConnector(42))));
    }

    #[test]
    fn test_dispatch_by_entity_kind() {
        let registry = ValidatorRegistry::new().with_validator(1, Arc::new(GenericJdbcValidator::default()));
        assert_eq!(registry.len(), 1);

        let connection = Connection::new("c", 1, generic_jdbc::connection_forms());
        let report = registry.validate(&connection).unwrap();
        assert_eq!(report.len(), 2);

        let job = Job::new("j", 1, 1, JobType::Import, generic_jdbc::job_forms(&JobType::Import));
        let report = registry.validate(&job).unwrap();
        assert!(report.messages().all(|m| m.form == generic_jdbc::TABLE_FORM));
    }

    #[test]
    fn test_lenient_registry_accepts_unknown_job_type() {
        let registry = ValidatorRegistry::new().with_validator(1, Arc::new(GenericJdbcValidator::default()));
        let job = Job::new("j", 1, 1, JobType::Other("SYNC".into()), FormSet::default());
        assert_eq!(registry.validate(&job).unwrap().severity(), Severity::Fine);
    }

    #[test]
    fn test_strict_mode_applies_to_earlier_registrations() {
        let registry = ValidatorRegistry::new()
            .with_validator(1, Arc::new(GenericJdbcValidator::default()))
            .with_strict_job_types(true);

        let job = Job::new("j", 1, 1, JobType::Other("SYNC".into()), FormSet::default());
        assert_eq!(registry.validate(&job).unwrap().severity(), Severity::Unacceptable);

        let registry = registry.with_strict_job_types(false);
        assert_eq!(registry.validate(&job).unwrap().severity(), Severity::Fine);
    }

    #[test]
    fn test_strict_registry_rejects_unknown_job_type() {
        let registry = ValidatorRegistry::new()
            .with_strict_job_types(true)
            .with_validator(1, Arc::new(GenericJdbcValidator::default()));

        let job = Job::new("j", 1, 1, JobType::Other("SYNC".into()), FormSet::default());
        let report = registry.validate(&job).unwrap();
        assert_eq!(report.severity(), Severity::Unacceptable);
        assert_eq!(report.messages_for(JOB_FORM, JOB_TYPE_FIELD).count(), 1);

        // Known job types still go through the connector rules
        let job = Job::new("j", 1, 1, JobType::Export, generic_jdbc::job_forms(&JobType::Export));
        let report = registry.validate(&job).unwrap();
        assert_eq!(report.messages_for(generic_jdbc::TABLE_FORM, generic_jdbc::SQL).count(), 1);
    }
}
