//! Validator contract
//!
//! One validator exists per connector. A validator is stateless: each call is
//! a pure function of the entity kind and the configuration, returning a
//! freshly built [`ValidationReport`].

pub mod generic_jdbc;
pub mod registry;
pub mod rules;

pub use generic_jdbc::{DriverCatalog, GenericJdbcValidator};
pub use registry::{StrictJobTypes, ValidatorRegistry};

use tracing::{debug, warn};

use crate::model::{EntityKind, FormSet, JobType};
use crate::report::ValidationReport;
use crate::severity::Severity;

/// Form and field that carry messages about the job type itself
pub const JOB_FORM: &str = "job";
pub const JOB_TYPE_FIELD: &str = "type";

/// Semantic rules for one connector's connections and jobs
///
/// Implementations never fail and never mutate the configuration; every
/// problem is reported as a message in the returned report.
pub trait Validator: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &str;

    /// Validate a connection configuration. Without rules this is always `Fine`.
    fn validate_connection(&self, _config: &FormSet) -> ValidationReport {
        ValidationReport::new()
    }

    /// Validate a job configuration of the given type.
    ///
    /// The default treats every job type as unrecognized: no rules apply and
    /// the report is `Fine`, but the dispatch is logged.
    fn validate_job(&self, job_type: &JobType, _config: &FormSet) -> ValidationReport {
        unrecognized_job_type(self.name(), job_type)
    }

    /// Whether `validate_job` has dedicated rules for the job type
    fn supports_job_type(&self, _job_type: &JobType) -> bool {
        false
    }

    /// Dispatch on the entity kind
    fn validate(&self, kind: &EntityKind, config: &FormSet) -> ValidationReport {
        let report = match kind {
            EntityKind::Connection => self.validate_connection(config),
            EntityKind::Job(job_type) => self.validate_job(&job_type.normalized(), config),
        };

        debug!(
            validator = self.name(),
            kind = %kind,
            severity = %report.severity(),
            messages = report.len(),
            "Validation pass finished"
        );

        report
    }
}

/// Report for a job type a validator has no rules for
pub fn unrecognized_job_type(validator: &str, job_type: &JobType) -> ValidationReport {
    warn!(
        validator,
        job_type = %job_type,
        "No rules registered for job type, treating configuration as acceptable"
    );
    ValidationReport::new()
}

/// Report flagging an unrecognized job type as a configuration problem
pub fn rejected_job_type(validator: &str, job_type: &JobType) -> ValidationReport {
    warn!(validator, job_type = %job_type, "Rejecting unrecognized job type");
    let mut report = ValidationReport::new();
    report.add_message(
        Severity::Unacceptable,
        JOB_FORM,
        JOB_TYPE_FIELD,
        format!("Job type {} is not supported by this connector", job_type),
    );
    report
}
