//! Connector Validation
//!
//! Validation and interactive correction of connector configurations.
//!
//! ## Architecture
//!
//! 1. **Severity** (`severity`): `Fine < Acceptable < Unacceptable`, with the
//!    `may_proceed` gate used by the correction loop.
//!
//! 2. **Report** (`report`): field-scoped messages in insertion order plus the
//!    rolled-up severity of one validation pass.
//!
//! 3. **Model** (`model`): connections and jobs whose connector-specific
//!    values live in ordered forms of named inputs, plus display bundles.
//!
//! 4. **Validator** (`validator`): one stateless validator per connector,
//!    dispatched on the entity kind; shared rule functions; the generic JDBC
//!    connector; a registry keyed by connector id.
//!
//! 5. **Session** (`session`): the edit, validate, report, repeat loop that
//!    runs until the configuration may proceed or the operator cancels.
//!
//! ## Example
//!
//! ```rust
//! use connector_validation::{
//!     generic_jdbc, Connection, Entity, GenericJdbcValidator, Severity, Validator,
//! };
//!
//! let forms = generic_jdbc::connection_forms()
//!     .with_value("connection", "jdbcDriver", "org.postgresql.Driver")
//!     .with_value("connection", "connectionString", "postgresql://localhost/sales");
//! let connection = Connection::new("sales", 1, forms);
//!
//! let report = GenericJdbcValidator::default().validate(&connection.kind(), connection.forms());
//! assert_eq!(report.severity(), Severity::Unacceptable);
//! assert_eq!(report.messages_for("connection", "connectionString").count(), 1);
//! ```

pub mod error;
pub mod model;
pub mod report;
pub mod session;
pub mod severity;
pub mod validator;

pub use error::{Error, Result};
pub use model::{
    Connection, Entity, EntityKind, Form, FormSet, Input, Job, JobType, ResourceBundle,
    PERSISTENCE_ID_DEFAULT,
};
pub use report::{ValidationMessage, ValidationReport};
pub use session::{
    CorrectionSession, FieldInput, FieldPrompt, FillOutcome, FormFiller, InteractiveIo,
    SessionOutcome, SessionState, SessionSummary,
};
pub use severity::Severity;
pub use validator::{
    generic_jdbc, DriverCatalog, GenericJdbcValidator, StrictJobTypes, Validator,
    ValidatorRegistry,
};
