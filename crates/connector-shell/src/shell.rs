//! Clone, update and validate operations over repository entities
//!
//! An edited entity is only written back after its correction session was
//! accepted. Clones are created with a fresh persistence id, the source entity
//! is never touched.

use tracing::info;

use connector_validation::{
    Connection, CorrectionSession, Entity, InteractiveIo, Job, ResourceBundle, SessionSummary,
    ValidationReport, ValidatorRegistry,
};

use crate::config::ShellConfig;
use crate::error::Result;
use crate::repository::{ConnectorRecord, Repository};

/// Entity that can be loaded from and written to a [`Repository`]
pub trait Managed: Entity {
    /// Lower-case name used in operator messages
    const LABEL: &'static str;
    /// Capitalized name used at the start of operator messages
    const TITLE: &'static str;

    fn load(repository: &dyn Repository, id: i64) -> Result<Self>;

    fn create(repository: &mut dyn Repository, entity: &Self) -> Result<i64>;

    fn update(repository: &mut dyn Repository, entity: &Self) -> Result<()>;

    /// Display strings the connector declares for this entity
    fn bundle(&self, connector: &ConnectorRecord) -> ResourceBundle;
}

impl Managed for Connection {
    const LABEL: &'static str = "connection";
    const TITLE: &'static str = "Connection";

    fn load(repository: &dyn Repository, id: i64) -> Result<Self> {
        repository.connection(id)
    }

    fn create(repository: &mut dyn Repository, entity: &Self) -> Result<i64> {
        repository.create_connection(entity)
    }

    fn update(repository: &mut dyn Repository, entity: &Self) -> Result<()> {
        repository.update_connection(entity)
    }

    fn bundle(&self, connector: &ConnectorRecord) -> ResourceBundle {
        connector.connection_bundle.clone()
    }
}

impl Managed for Job {
    const LABEL: &'static str = "job";
    const TITLE: &'static str = "Job";

    fn load(repository: &dyn Repository, id: i64) -> Result<Self> {
        repository.job(id)
    }

    fn create(repository: &mut dyn Repository, entity: &Self) -> Result<i64> {
        repository.create_job(entity)
    }

    fn update(repository: &mut dyn Repository, entity: &Self) -> Result<()> {
        repository.update_job(entity)
    }

    fn bundle(&self, connector: &ConnectorRecord) -> ResourceBundle {
        connector.job_bundle(&self.job_type)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EditMode {
    Clone,
    Update,
}

impl EditMode {
    fn verb(self) -> &'static str {
        match self {
            EditMode::Clone => "Cloning",
            EditMode::Update => "Updating",
        }
    }
}

/// Repository plus the validators of its connectors
pub struct Shell<R> {
    repository: R,
    registry: ValidatorRegistry,
}

impl<R: Repository> Shell<R> {
    pub fn new(repository: R, registry: ValidatorRegistry) -> Self {
        Self {
            repository,
            registry,
        }
    }

    /// Register validators for every connector the repository declares
    pub fn from_config(repository: R, config: &ShellConfig) -> Result<Self> {
        let connectors = repository.connectors()?;
        let registry = config.build_registry(&connectors);
        Ok(Self::new(repository, registry))
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn into_repository(self) -> R {
        self.repository
    }

    /// Edit a copy of an entity and save it as a new one once accepted
    pub fn clone_entity<E: Managed>(
        &mut self,
        id: i64,
        io: &mut dyn InteractiveIo,
    ) -> Result<SessionSummary> {
        self.edit::<E>(id, EditMode::Clone, io)
    }

    /// Edit an entity in place and save it once accepted
    pub fn update_entity<E: Managed>(
        &mut self,
        id: i64,
        io: &mut dyn InteractiveIo,
    ) -> Result<SessionSummary> {
        self.edit::<E>(id, EditMode::Update, io)
    }

    /// Validate a stored entity without editing it
    pub fn validate_entity<E: Managed>(&self, id: i64) -> Result<ValidationReport> {
        let entity = E::load(&self.repository, id)?;
        Ok(self.registry.validate(&entity)?)
    }

    fn edit<E: Managed>(
        &mut self,
        id: i64,
        mode: EditMode,
        io: &mut dyn InteractiveIo,
    ) -> Result<SessionSummary> {
        let stored = E::load(&self.repository, id)?;
        let validator = self.registry.get(stored.connector_id())?;
        let connector = self.repository.connector(stored.connector_id())?;
        let bundle = stored.bundle(&connector);

        io.show_text(&format!("{} {} with id {}", mode.verb(), E::LABEL, id))?;
        let mut entity = match mode {
            EditMode::Clone => stored.clone_unsaved(),
            EditMode::Update => stored,
        };
        io.show_text(&format!("Please update {} metadata:", E::LABEL))?;

        let summary = CorrectionSession::new(validator.as_ref(), &bundle, &mut *io).run(&mut entity)?;

        if !summary.is_accepted() {
            io.show_text(&format!("{} was not saved", E::TITLE))?;
            return Ok(summary);
        }

        let severity = summary
            .report
            .as_ref()
            .map(ValidationReport::severity)
            .unwrap_or_default();

        match mode {
            EditMode::Clone => {
                let new_id = E::create(&mut self.repository, &entity)?;
                info!(source = id, id = new_id, kind = E::LABEL, "Saved clone");
                io.show_text(&format!(
                    "{} was successfully created with validation status {} and persistent id {}",
                    E::TITLE,
                    severity,
                    new_id
                ))?;
            }
            EditMode::Update => {
                E::update(&mut self.repository, &entity)?;
                info!(id, kind = E::LABEL, "Saved update");
                io.show_text(&format!(
                    "{} was successfully updated with status {}",
                    E::TITLE,
                    severity
                ))?;
            }
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GENERIC_JDBC;
    use crate::error::ShellError;
    use crate::repository::MockRepository;
    use connector_validation::session::filler::{NAME_FIELD, NAME_FORM};
    use connector_validation::{generic_jdbc, FieldInput, FieldPrompt, SessionOutcome, Severity};

    /// Renames the entity and keeps every other value
    struct Rename {
        name: Option<String>,
        shown: Vec<String>,
    }

    impl Rename {
        fn to(name: &str) -> Self {
            Self {
                name: Some(name.to_string()),
                shown: Vec::new(),
            }
        }

        fn cancel() -> Self {
            Self {
                name: None,
                shown: Vec::new(),
            }
        }
    }

    impl InteractiveIo for Rename {
        fn read_field(
            &mut self,
            prompt: &FieldPrompt,
            current: Option<&str>,
        ) -> connector_validation::Result<FieldInput> {
            if prompt.form == NAME_FORM && prompt.field == NAME_FIELD {
                return Ok(match &self.name {
                    Some(name) => FieldInput::Value(Some(name.clone())),
                    None => FieldInput::Cancel,
                });
            }
            Ok(FieldInput::Value(current.map(str::to_string)))
        }

        fn show_text(&mut self, text: &str) -> connector_validation::Result<()> {
            self.shown.push(text.to_string());
            Ok(())
        }
    }

    fn valid_connection() -> Connection {
        let forms = generic_jdbc::connection_forms()
            .with_value("connection", "jdbcDriver", "org.postgresql.Driver")
            .with_value("connection", "connectionString", "jdbc:postgresql://db/sales");
        Connection::new("sales", 1, forms).with_persistence_id(5)
    }

    fn mock() -> MockRepository {
        let mut repository = MockRepository::new();
        repository
            .expect_connection()
            .returning(|_| Ok(valid_connection()));
        repository
            .expect_connector()
            .returning(|id| Ok(ConnectorRecord::new(id, "Generic JDBC", GENERIC_JDBC)));
        repository
    }

    fn shell(repository: MockRepository) -> Shell<MockRepository> {
        let registry = ShellConfig::default()
            .build_registry(&[ConnectorRecord::new(1, "Generic JDBC", GENERIC_JDBC)]);
        Shell::new(repository, registry)
    }

    #[test]
    fn test_clone_creates_unsaved_copy() {
        let mut repository = mock();
        repository
            .expect_create_connection()
            .withf(|c| c.persistence_id == -1 && c.name == "sales copy")
            .times(1)
            .returning(|_| Ok(6));
        repository.expect_update_connection().never();

        let mut io = Rename::to("sales copy");
        let summary = shell(repository)
            .clone_entity::<Connection>(5, &mut io)
            .unwrap();

        assert_eq!(summary.outcome, SessionOutcome::Accepted);
        assert_eq!(io.shown[0], "Cloning connection with id 5");
        assert_eq!(io.shown[1], "Please update connection metadata:");
        assert_eq!(
            io.shown.last().unwrap(),
            "Connection was successfully created with validation status FINE and persistent id 6"
        );
    }

    #[test]
    fn test_update_keeps_identity() {
        let mut repository = mock();
        repository
            .expect_update_connection()
            .withf(|c| c.persistence_id == 5 && c.name == "renamed")
            .times(1)
            .returning(|_| Ok(()));
        repository.expect_create_connection().never();

        let mut io = Rename::to("renamed");
        let summary = shell(repository)
            .update_entity::<Connection>(5, &mut io)
            .unwrap();

        assert!(summary.is_accepted());
        assert_eq!(io.shown[0], "Updating connection with id 5");
        assert_eq!(
            io.shown.last().unwrap(),
            "Connection was successfully updated with status FINE"
        );
    }

    #[test]
    fn test_abort_persists_nothing() {
        let mut repository = mock();
        repository.expect_create_connection().never();
        repository.expect_update_connection().never();

        let mut io = Rename::cancel();
        let summary = shell(repository)
            .clone_entity::<Connection>(5, &mut io)
            .unwrap();

        assert_eq!(summary.outcome, SessionOutcome::Aborted);
        assert_eq!(io.shown.last().unwrap(), "Connection was not saved");
    }

    #[test]
    fn test_missing_validator() {
        let mut repository = MockRepository::new();
        repository.expect_connection().returning(|_| {
            Ok(Connection::new("other", 9, Default::default()).with_persistence_id(1))
        });

        let mut io = Rename::to("x");
        let err = shell(repository)
            .clone_entity::<Connection>(1, &mut io)
            .unwrap_err();

        assert!(matches!(err, ShellError::UnknownConnector(9)));
        assert!(io.shown.is_empty());
    }

    #[test]
    fn test_validate_entity() {
        let mut repository = MockRepository::new();
        repository.expect_job().returning(|id| {
            Ok(Job::new(
                "nightly",
                5,
                1,
                connector_validation::JobType::Import,
                generic_jdbc::job_forms(&connector_validation::JobType::Import),
            )
            .with_persistence_id(id))
        });

        let report = shell(repository).validate_entity::<Job>(2).unwrap();
        assert_eq!(report.severity(), Severity::Unacceptable);
        assert_eq!(report.messages_for("table", "tableName").count(), 1);
    }
}
