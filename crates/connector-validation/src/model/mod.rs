//! Entity model
//!
//! Connections and jobs are the two configuration families. Both carry a
//! persistence id, a display name, the connector they belong to and a
//! [`FormSet`] holding the connector-specific values.

pub mod bundle;
pub mod forms;

pub use bundle::ResourceBundle;
pub use forms::{Form, FormSet, Input};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Persistence id of an entity that has not been saved yet
pub const PERSISTENCE_ID_DEFAULT: i64 = -1;

/// Kind of job a job configuration describes
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JobType {
    Import,
    Export,
    /// A job kind registered by some other connector. Built-in names held
    /// here are folded back by [`JobType::normalized`].
    Other(String),
}

impl JobType {
    /// Same job type with built-in names mapped to their own variants
    pub fn normalized(&self) -> JobType {
        match self {
            JobType::Other(name) => JobType::from(name.as_str()),
            known => known.clone(),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            JobType::Import => "IMPORT",
            JobType::Export => "EXPORT",
            JobType::Other(name) => name,
        }
    }
}

impl From<&str> for JobType {
    fn from(value: &str) -> Self {
        match value.trim().to_uppercase().as_str() {
            "IMPORT" => JobType::Import,
            "EXPORT" => JobType::Export,
            _ => JobType::Other(value.trim().to_string()),
        }
    }
}

impl From<String> for JobType {
    fn from(value: String) -> Self {
        JobType::from(value.as_str())
    }
}

impl From<JobType> for String {
    fn from(value: JobType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Selects which rule set applies to a configuration
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Connection,
    Job(JobType),
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Connection => write!(f, "connection"),
            EntityKind::Job(job_type) => write!(f, "{} job", job_type.as_str().to_lowercase()),
        }
    }
}

/// Common view over connections and jobs
pub trait Entity: Clone {
    fn kind(&self) -> EntityKind;

    fn connector_id(&self) -> i64;

    fn persistence_id(&self) -> i64;

    fn set_persistence_id(&mut self, id: i64);

    fn name(&self) -> &str;

    fn set_name(&mut self, name: String);

    fn forms(&self) -> &FormSet;

    fn forms_mut(&mut self) -> &mut FormSet;

    fn is_persisted(&self) -> bool {
        self.persistence_id() != PERSISTENCE_ID_DEFAULT
    }

    /// Deep copy with the persistence id reset, so saving it creates a new entity
    fn clone_unsaved(&self) -> Self {
        let mut copy = self.clone();
        copy.set_persistence_id(PERSISTENCE_ID_DEFAULT);
        copy
    }
}

/// Connection to an external system through a connector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    #[serde(default = "default_persistence_id")]
    pub persistence_id: i64,
    pub name: String,
    pub connector_id: i64,
    #[serde(default)]
    pub forms: FormSet,
}

impl Connection {
    /// Create an unsaved connection
    pub fn new(name: impl Into<String>, connector_id: i64, forms: FormSet) -> Self {
        Self {
            persistence_id: PERSISTENCE_ID_DEFAULT,
            name: name.into(),
            connector_id,
            forms,
        }
    }

    pub fn with_persistence_id(mut self, id: i64) -> Self {
        self.persistence_id = id;
        self
    }
}

impl Entity for Connection {
    fn kind(&self) -> EntityKind {
        EntityKind::Connection
    }

    fn connector_id(&self) -> i64 {
        self.connector_id
    }

    fn persistence_id(&self) -> i64 {
        self.persistence_id
    }

    fn set_persistence_id(&mut self, id: i64) {
        self.persistence_id = id;
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }

    fn forms(&self) -> &FormSet {
        &self.forms
    }

    fn forms_mut(&mut self) -> &mut FormSet {
        &mut self.forms
    }
}

/// Data transfer job running over an existing connection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    #[serde(default = "default_persistence_id")]
    pub persistence_id: i64,
    pub name: String,
    pub connection_id: i64,
    pub connector_id: i64,
    pub job_type: JobType,
    #[serde(default)]
    pub forms: FormSet,
}

impl Job {
    /// Create an unsaved job
    pub fn new(
        name: impl Into<String>,
        connection_id: i64,
        connector_id: i64,
        job_type: JobType,
        forms: FormSet,
    ) -> Self {
        Self {
            persistence_id: PERSISTENCE_ID_DEFAULT,
            name: name.into(),
            connection_id,
            connector_id,
            job_type,
            forms,
        }
    }

    pub fn with_persistence_id(mut self, id: i64) -> Self {
        self.persistence_id = id;
        self
    }
}

impl Entity for Job {
    fn kind(&self) -> EntityKind {
        EntityKind::Job(self.job_type.clone())
    }

    fn connector_id(&self) -> i64 {
        self.connector_id
    }

    fn persistence_id(&self) -> i64 {
        self.persistence_id
    }

    fn set_persistence_id(&mut self, id: i64) {
        self.persistence_id = id;
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }

    fn forms(&self) -> &FormSet {
        &self.forms
    }

    fn forms_mut(&mut self) -> &mut FormSet {
        &mut self.forms
    }
}

fn default_persistence_id() -> i64 {
    PERSISTENCE_ID_DEFAULT
}
