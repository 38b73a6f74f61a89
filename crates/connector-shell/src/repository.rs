//! Repository of connectors, connections and jobs
//!
//! The repository supplies the entities a session starts from together with
//! their display bundles, and persists the result once a session is accepted.
//! [`FileRepository`] keeps everything in one JSON, YAML or TOML document and
//! rewrites it on every change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use connector_validation::{Connection, Entity, Job, JobType, ResourceBundle};

use crate::error::{Result, ShellError};

/// A connector and its display strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectorRecord {
    pub id: i64,
    pub name: String,
    /// Validator kind registered for this connector
    pub validator: String,
    #[serde(default)]
    pub connection_bundle: ResourceBundle,
    /// Job bundles keyed by job type name
    #[serde(default)]
    pub job_bundles: BTreeMap<String, ResourceBundle>,
}

impl ConnectorRecord {
    pub fn new(id: i64, name: impl Into<String>, validator: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            validator: validator.into(),
            connection_bundle: ResourceBundle::default(),
            job_bundles: BTreeMap::new(),
        }
    }

    pub fn with_connection_bundle(mut self, bundle: ResourceBundle) -> Self {
        self.connection_bundle = bundle;
        self
    }

    pub fn with_job_bundle(mut self, job_type: &JobType, bundle: ResourceBundle) -> Self {
        self.job_bundles.insert(job_type.as_str().to_string(), bundle);
        self
    }

    /// Bundle for a job type; empty when the connector declares none.
    /// Keys match job type names case-insensitively.
    pub fn job_bundle(&self, job_type: &JobType) -> ResourceBundle {
        let wanted = job_type.normalized();
        self.job_bundles
            .iter()
            .find(|(key, _)| JobType::from(key.as_str()) == wanted)
            .map(|(_, bundle)| bundle.clone())
            .unwrap_or_default()
    }
}

/// Source of entities and sink for accepted ones
#[cfg_attr(test, mockall::automock)]
pub trait Repository {
    fn connectors(&self) -> Result<Vec<ConnectorRecord>>;

    fn connector(&self, id: i64) -> Result<ConnectorRecord>;

    fn connection(&self, id: i64) -> Result<Connection>;

    fn job(&self, id: i64) -> Result<Job>;

    /// Persist a new connection and return its assigned id
    fn create_connection(&mut self, connection: &Connection) -> Result<i64>;

    fn update_connection(&mut self, connection: &Connection) -> Result<()>;

    /// Persist a new job and return its assigned id
    fn create_job(&mut self, job: &Job) -> Result<i64>;

    fn update_job(&mut self, job: &Job) -> Result<()>;
}

/// Serialization format of a repository document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
    Toml,
}

impl DocumentFormat {
    /// Pick the format from the file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "json" => Ok(DocumentFormat::Json),
            "yaml" | "yml" => Ok(DocumentFormat::Yaml),
            "toml" => Ok(DocumentFormat::Toml),
            _ => Err(ShellError::InvalidInput(format!(
                "Unsupported repository format: {}. Supported formats: json, yaml, yml, toml",
                extension
            ))),
        }
    }

    pub fn parse(self, content: &str) -> Result<RepositoryDocument> {
        Ok(match self {
            DocumentFormat::Json => serde_json::from_str(content)?,
            DocumentFormat::Yaml => serde_yaml::from_str(content)?,
            DocumentFormat::Toml => toml::from_str(content)?,
        })
    }

    pub fn render(self, document: &RepositoryDocument) -> Result<String> {
        Ok(match self {
            DocumentFormat::Json => serde_json::to_string_pretty(document)
                .map_err(|e| ShellError::SerializationError(e.to_string()))?,
            DocumentFormat::Yaml => serde_yaml::to_string(document)
                .map_err(|e| ShellError::SerializationError(e.to_string()))?,
            DocumentFormat::Toml => toml::to_string_pretty(document)?,
        })
    }
}

/// Stored entity with bookkeeping timestamps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stored<T> {
    #[serde(flatten)]
    pub entity: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl<T> Stored<T> {
    fn created(entity: T) -> Self {
        Self {
            entity,
            created_at: Some(Utc::now()),
            updated_at: None,
        }
    }
}

/// Whole repository document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepositoryDocument {
    #[serde(default)]
    pub connectors: Vec<ConnectorRecord>,
    #[serde(default)]
    pub connections: Vec<Stored<Connection>>,
    #[serde(default)]
    pub jobs: Vec<Stored<Job>>,
}

fn next_id<T: Entity>(entries: &[Stored<T>]) -> i64 {
    entries
        .iter()
        .map(|s| s.entity.persistence_id())
        .max()
        .unwrap_or(0)
        .max(0)
        + 1
}

/// Repository backed by a single document on disk
#[derive(Debug)]
pub struct FileRepository {
    path: PathBuf,
    format: DocumentFormat,
    document: RepositoryDocument,
}

impl FileRepository {
    /// Open an existing repository document
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let format = DocumentFormat::from_path(&path)?;
        let content = std::fs::read_to_string(&path).map_err(|e| {
            ShellError::file_error(format!(
                "Failed to read repository '{}': {}",
                path.display(),
                e
            ))
        })?;
        let document = format.parse(&content)?;

        debug!(
            path = %path.display(),
            connectors = document.connectors.len(),
            connections = document.connections.len(),
            jobs = document.jobs.len(),
            "Opened repository"
        );

        Ok(Self {
            path,
            format,
            document,
        })
    }

    /// Create a repository from a document and write it out
    pub fn create(path: impl Into<PathBuf>, document: RepositoryDocument) -> Result<Self> {
        let path = path.into();
        let format = DocumentFormat::from_path(&path)?;
        let repository = Self {
            path,
            format,
            document,
        };
        repository.save()?;
        Ok(repository)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn document(&self) -> &RepositoryDocument {
        &self.document
    }

    fn save(&self) -> Result<()> {
        let content = self.format.render(&self.document)?;
        std::fs::write(&self.path, content).map_err(|e| {
            ShellError::file_error(format!(
                "Failed to write repository '{}': {}",
                self.path.display(),
                e
            ))
        })
    }
}

impl Repository for FileRepository {
    fn connectors(&self) -> Result<Vec<ConnectorRecord>> {
        Ok(self.document.connectors.clone())
    }

    fn connector(&self, id: i64) -> Result<ConnectorRecord> {
        self.document
            .connectors
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or(ShellError::NotFound { entity: "Connector", id })
    }

    fn connection(&self, id: i64) -> Result<Connection> {
        self.document
            .connections
            .iter()
            .find(|s| s.entity.persistence_id == id)
            .map(|s| s.entity.clone())
            .ok_or(ShellError::NotFound { entity: "Connection", id })
    }

    fn job(&self, id: i64) -> Result<Job> {
        self.document
            .jobs
            .iter()
            .find(|s| s.entity.persistence_id == id)
            .map(|s| s.entity.clone())
            .ok_or(ShellError::NotFound { entity: "Job", id })
    }

    fn create_connection(&mut self, connection: &Connection) -> Result<i64> {
        let id = next_id(&self.document.connections);
        let mut entity = connection.clone();
        entity.persistence_id = id;
        self.document.connections.push(Stored::created(entity));
        self.save()?;
        info!(id, "Created connection");
        Ok(id)
    }

    fn update_connection(&mut self, connection: &Connection) -> Result<()> {
        let id = connection.persistence_id;
        let stored = self
            .document
            .connections
            .iter_mut()
            .find(|s| s.entity.persistence_id == id)
            .ok_or(ShellError::NotFound { entity: "Connection", id })?;
        stored.entity = connection.clone();
        stored.updated_at = Some(Utc::now());
        self.save()?;
        info!(id, "Updated connection");
        Ok(())
    }

    fn create_job(&mut self, job: &Job) -> Result<i64> {
        let id = next_id(&self.document.jobs);
        let mut entity = job.clone();
        entity.persistence_id = id;
        self.document.jobs.push(Stored::created(entity));
        self.save()?;
        info!(id, "Created job");
        Ok(id)
    }

    fn update_job(&mut self, job: &Job) -> Result<()> {
        let id = job.persistence_id;
        let stored = self
            .document
            .jobs
            .iter_mut()
            .find(|s| s.entity.persistence_id == id)
            .ok_or(ShellError::NotFound { entity: "Job", id })?;
        stored.entity = job.clone();
        stored.updated_at = Some(Utc::now());
        self.save()?;
        info!(id, "Updated job");
        Ok(())
    }
}
