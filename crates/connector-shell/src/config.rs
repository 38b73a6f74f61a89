//! Shell configuration
//!
//! Values come from, in increasing priority: built-in defaults, an optional
//! TOML file, `CONNECTOR_SHELL_*` environment variables and command line flags.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;

use connector_validation::generic_jdbc::DEFAULT_URL_SCHEME;
use connector_validation::{DriverCatalog, GenericJdbcValidator, ValidatorRegistry};

use crate::error::{Result, ShellError};
use crate::repository::ConnectorRecord;

/// Validator kind of connectors handled by [`GenericJdbcValidator`]
pub const GENERIC_JDBC: &str = "generic-jdbc";

/// Shell configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Repository document holding connectors, connections and jobs
    pub repository: PathBuf,

    /// Driver classes accepted in addition to the well-known ones
    pub extra_drivers: Vec<String>,

    /// Prefix JDBC connection strings must start with
    pub url_scheme: String,

    /// Reject job types a connector has no rules for
    pub strict_job_types: bool,

    /// Give up after this many edit passes (unbounded when unset)
    pub max_attempts: Option<u32>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            repository: PathBuf::from("connectors.json"),
            extra_drivers: Vec::new(),
            url_scheme: DEFAULT_URL_SCHEME.to_string(),
            strict_job_types: false,
            max_attempts: None,
        }
    }
}

impl ShellConfig {
    /// Create a new config builder
    pub fn builder() -> ShellConfigBuilder {
        ShellConfigBuilder::new()
    }

    /// Load from an optional TOML file, then apply environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(config.with_env())
    }

    /// Read a TOML configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ShellError::file_error(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Apply overrides from the process environment
    pub fn with_env(self) -> Self {
        self.with_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn with_env_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(repository) = lookup("CONNECTOR_SHELL_REPOSITORY") {
            self.repository = PathBuf::from(repository);
        }
        if let Some(drivers) = lookup("CONNECTOR_SHELL_DRIVERS") {
            self.extra_drivers.extend(
                drivers
                    .split(',')
                    .map(str::trim)
                    .filter(|d| !d.is_empty())
                    .map(str::to_string),
            );
        }
        if let Some(scheme) = lookup("CONNECTOR_SHELL_URL_SCHEME") {
            self.url_scheme = scheme;
        }
        if let Some(strict) = lookup("CONNECTOR_SHELL_STRICT_JOB_TYPES") {
            match strict.parse() {
                Ok(strict) => self.strict_job_types = strict,
                Err(_) => warn!(value = %strict, "Ignoring invalid CONNECTOR_SHELL_STRICT_JOB_TYPES"),
            }
        }
        if let Some(max) = lookup("CONNECTOR_SHELL_MAX_ATTEMPTS") {
            match max.parse() {
                Ok(max) => self.max_attempts = Some(max),
                Err(_) => warn!(value = %max, "Ignoring invalid CONNECTOR_SHELL_MAX_ATTEMPTS"),
            }
        }
        self
    }

    /// Driver catalog built from the well-known drivers plus configured extras
    pub fn driver_catalog(&self) -> DriverCatalog {
        DriverCatalog::default().with_drivers(self.extra_drivers.iter().cloned())
    }

    /// Register a validator for every connector with a known validator kind
    pub fn build_registry(&self, connectors: &[ConnectorRecord]) -> ValidatorRegistry {
        let mut registry = ValidatorRegistry::new().with_strict_job_types(self.strict_job_types);

        for connector in connectors {
            match connector.validator.as_str() {
                GENERIC_JDBC => registry.register(
                    connector.id,
                    Arc::new(
                        GenericJdbcValidator::new(self.driver_catalog())
                            .with_url_scheme(self.url_scheme.clone()),
                    ),
                ),
                other => warn!(
                    connector = connector.id,
                    validator = other,
                    "Unknown validator kind, connector left unregistered"
                ),
            }
        }

        registry
    }
}

/// Builder for ShellConfig
pub struct ShellConfigBuilder {
    config: ShellConfig,
}

impl Default for ShellConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ShellConfigBuilder {
    /// Create a new builder with defaults
    pub fn new() -> Self {
        Self {
            config: ShellConfig::default(),
        }
    }

    /// Start from an existing configuration
    pub fn from_config(config: ShellConfig) -> Self {
        Self { config }
    }

    pub fn repository(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.repository = path.into();
        self
    }

    pub fn extra_driver(mut self, driver: impl Into<String>) -> Self {
        self.config.extra_drivers.push(driver.into());
        self
    }

    pub fn url_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.config.url_scheme = scheme.into();
        self
    }

    pub fn strict_job_types(mut self, strict: bool) -> Self {
        self.config.strict_job_types = strict;
        self
    }

    pub fn max_attempts(mut self, max: Option<u32>) -> Self {
        self.config.max_attempts = max;
        self
    }

    pub fn build(self) -> ShellConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use connector_validation::{generic_jdbc, Connection, JobType, Job, FormSet, Severity};
    use std::collections::HashMap;

    fn connector(id: i64, validator: &str) -> ConnectorRecord {
        ConnectorRecord::new(id, "jdbc", validator)
    }

    #[test]
    fn test_defaults() {
        let config = ShellConfig::default();
        assert_eq!(config.repository, PathBuf::from("connectors.json"));
        assert_eq!(config.url_scheme, "jdbc:");
        assert!(!config.strict_job_types);
        assert_eq!(config.max_attempts, None);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ShellConfig = toml::from_str(
            r#"
            repository = "/var/lib/shell/repo.yaml"
            extra_drivers = ["com.acme.Driver"]
            max_attempts = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.repository, PathBuf::from("/var/lib/shell/repo.yaml"));
        assert_eq!(config.extra_drivers, vec!["com.acme.Driver".to_string()]);
        assert_eq!(config.max_attempts, Some(3));
        assert_eq!(config.url_scheme, "jdbc:");
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("CONNECTOR_SHELL_REPOSITORY", "repo.toml"),
            ("CONNECTOR_SHELL_DRIVERS", "com.acme.Driver, com.other.Driver,"),
            ("CONNECTOR_SHELL_STRICT_JOB_TYPES", "true"),
            ("CONNECTOR_SHELL_MAX_ATTEMPTS", "not-a-number"),
        ]
        .into_iter()
        .collect();

        let config = ShellConfig::default().with_env_from(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.repository, PathBuf::from("repo.toml"));
        assert_eq!(config.extra_drivers.len(), 2);
        assert!(config.strict_job_types);
        assert_eq!(config.max_attempts, None);
    }

    #[test]
    fn test_invalid_strict_flag_keeps_current_value() {
        let config = ShellConfig::builder()
            .strict_job_types(true)
            .build()
            .with_env_from(|k| (k == "CONNECTOR_SHELL_STRICT_JOB_TYPES").then(|| "yes".to_string()));
        assert!(config.strict_job_types);

        let config = ShellConfig::default()
            .with_env_from(|k| (k == "CONNECTOR_SHELL_STRICT_JOB_TYPES").then(|| "maybe".to_string()));
        assert!(!config.strict_job_types);
    }

    #[test]
    fn test_builder() {
        let config = ShellConfig::builder()
            .repository("r.json")
            .extra_driver("com.acme.Driver")
            .url_scheme("jdbc:acme:")
            .strict_job_types(true)
            .max_attempts(Some(5))
            .build();
        assert!(config.driver_catalog().is_loadable("com.acme.Driver"));
        assert!(config.driver_catalog().is_loadable("org.postgresql.Driver"));
        assert_eq!(config.max_attempts, Some(5));
    }

    #[test]
    fn test_build_registry() {
        let config = ShellConfig::builder().strict_job_types(true).build();
        let registry = config.build_registry(&[connector(1, GENERIC_JDBC), connector(2, "mainframe")]);

        assert_eq!(registry.len(), 1);
        assert!(registry.get(2).is_err());

        let connection = Connection::new("c", 1, generic_jdbc::connection_forms());
        assert_eq!(registry.validate(&connection).unwrap().len(), 2);

        let job = Job::new("j", 1, 1, JobType::Other("SYNC".to_string()), FormSet::default());
        assert_eq!(registry.validate(&job).unwrap().severity(), Severity::Unacceptable);
    }
}
