//! Generic JDBC connector
//!
//! Declares the forms the connector uses for connections and jobs, their
//! default display strings, and the validator enforcing its semantic rules.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

use super::rules::{self, ExclusivePair};
use super::{unrecognized_job_type, Validator};
use crate::model::{Form, FormSet, Input, JobType, ResourceBundle};
use crate::report::ValidationReport;
use crate::severity::Severity;

pub const CONNECTION_FORM: &str = "connection";
pub const JDBC_DRIVER: &str = "jdbcDriver";
pub const CONNECTION_STRING: &str = "connectionString";
pub const USERNAME: &str = "username";
pub const PASSWORD: &str = "password";

pub const TABLE_FORM: &str = "table";
pub const TABLE_NAME: &str = "tableName";
pub const SQL: &str = "sql";
pub const COLUMNS: &str = "columns";
pub const PARTITION_COLUMN: &str = "partitionColumn";
pub const BOUNDARY_QUERY: &str = "boundaryQuery";

/// Scheme every JDBC connection string starts with
pub const DEFAULT_URL_SCHEME: &str = "jdbc:";

const TABLE_SOURCE: ExclusivePair<'static> = ExclusivePair {
    form: TABLE_FORM,
    first: TABLE_NAME,
    second: SQL,
    missing: "Either table name or SQL must be specified",
    conflicting: "Both table name and SQL cannot be specified",
};

/// Driver classes known without further configuration
const WELL_KNOWN_DRIVERS: &[&str] = &[
    "org.postgresql.Driver",
    "com.mysql.jdbc.Driver",
    "com.mysql.cj.jdbc.Driver",
    "org.mariadb.jdbc.Driver",
    "org.apache.derby.jdbc.EmbeddedDriver",
    "org.apache.derby.jdbc.ClientDriver",
    "org.h2.Driver",
    "oracle.jdbc.OracleDriver",
    "oracle.jdbc.driver.OracleDriver",
    "com.microsoft.sqlserver.jdbc.SQLServerDriver",
    "org.sqlite.JDBC",
    "org.hsqldb.jdbc.JDBCDriver",
];

static DRIVER_CLASS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*(\.[A-Za-z_$][A-Za-z0-9_$]*)*$")
        .expect("driver class pattern is valid")
});

/// Set of driver identifiers that can be loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverCatalog {
    drivers: BTreeSet<String>,
}

impl Default for DriverCatalog {
    fn default() -> Self {
        Self::empty().with_drivers(WELL_KNOWN_DRIVERS.iter().copied())
    }
}

impl DriverCatalog {
    /// Catalog with no known drivers
    pub fn empty() -> Self {
        Self {
            drivers: BTreeSet::new(),
        }
    }

    pub fn with_driver(mut self, driver: impl Into<String>) -> Self {
        self.drivers.insert(driver.into());
        self
    }

    pub fn with_drivers<I, S>(mut self, drivers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.drivers.extend(drivers.into_iter().map(Into::into));
        self
    }

    /// Whether the identifier is a well formed class name present in the catalog
    pub fn is_loadable(&self, driver: &str) -> bool {
        DRIVER_CLASS.is_match(driver) && self.drivers.contains(driver)
    }

    pub fn drivers(&self) -> impl Iterator<Item = &str> {
        self.drivers.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.drivers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drivers.is_empty()
    }
}

/// Validator for the generic JDBC connector
#[derive(Debug, Clone)]
pub struct GenericJdbcValidator {
    drivers: DriverCatalog,
    url_scheme: String,
}

impl Default for GenericJdbcValidator {
    fn default() -> Self {
        Self::new(DriverCatalog::default())
    }
}

impl GenericJdbcValidator {
    pub fn new(drivers: DriverCatalog) -> Self {
        Self {
            drivers,
            url_scheme: DEFAULT_URL_SCHEME.to_string(),
        }
    }

    /// Override the prefix connection strings must start with
    pub fn with_url_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.url_scheme = scheme.into();
        self
    }

    pub fn drivers(&self) -> &DriverCatalog {
        &self.drivers
    }

    fn validate_table_job(&self, config: &FormSet) -> ValidationReport {
        let mut report = ValidationReport::new();
        rules::exactly_one_of(&mut report, config, &TABLE_SOURCE);
        report
    }
}

impl Validator for GenericJdbcValidator {
    fn name(&self) -> &str {
        "generic-jdbc"
    }

    fn validate_connection(&self, config: &FormSet) -> ValidationReport {
        let mut report = ValidationReport::new();

        if let Some(driver) =
            rules::require(&mut report, config, CONNECTION_FORM, JDBC_DRIVER, "Driver can't be empty")
        {
            if !self.drivers.is_loadable(driver) {
                report.add_message(
                    Severity::Unacceptable,
                    CONNECTION_FORM,
                    JDBC_DRIVER,
                    "Can't load specified driver",
                );
            }
        }

        if let Some(url) = rules::require(
            &mut report,
            config,
            CONNECTION_FORM,
            CONNECTION_STRING,
            "JDBC URL can't be empty",
        ) {
            if !url.starts_with(&self.url_scheme) {
                report.add_message(
                    Severity::Unacceptable,
                    CONNECTION_FORM,
                    CONNECTION_STRING,
                    "This do not seem as a valid JDBC URL",
                );
            }
        }

        report
    }

    fn validate_job(&self, job_type: &JobType, config: &FormSet) -> ValidationReport {
        match job_type {
            JobType::Import | JobType::Export => self.validate_table_job(config),
            other => unrecognized_job_type(self.name(), other),
        }
    }

    fn supports_job_type(&self, job_type: &JobType) -> bool {
        matches!(job_type, JobType::Import | JobType::Export)
    }
}

/// Empty connection forms of the generic JDBC connector
pub fn connection_forms() -> FormSet {
    FormSet::new(vec![Form::new(
        CONNECTION_FORM,
        vec![
            Input::new(JDBC_DRIVER),
            Input::new(CONNECTION_STRING),
            Input::new(USERNAME),
            Input::sensitive(PASSWORD),
        ],
    )])
}

/// Empty job forms of the generic JDBC connector
pub fn job_forms(job_type: &JobType) -> FormSet {
    let mut inputs = vec![Input::new(TABLE_NAME), Input::new(SQL), Input::new(COLUMNS)];
    if *job_type == JobType::Import {
        inputs.push(Input::new(PARTITION_COLUMN));
        inputs.push(Input::new(BOUNDARY_QUERY));
    }
    FormSet::new(vec![Form::new(TABLE_FORM, inputs)])
}

/// Default display strings for connection forms
pub fn connection_bundle() -> ResourceBundle {
    ResourceBundle::new()
        .with_entry("connection.label", "Connection configuration")
        .with_entry("connection.jdbcDriver.label", "JDBC Driver Class")
        .with_entry("connection.jdbcDriver.help", "Fully qualified class name of the JDBC driver")
        .with_entry("connection.connectionString.label", "JDBC Connection String")
        .with_entry("connection.connectionString.help", "JDBC URL, for example jdbc:postgresql://host/db")
        .with_entry("connection.username.label", "Username")
        .with_entry("connection.password.label", "Password")
}

/// Default display strings for job forms
pub fn job_bundle(job_type: &JobType) -> ResourceBundle {
    let bundle = ResourceBundle::new()
        .with_entry("table.label", "Database configuration")
        .with_entry("table.tableName.label", "Table name")
        .with_entry("table.sql.label", "Table SQL statement")
        .with_entry("table.sql.help", "Query used instead of a table, mutually exclusive with the table name")
        .with_entry("table.columns.label", "Table column names");

    if *job_type == JobType::Import {
        bundle
            .with_entry("table.partitionColumn.label", "Partition column name")
            .with_entry("table.boundaryQuery.label", "Boundary query")
    } else {
        bundle
    }
}
