//! Integration tests for the connector shell
//!
//! Runs clone, update and validate against a repository document in a
//! temporary directory with the console reading scripted terminal input.

use std::io::Cursor;
use std::path::Path;

use clap::Parser;
use connector_shell::cli::commands::{execute_clone, execute_update, execute_validate, EntityTarget};
use connector_shell::config::GENERIC_JDBC;
use connector_shell::repository::Stored;
use connector_shell::{
    run_cli, AttemptLimit, ConnectorRecord, ConsoleIo, ExitCode, FileRepository, OutputFormat,
    Repository, RepositoryDocument, Shell, ShellCli, ShellConfig,
};
use connector_validation::{generic_jdbc, Connection, Job, JobType};

type Terminal = ConsoleIo<Cursor<Vec<u8>>, Vec<u8>>;

fn terminal(lines: &[&str]) -> Terminal {
    let mut input = lines.join("\n");
    input.push('\n');
    ConsoleIo::new(Cursor::new(input.into_bytes()), Vec::new())
}

fn transcript(io: Terminal) -> String {
    String::from_utf8(io.into_inner().1).unwrap()
}

fn stored<T>(entity: T) -> Stored<T> {
    Stored {
        entity,
        created_at: None,
        updated_at: None,
    }
}

/// Connection 3 has a connection string without the `jdbc:` prefix; job 1
/// names both a table and a query.
fn seed(path: &Path) -> FileRepository {
    let connection_forms = generic_jdbc::connection_forms()
        .with_value("connection", "jdbcDriver", "org.postgresql.Driver")
        .with_value("connection", "connectionString", "postgresql://db/sales");
    let job_forms = generic_jdbc::job_forms(&JobType::Import)
        .with_value("table", "tableName", "orders")
        .with_value("table", "sql", "SELECT * FROM orders");

    let document = RepositoryDocument {
        connectors: vec![ConnectorRecord::new(1, "Generic JDBC", GENERIC_JDBC)
            .with_connection_bundle(generic_jdbc::connection_bundle())
            .with_job_bundle(&JobType::Import, generic_jdbc::job_bundle(&JobType::Import))],
        connections: vec![stored(
            Connection::new("sales", 1, connection_forms).with_persistence_id(3),
        )],
        jobs: vec![stored(
            Job::new("orders import", 3, 1, JobType::Import, job_forms).with_persistence_id(1),
        )],
    };

    FileRepository::create(path, document).unwrap()
}

fn shell(path: &Path) -> Shell<FileRepository> {
    Shell::from_config(seed(path), &ShellConfig::default()).unwrap()
}

#[test]
fn test_clone_connection_after_correction() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("repo.json");
    let mut shell = shell(&path);

    // name, driver, connection string, username, password per pass
    let mut io = terminal(&[
        "sales copy", "", "", "", "",
        "", "", "jdbc:postgresql://db/sales", "", "",
    ]);
    let code = execute_clone(&mut shell, EntityTarget::Connection { xid: 3 }, &mut io).unwrap();
    assert_eq!(code, ExitCode::Success);

    let text = transcript(io);
    assert!(text.contains("Cloning connection with id 3"));
    assert!(text.contains("Error message: This do not seem as a valid JDBC URL"));
    assert!(text.contains("There are issues with entered data"));
    assert!(text.contains("successfully created with validation status FINE and persistent id 4"));

    let reopened = FileRepository::open(&path).unwrap();
    let copy = reopened.connection(4).unwrap();
    assert_eq!(copy.name, "sales copy");
    assert_eq!(
        copy.forms.value("connection", "connectionString"),
        Some("jdbc:postgresql://db/sales")
    );

    let source = reopened.connection(3).unwrap();
    assert_eq!(source.name, "sales");
    assert_eq!(
        source.forms.value("connection", "connectionString"),
        Some("postgresql://db/sales")
    );
}

#[test]
fn test_update_job_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("repo.yaml");
    let mut shell = shell(&path);

    // name, tableName, sql, columns, partitionColumn, boundaryQuery
    let mut io = terminal(&["", "", "-", "", "", ""]);
    let code = execute_update(&mut shell, EntityTarget::Job { jid: 1 }, &mut io).unwrap();
    assert_eq!(code, ExitCode::Success);
    assert!(transcript(io).contains("Job was successfully updated with status FINE"));

    let reopened = FileRepository::open(&path).unwrap();
    let job = reopened.job(1).unwrap();
    assert_eq!(job.forms.value("table", "sql"), None);
    assert_eq!(job.forms.value("table", "tableName"), Some("orders"));
    assert_eq!(reopened.document().jobs.len(), 1);
    assert!(reopened.document().jobs[0].updated_at.is_some());
}

#[test]
fn test_attempt_limit_aborts_without_saving() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("repo.yml");
    let mut shell = shell(&path);

    let mut io = AttemptLimit::new(terminal(&["copy", "", "", "", "", "", "", "", "", ""]), 1);
    let code = execute_clone(&mut shell, EntityTarget::Connection { xid: 3 }, &mut io).unwrap();
    assert_eq!(code, ExitCode::Aborted);
    assert_eq!(io.passes(), 1);

    let text = transcript(io.into_inner());
    assert!(text.contains("Giving up after 1 edit pass(es)"));
    assert!(text.contains("Connection was not saved"));

    let reopened = FileRepository::open(&path).unwrap();
    assert_eq!(reopened.document().connections.len(), 1);
}

#[test]
fn test_validate_renders_report() {
    let dir = tempfile::tempdir().unwrap();
    let shell = shell(&dir.path().join("repo.json"));

    let mut out = Vec::new();
    let code = execute_validate(&shell, EntityTarget::Job { jid: 1 }, OutputFormat::Json, &mut out)
        .unwrap();
    assert_eq!(code, ExitCode::ValidationFailed);

    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value["subject"], "job 1");
    assert_eq!(value["message_count"], 2);
    assert_eq!(value["messages"][0]["text"], "Both table name and SQL cannot be specified");
}

#[test]
fn test_unknown_entity_is_user_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("repo.json");
    drop(seed(&path));

    let cli = ShellCli::parse_from([
        "connector-shell",
        "--repository",
        path.to_str().unwrap(),
        "validate",
        "connection",
        "--xid",
        "42",
    ]);
    assert_eq!(run_cli(cli), ExitCode::InvalidInput);
}

#[test]
fn test_missing_repository_is_file_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");

    let cli = ShellCli::parse_from([
        "connector-shell",
        "--repository",
        path.to_str().unwrap(),
        "validate",
        "job",
        "--jid",
        "1",
    ]);
    assert_eq!(run_cli(cli), ExitCode::FileError);
}
