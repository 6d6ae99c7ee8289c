use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use nl2sql::datatype::Value;
use nl2sql::engine::{Engine, FailureKind, Outcome, NOT_UNDERSTOOD};
use nl2sql::error::{Nl2SqlError, Result};
use nl2sql::persist::{QueryOutput, SqliteStorage, Storage};
use nl2sql::plan::Template;
use nl2sql::rules::{Recognizer, RuleTable};
use nl2sql::schema::ColumnDescriptor;
use nl2sql::seed;
use nl2sql::suggestions::SUGGESTIONS;

/// Storage that counts calls and answers every query with nothing.
#[derive(Default)]
struct CountingStorage {
    queries: AtomicUsize,
}

impl Storage for CountingStorage {
    fn run_statement(&self, _sql: &str) -> Result<()> {
        Ok(())
    }
    fn query_all(&self, _sql: &str, _params: &[Value]) -> Result<QueryOutput> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        Ok(QueryOutput::default())
    }
    fn list_tables(&self) -> Result<Vec<String>> {
        Ok(vec![])
    }
    fn describe_table(&self, _table: &str) -> Result<Vec<ColumnDescriptor>> {
        Ok(vec![])
    }
}

/// Storage that refuses everything.
struct BrokenStorage;

impl Storage for BrokenStorage {
    fn run_statement(&self, _sql: &str) -> Result<()> {
        Err(Nl2SqlError::Persistence("disk I/O error".into()))
    }
    fn query_all(&self, _sql: &str, _params: &[Value]) -> Result<QueryOutput> {
        Err(Nl2SqlError::Persistence("disk I/O error".into()))
    }
    fn list_tables(&self) -> Result<Vec<String>> {
        Err(Nl2SqlError::Persistence("disk I/O error".into()))
    }
    fn describe_table(&self, _table: &str) -> Result<Vec<ColumnDescriptor>> {
        Err(Nl2SqlError::Persistence("disk I/O error".into()))
    }
}

#[test]
fn unrecognized_questions_are_rejected_without_touching_storage() {
    let storage = Arc::new(CountingStorage::default());
    let engine = Engine::new().unwrap().with_storage(storage.clone());
    match engine.translate_and_execute("asdkjasdlkj random text") {
        Outcome::Rejected(r) => {
            assert_eq!(r.message, NOT_UNDERSTOOD);
            assert_eq!(r.suggestions, SUGGESTIONS.to_vec());
            assert_eq!(r.query, "asdkjasdlkj random text");
        }
        other => panic!("expected a rejection, got {other:?}"),
    }
    assert_eq!(storage.queries.load(Ordering::SeqCst), 0);

    // a recognized question executes exactly once
    let outcome = engine.translate_and_execute("Show me all employees");
    assert!(outcome.is_success());
    assert_eq!(storage.queries.load(Ordering::SeqCst), 1);
}

#[test]
fn missing_storage_is_a_configuration_failure() {
    let engine = Engine::new().unwrap();
    // translation alone needs no storage
    assert!(engine.translate("Show me all employees").is_matched());
    match engine.translate_and_execute("Show me all employees") {
        Outcome::Failed(f) => {
            assert_eq!(f.kind, FailureKind::Configuration);
            assert_eq!(f.error, "Database not initialized");
            assert!(f.sql.is_some());
        }
        other => panic!("expected a failure, got {other:?}"),
    }
    assert!(matches!(engine.describe_schema(), Err(Nl2SqlError::Configuration(_))));
}

#[test]
fn storage_errors_carry_the_attempted_sql() {
    let mut rules = RuleTable::new();
    rules.push(
        Recognizer::new("broken", "Reads a table that does not exist", &[r"broken"], Template::Static("select * from missing_table"))
            .unwrap(),
    );
    let storage = SqliteStorage::in_memory().unwrap();
    seed::provision(&storage).unwrap();
    let engine = Engine::with_rules(rules).with_storage(Arc::new(storage));
    match engine.translate_and_execute("this is broken") {
        Outcome::Failed(f) => {
            assert_eq!(f.kind, FailureKind::Execution);
            assert!(f.error.contains("no such table"), "unexpected error: {}", f.error);
            assert_eq!(f.sql.as_deref(), Some("select * from missing_table"));
        }
        other => panic!("expected a failure, got {other:?}"),
    }
}

#[test]
fn failing_storage_is_an_execution_failure() {
    let engine = Engine::new().unwrap().with_storage(Arc::new(BrokenStorage));
    match engine.translate_and_execute("What are the total sales?") {
        Outcome::Failed(f) => {
            assert_eq!(f.kind, FailureKind::Execution);
            assert_eq!(f.error, "disk I/O error");
        }
        other => panic!("expected a failure, got {other:?}"),
    }
    assert!(engine.describe_schema().is_err());
}

#[test]
fn execute_reports_sql_alongside_the_message() {
    let engine = Engine::new().unwrap().with_storage(Arc::new(BrokenStorage));
    let plan = engine.translate("What are the total sales?").matched().expect("match").plan;
    match engine.execute(&plan) {
        Err(Nl2SqlError::Execution { message, sql }) => {
            assert_eq!(message, "disk I/O error");
            assert_eq!(sql, plan.sql());
        }
        other => panic!("expected an execution error, got {other:?}"),
    }
}
