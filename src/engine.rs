//! The translation orchestrator.
//!
//! An [`Engine`] owns a rule table and, optionally, a storage collaborator.
//! It is built explicitly and shared by reference (usually behind an `Arc`),
//! so every test or server gets its own instance.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::datatype::{Row, Value};
use crate::error::{Nl2SqlError, Result};
use crate::executor::{self, ExecutionResult};
use crate::matcher::{self, MatchResult};
use crate::persist::Storage;
use crate::plan::Plan;
use crate::rules::RuleTable;
use crate::schema::{self, SchemaSnapshot};
use crate::suggestions::SUGGESTIONS;

pub const NOT_UNDERSTOOD: &str =
    "I couldn't understand that query. Try asking about employees, sales, products, or departments.";

#[derive(Debug, Clone, Serialize)]
pub struct Translation {
    pub query: String,
    pub recognizer: &'static str,
    pub description: &'static str,
    pub sql: String,
    pub params: Vec<Value>,
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
    pub row_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct Rejection {
    pub query: String,
    pub message: &'static str,
    pub suggestions: Vec<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureKind {
    /// No storage collaborator was available.
    Configuration,
    /// Storage rejected or failed to run the statement.
    Execution,
}

#[derive(Debug, Clone, Serialize)]
pub struct Failure {
    pub query: String,
    pub kind: FailureKind,
    pub error: String,
    pub sql: Option<String>,
}

/// Terminal state of one translation request.
#[derive(Debug, Clone)]
pub enum Outcome {
    Succeeded(Translation),
    Rejected(Rejection),
    Failed(Failure),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Succeeded(_))
    }
}

pub struct Engine {
    rules: RuleTable,
    storage: Option<Arc<dyn Storage>>,
}

impl Engine {
    /// The built-in rule table without storage; attach one with [`Engine::with_storage`].
    pub fn new() -> Result<Self> {
        Ok(Self::with_rules(RuleTable::builtin()?))
    }
    pub fn with_rules(rules: RuleTable) -> Self {
        Self { rules, storage: None }
    }
    pub fn with_storage(mut self, storage: Arc<dyn Storage>) -> Self {
        self.storage = Some(storage);
        self
    }
    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }
    pub fn storage(&self) -> Option<&dyn Storage> {
        self.storage.as_deref()
    }
    pub fn suggestions(&self) -> &'static [&'static str] {
        SUGGESTIONS
    }

    pub fn translate(&self, query: &str) -> MatchResult<'_> {
        matcher::find_match(&self.rules, query)
    }

    pub fn execute(&self, plan: &Plan) -> Result<ExecutionResult> {
        executor::execute(self.storage(), plan)
    }

    /// Matches, and only on a match executes. Errors end up in
    /// [`Outcome::Failed`], never dropped.
    pub fn translate_and_execute(&self, query: &str) -> Outcome {
        let found = match self.translate(query) {
            MatchResult::Matched(found) => found,
            MatchResult::NotMatched => {
                debug!(query, "rejected");
                return Outcome::Rejected(Rejection {
                    query: query.to_string(),
                    message: NOT_UNDERSTOOD,
                    suggestions: SUGGESTIONS.to_vec(),
                });
            }
        };
        match self.execute(&found.plan) {
            Ok(result) => {
                info!(recognizer = found.recognizer.name(), rows = result.row_count, "query complete");
                Outcome::Succeeded(Translation {
                    query: query.to_string(),
                    recognizer: found.recognizer.name(),
                    description: found.description(),
                    sql: found.plan.sql().to_string(),
                    params: found.plan.params().to_vec(),
                    columns: result.columns,
                    rows: result.rows,
                    row_count: result.row_count,
                })
            }
            Err(e) => {
                warn!(recognizer = found.recognizer.name(), error = %e, "query failed");
                let kind = match e {
                    Nl2SqlError::Configuration(_) => FailureKind::Configuration,
                    _ => FailureKind::Execution,
                };
                Outcome::Failed(Failure {
                    query: query.to_string(),
                    kind,
                    error: e.detail(),
                    sql: Some(found.plan.sql().to_string()),
                })
            }
        }
    }

    pub fn describe_schema(&self) -> Result<SchemaSnapshot> {
        let storage = self
            .storage()
            .ok_or_else(|| Nl2SqlError::Configuration("Database not initialized".to_string()))?;
        schema::describe_schema(storage)
    }
}
