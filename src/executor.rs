use serde::Serialize;

use crate::datatype::Row;
use crate::error::{Nl2SqlError, Result};
use crate::persist::Storage;
use crate::plan::Plan;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutionResult {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
    pub row_count: usize,
}

/// Runs `plan` once. Every storage failure becomes a single
/// [`Nl2SqlError::Execution`] carrying the storage message and the SQL.
pub fn execute(storage: Option<&dyn Storage>, plan: &Plan) -> Result<ExecutionResult> {
    let storage = storage.ok_or_else(|| Nl2SqlError::Configuration("Database not initialized".to_string()))?;
    let output = storage.query_all(plan.sql(), plan.params()).map_err(|e| Nl2SqlError::Execution {
        message: e.detail(),
        sql: plan.sql().to_string(),
    })?;
    Ok(ExecutionResult { row_count: output.rows.len(), columns: output.columns, rows: output.rows })
}
