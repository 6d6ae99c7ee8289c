// used for persistence
use rusqlite::{params, params_from_iter, Connection};
use std::sync::Mutex;
use tracing::{debug, info};

use crate::datatype::{Row, Value};
use crate::error::{Nl2SqlError, Result};
use crate::schema::ColumnDescriptor;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceMode {
    InMemory,
    File(String),
}

impl PersistenceMode {
    /// `:memory:` (or an empty string) selects an in-memory database.
    pub fn from_path(path: &str) -> Self {
        match path.trim() {
            "" | ":memory:" => PersistenceMode::InMemory,
            p => PersistenceMode::File(p.to_string()),
        }
    }
}

/// Columns in result order plus the rows read for a statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryOutput {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

/// The relational store the engine reads from.
///
/// Implementations must be shareable across request threads; any ordering
/// or serialization of access is their own business.
pub trait Storage: Send + Sync {
    /// Runs DDL or seed statements (several may be separated by `;`).
    fn run_statement(&self, sql: &str) -> Result<()>;
    /// Runs a read query with positional parameters bound in order.
    fn query_all(&self, sql: &str, params: &[Value]) -> Result<QueryOutput>;
    /// User tables, sorted by name.
    fn list_tables(&self) -> Result<Vec<String>>;
    fn describe_table(&self, table: &str) -> Result<Vec<ColumnDescriptor>>;
}

// ------------- SQLite -------------
pub struct SqliteStorage {
    connection: Mutex<Connection>,
}

impl SqliteStorage {
    pub fn open(mode: PersistenceMode) -> Result<Self> {
        let connection = match &mode {
            PersistenceMode::InMemory => Connection::open_in_memory()?,
            PersistenceMode::File(path) => Connection::open(path)?,
        };
        info!(?mode, "opened sqlite storage");
        Ok(Self { connection: Mutex::new(connection) })
    }
    pub fn in_memory() -> Result<Self> {
        Self::open(PersistenceMode::InMemory)
    }
    fn connection(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.connection.lock().map_err(|e| Nl2SqlError::Lock(e.to_string()))
    }
}

impl Storage for SqliteStorage {
    fn run_statement(&self, sql: &str) -> Result<()> {
        self.connection()?.execute_batch(sql)?;
        Ok(())
    }

    fn query_all(&self, sql: &str, params: &[Value]) -> Result<QueryOutput> {
        let connection = self.connection()?;
        let mut statement = connection.prepare(sql)?;
        // known from the statement itself, so empty results keep their shape
        let columns: Vec<String> = statement.column_names().into_iter().map(String::from).collect();
        let mut rows = Vec::new();
        let mut cursor = statement.query(params_from_iter(params.iter()))?;
        while let Some(row) = cursor.next()? {
            let mut cells = Vec::with_capacity(columns.len());
            for (i, name) in columns.iter().enumerate() {
                cells.push((name.clone(), Value::from(row.get_ref(i)?)));
            }
            rows.push(Row::new(cells));
        }
        debug!(rows = rows.len(), "query complete");
        Ok(QueryOutput { columns, rows })
    }

    fn list_tables(&self) -> Result<Vec<String>> {
        let connection = self.connection()?;
        let mut statement = connection.prepare(
            "select name from sqlite_master
              where type = 'table' and name not like 'sqlite_%'
              order by name",
        )?;
        let tables = statement
            .query_map([], |r| r.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(tables)
    }

    fn describe_table(&self, table: &str) -> Result<Vec<ColumnDescriptor>> {
        let connection = self.connection()?;
        let mut statement = connection.prepare(
            "select name, type, \"notnull\", pk from pragma_table_info(?1) order by cid",
        )?;
        let columns = statement
            .query_map(params![table], |r| {
                Ok(ColumnDescriptor {
                    name: r.get(0)?,
                    declared_type: r.get(1)?,
                    nullable: r.get::<_, i64>(2)? == 0,
                    // members of a composite key are numbered 1, 2, ...
                    primary_key: r.get::<_, i64>(3)? > 0,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(columns)
    }
}
