use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::persist::Storage;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnDescriptor {
    pub name: String,
    #[serde(rename = "declaredType")]
    pub declared_type: String,
    pub nullable: bool,
    #[serde(rename = "isPrimaryKey")]
    pub primary_key: bool,
}

/// Table name to its columns in declaration order.
pub type SchemaSnapshot = BTreeMap<String, Vec<ColumnDescriptor>>;

/// Lists the tables, then describes them one at a time. Never writes.
pub fn describe_schema(storage: &dyn Storage) -> Result<SchemaSnapshot> {
    let mut snapshot = SchemaSnapshot::new();
    for table in storage.list_tables()? {
        let columns = storage.describe_table(&table)?;
        debug!(%table, columns = columns.len(), "described table");
        snapshot.insert(table, columns);
    }
    Ok(snapshot)
}
