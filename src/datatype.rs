// used for parameter binding and reading result cells
use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::types::Value as SqliteValue;

// rows are serialized as JSON objects in column order
use serde::ser::{Serialize, SerializeMap, Serializer};

// used to print out readable forms of a value
use std::fmt;

/// A scalar that is either bound into a plan as a parameter or read back
/// from storage as a result cell.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl Value {
    /// Reads captured digits such as `100000`, `49.99` or `100,000`.
    /// Integers stay integers so that SQLite compares them exactly.
    pub fn numeric(text: &str) -> Value {
        let digits: String = text.trim().chars().filter(|c| *c != ',').collect();
        if let Ok(i) = digits.parse::<i64>() {
            Value::Integer(i)
        } else if let Ok(f) = digits.parse::<f64>() {
            Value::Real(f)
        } else {
            Value::Text(digits)
        }
    }
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Real(f) => Some(*f),
            _ => None,
        }
    }
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Real(r) => write!(f, "{}", r),
            Value::Text(s) => write!(f, "{}", s),
            Value::Blob(b) => write!(f, "<{} bytes>", b.len()),
        }
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self { Value::Integer(i) }
}
impl From<f64> for Value {
    fn from(f: f64) -> Self { Value::Real(f) }
}
impl From<&str> for Value {
    fn from(s: &str) -> Self { Value::Text(s.to_string()) }
}
impl From<String> for Value {
    fn from(s: String) -> Self { Value::Text(s) }
}

impl From<ValueRef<'_>> for Value {
    fn from(value: ValueRef<'_>) -> Self {
        match value {
            ValueRef::Null => Value::Null,
            ValueRef::Integer(i) => Value::Integer(i),
            ValueRef::Real(f) => Value::Real(f),
            ValueRef::Text(t) => Value::Text(String::from_utf8_lossy(t).into_owned()),
            ValueRef::Blob(b) => Value::Blob(b.to_vec()),
        }
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Value::Null => ToSqlOutput::Owned(SqliteValue::Null),
            Value::Integer(i) => ToSqlOutput::Owned(SqliteValue::Integer(*i)),
            Value::Real(f) => ToSqlOutput::Owned(SqliteValue::Real(*f)),
            Value::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
            Value::Blob(b) => ToSqlOutput::Borrowed(ValueRef::Blob(b.as_slice())),
        })
    }
}

impl FromSql for Value {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        Ok(Value::from(value))
    }
}

/// One result row: column names paired with their values, in result order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    cells: Vec<(String, Value)>,
}

impl Row {
    pub fn new(cells: Vec<(String, Value)>) -> Self {
        Self { cells }
    }
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.cells.iter().find(|(name, _)| name == column).map(|(_, v)| v)
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (name, value) in &self.cells {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_captures_keep_their_kind() {
        assert_eq!(Value::numeric("100000"), Value::Integer(100000));
        assert_eq!(Value::numeric("100,000"), Value::Integer(100000));
        assert_eq!(Value::numeric("49.99"), Value::Real(49.99));
        assert_eq!(Value::numeric("n/a"), Value::Text("n/a".into()));
    }

    #[test]
    fn rows_serialize_in_column_order() {
        let row = Row::new(vec![
            ("zeta".into(), Value::Integer(1)),
            ("alpha".into(), Value::Null),
            ("name".into(), Value::from("Laptop Pro 15")),
        ]);
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"zeta":1,"alpha":null,"name":"Laptop Pro 15"}"#);
        assert_eq!(row.get("name").and_then(Value::as_str), Some("Laptop Pro 15"));
    }
}
