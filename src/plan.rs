//! Plan building: turning a recognizer's template plus the captures of a
//! successful match into SQL text and the values bound to its placeholders.
//!
//! Captured text never becomes part of the SQL string. Generators write
//! positional placeholders (`?1`, `?2`, ...) and bind the captures through
//! [`Plan::bind`], so quotes or SQL fragments typed by a user are only ever
//! seen by SQLite as data.

use std::fmt;

use chrono::Month;
use lazy_static::lazy_static;
use regex::Regex;

use crate::datatype::Value;

lazy_static! {
    static ref YEAR_MONTH: Regex = Regex::new(r"^\d{4}-\d{2}$").unwrap();
    static ref MONTH_YEAR: Regex = Regex::new(r"^([[:alpha:]]+)\s+(\d{4})$").unwrap();
}

/// Positional capture groups of a match. Index 0 is the whole match,
/// optional groups that did not participate are `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Captures {
    groups: Vec<Option<String>>,
}

impl Captures {
    pub fn new(groups: Vec<Option<String>>) -> Self {
        Self { groups }
    }
    pub(crate) fn from_regex(captures: &regex::Captures<'_>) -> Self {
        Self {
            groups: captures
                .iter()
                .map(|group| group.map(|m| m.as_str().to_string()))
                .collect(),
        }
    }
    /// Group `index`, trimmed, or `None` when absent or blank.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.groups
            .get(index)
            .and_then(|g| g.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
    /// Groups 1..n in order, the whole match excluded.
    pub fn groups(&self) -> Vec<Option<&str>> {
        (1..self.groups.len()).map(|i| self.get(i)).collect()
    }
}

/// An executable statement: SQL text with positional placeholders and the
/// values bound to them, in placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    sql: String,
    params: Vec<Value>,
}

impl Plan {
    pub fn new(sql: impl Into<String>) -> Self {
        Self { sql: sql.into(), params: Vec::new() }
    }
    /// Binds the next placeholder (`?1` for the first call, `?2` for the second, ...).
    pub fn bind(mut self, value: impl Into<Value>) -> Self {
        self.params.push(value.into());
        self
    }
    pub fn sql(&self) -> &str {
        &self.sql
    }
    pub fn params(&self) -> &[Value] {
        &self.params
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sql)?;
        if !self.params.is_empty() {
            let params: Vec<String> = self.params.iter().map(|p| p.to_string()).collect();
            write!(f, " -- [{}]", params.join(", "))?;
        }
        Ok(())
    }
}

pub type Generator = fn(&Captures) -> Plan;

/// How a recognizer produces its statement.
#[derive(Clone, Copy)]
pub enum Template {
    Static(&'static str),
    Generator(Generator),
}

impl Template {
    pub fn materialize(&self, captures: &Captures) -> Plan {
        match self {
            Template::Static(sql) => Plan::new(*sql),
            Template::Generator(generate) => generate(captures),
        }
    }
    pub fn is_static(&self) -> bool {
        matches!(self, Template::Static(_))
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Template::Static(sql) => f.debug_tuple("Static").field(sql).finish(),
            Template::Generator(_) => f.write_str("Generator"),
        }
    }
}

// ------------- capture helpers used by the generators -------------

/// Wraps a capture in `%...%` for `LIKE ... ESCAPE '\'`, escaping the
/// wildcard characters the user may have typed.
pub fn contains(captures: &Captures, index: usize) -> Value {
    let text = captures.get(index).unwrap_or("");
    let mut escaped = String::with_capacity(text.len() + 2);
    escaped.push('%');
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    Value::Text(escaped)
}

/// The capture as plain text, e.g. a `YYYY-MM-DD` date.
pub fn text(captures: &Captures, index: usize) -> Value {
    captures.get(index).map(Value::from).unwrap_or(Value::Null)
}

/// The capture as an integer or real number.
pub fn number(captures: &Captures, index: usize) -> Value {
    captures.get(index).map(Value::numeric).unwrap_or(Value::Null)
}

/// Normalizes `2023-02` or `February 2023` to `YYYY-MM`.
pub fn year_month(text: &str) -> Option<String> {
    let text = text.trim();
    if YEAR_MONTH.is_match(text) {
        return Some(text.to_string());
    }
    let captures = MONTH_YEAR.captures(text)?;
    let month = captures.get(1)?.as_str().parse::<Month>().ok()?;
    Some(format!("{}-{:02}", captures.get(2)?.as_str(), month.number_from_month()))
}

/// SQLite date modifier for "the last `amount` `unit`s", always in months.
/// The default applies only when no amount was given; an amount that does
/// not fit binds `NULL`, which no hire date satisfies.
pub fn months_back(amount: Option<&str>, unit: Option<&str>, default_months: u64) -> Value {
    let Some(amount) = amount else {
        return Value::Text(format!("-{} months", default_months));
    };
    let years = unit.is_some_and(|u| u.to_lowercase().starts_with("year"));
    let months = amount
        .parse::<u64>()
        .ok()
        .and_then(|n| if years { n.checked_mul(12) } else { Some(n) });
    match months {
        Some(months) => Value::Text(format!("-{} months", months)),
        None => Value::Null,
    }
}
