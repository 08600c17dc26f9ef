//! Result-set types shared by drivers and decoders

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// A single result cell.
///
/// Administrative statements (`SHOW SLAVE STATUS`, `SHOW PROCESSLIST`, ...)
/// return most columns as text, so decoders reach for the lenient
/// conversions below rather than matching on the variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub enum Value {
    /// NULL or absent value
    #[default]
    Null,
    /// Boolean
    Bool(bool),
    /// 64-bit signed integer
    Int64(i64),
    /// 64-bit unsigned integer
    UInt64(u64),
    /// 64-bit floating point
    Float64(f64),
    /// UTF-8 string
    String(String),
    /// Raw bytes that were not valid UTF-8
    Bytes(Vec<u8>),
}

impl Value {
    /// Check if the value is NULL
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Try to get as a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as i64
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int64(v) => Some(*v),
            Value::UInt64(v) => i64::try_from(*v).ok(),
            Value::Bool(v) => Some(*v as i64),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            Value::Bytes(b) => std::str::from_utf8(b).ok()?.trim().parse::<i64>().ok(),
            _ => None,
        }
    }

    /// Try to get as u64
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Int64(v) => u64::try_from(*v).ok(),
            Value::UInt64(v) => Some(*v),
            Value::Bool(v) => Some(*v as u64),
            Value::String(s) => s.trim().parse::<u64>().ok(),
            Value::Bytes(b) => std::str::from_utf8(b).ok()?.trim().parse::<u64>().ok(),
            _ => None,
        }
    }

    /// Try to get as bool, accepting the usual textual spellings
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            Value::Int64(v) => Some(*v != 0),
            Value::UInt64(v) => Some(*v != 0),
            Value::String(s) => parse_bool_text(s),
            Value::Bytes(b) => parse_bool_text(std::str::from_utf8(b).ok()?),
            _ => None,
        }
    }

    /// Render the cell as text. NULL becomes the empty string.
    pub fn to_text(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(v) => if *v { "1" } else { "0" }.to_string(),
            Value::Int64(v) => v.to_string(),
            Value::UInt64(v) => v.to_string(),
            Value::Float64(v) => v.to_string(),
            Value::String(s) => s.clone(),
            Value::Bytes(b) => String::from_utf8_lossy(b).into_owned(),
        }
    }

    /// Integer conversion where anything unparseable becomes zero
    pub fn to_i64_lenient(&self) -> i64 {
        self.as_i64().unwrap_or(0)
    }

    /// Unsigned conversion where anything unparseable (or negative) becomes zero
    pub fn to_u64_lenient(&self) -> u64 {
        self.as_u64().unwrap_or(0)
    }

    /// Boolean conversion where anything unparseable becomes `false`
    pub fn to_bool_lenient(&self) -> bool {
        self.as_bool().unwrap_or(false)
    }
}

fn parse_bool_text(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "t" | "true" | "y" | "yes" | "on" => Some(true),
        "0" | "f" | "false" | "n" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Bytes(v) => write!(f, "<{} bytes>", v.len()),
            other => write!(f, "{}", other.to_text()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::UInt64(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

/// A row from a query result
#[derive(Debug, Clone)]
pub struct Row {
    /// Column values
    pub values: Vec<Value>,
    /// Column names (shared across the rows of one result)
    columns: Arc<[String]>,
}

impl Row {
    /// Create a new row
    pub fn new(columns: Arc<[String]>, values: Vec<Value>) -> Self {
        Self { values, columns }
    }

    /// Get a value by column index
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Get a value by column name
    pub fn get_by_name(&self, name: &str) -> Option<&Value> {
        self.columns
            .iter()
            .position(|c| c == name)
            .and_then(|idx| self.values.get(idx))
    }

    /// Get column names
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Convert to a map keyed by column name
    pub fn to_map(&self) -> BTreeMap<String, Value> {
        self.columns
            .iter()
            .zip(self.values.iter())
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

/// Query result
#[derive(Debug, Clone, Default)]
pub struct QueryResult {
    /// Column names in result order
    pub columns: Arc<[String]>,
    /// Result rows
    pub rows: Vec<Row>,
    /// Execution time in milliseconds
    pub execution_time_ms: u64,
}

impl QueryResult {
    /// Create an empty query result
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a result from column names and raw rows.
    ///
    /// Rows shorter than the column list are padded with NULL; extra cells
    /// are dropped.
    pub fn from_rows<C, S>(columns: C, rows: Vec<Vec<Value>>) -> Self
    where
        C: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Arc<[String]> = columns.into_iter().map(Into::into).collect();
        let rows = rows
            .into_iter()
            .map(|mut values| {
                values.resize(columns.len(), Value::Null);
                Row::new(columns.clone(), values)
            })
            .collect();
        Self {
            columns,
            rows,
            execution_time_ms: 0,
        }
    }

    /// Check if the result has rows
    pub fn has_rows(&self) -> bool {
        !self.rows.is_empty()
    }

    /// Get the number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// One column-name -> value map per row, in row order
    pub fn to_maps(&self) -> Vec<BTreeMap<String, Value>> {
        self.rows.iter().map(Row::to_map).collect()
    }
}

/// Result of a statement that returns no rows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatementResult {
    /// Rows affected
    pub affected_rows: u64,
}
