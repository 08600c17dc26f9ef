//! Projection of result rows onto diagnostic records
//!
//! Decoding is lenient: a missing column, a NULL or an unparseable cell
//! leaves the field at its zero value instead of failing.

use sqlfleet_core::{QueryResult, Value};
use std::collections::BTreeMap;

use super::records::{MasterStatus, Process, SlaveStatus};

/// One result row as a column-name -> cell map
#[derive(Debug, Clone)]
pub struct SnapshotRow {
    cells: BTreeMap<String, Value>,
    alias: fn(&str) -> Option<String>,
}

fn no_alias(_: &str) -> Option<String> {
    None
}

impl SnapshotRow {
    pub fn new(cells: BTreeMap<String, Value>) -> Self {
        Self {
            cells,
            alias: no_alias,
        }
    }

    /// Also look columns up under an alternate name when the primary one is absent
    pub fn with_alias(mut self, alias: fn(&str) -> Option<String>) -> Self {
        self.alias = alias;
        self
    }

    /// Raw cell of a column
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.cells
            .get(column)
            .or_else(|| (self.alias)(column).and_then(|alt| self.cells.get(&alt)))
    }

    /// Text of a column; absent or NULL is empty
    pub fn text(&self, column: &str) -> String {
        self.get(column).map(Value::to_text).unwrap_or_default()
    }

    /// Unsigned integer of a column; absent or unparseable is zero
    pub fn uint(&self, column: &str) -> u64 {
        self.get(column).map(Value::to_u64_lenient).unwrap_or(0)
    }

    /// TCP port of a column; out of range is zero
    pub fn port(&self, column: &str) -> u16 {
        u16::try_from(self.uint(column)).unwrap_or(0)
    }

    /// Boolean of a column; absent or unparseable is `false`
    pub fn flag(&self, column: &str) -> bool {
        self.get(column).map(Value::to_bool_lenient).unwrap_or(false)
    }

    /// Unsigned integer of a column that is legitimately NULL at times
    pub fn nullable_uint(&self, column: &str) -> Option<u64> {
        self.get(column).and_then(Value::as_u64)
    }
}

/// A record that can be filled from one result row
pub trait FromSnapshotRow: Sized {
    fn from_row(row: &SnapshotRow) -> Self;

    /// Alternate column name tried when `column` is not in the row
    fn column_alias(_column: &str) -> Option<String> {
        None
    }
}

/// Split a result into per-row maps, preserving row order
pub fn snapshot_rows(result: &QueryResult) -> Vec<SnapshotRow> {
    result.to_maps().into_iter().map(SnapshotRow::new).collect()
}

/// Decode the first row, or the zero value when there is none
pub fn decode_first<T: FromSnapshotRow + Default>(result: &QueryResult) -> T {
    snapshot_rows(result)
        .into_iter()
        .next()
        .map(|row| T::from_row(&row.with_alias(T::column_alias)))
        .unwrap_or_default()
}

/// Decode every row, in order
pub fn decode_all<T: FromSnapshotRow>(result: &QueryResult) -> Vec<T> {
    snapshot_rows(result)
        .into_iter()
        .map(|row| T::from_row(&row.with_alias(T::column_alias)))
        .collect()
}

/// Decode `SHOW MASTER STATUS`.
///
/// An empty result (binary logging disabled) yields the zero value.
pub fn decode_master_status(result: &QueryResult) -> MasterStatus {
    decode_first(result)
}

/// Decode `SHOW SLAVE STATUS` or `SHOW REPLICA STATUS`.
///
/// An empty result yields the zero value, meaning no replication is configured.
pub fn decode_slave_status(result: &QueryResult) -> SlaveStatus {
    decode_first(result)
}

/// Decode `SHOW PROCESSLIST`
pub fn decode_process_list(result: &QueryResult) -> Vec<Process> {
    decode_all(result)
}

/// Decode `SHOW GLOBAL VARIABLES` or `SHOW GLOBAL STATUS` into a name -> value map.
///
/// Rows without a `Variable_name` are skipped.
pub fn decode_variables(result: &QueryResult) -> BTreeMap<String, String> {
    snapshot_rows(result)
        .iter()
        .filter_map(|row| {
            let name = row.text("Variable_name");
            (!name.is_empty()).then(|| (name, row.text("Value")))
        })
        .collect()
}

/// Extract the monitor text of `SHOW ENGINE INNODB STATUS`
pub fn decode_innodb_status_text(result: &QueryResult) -> String {
    snapshot_rows(result)
        .first()
        .map(|row| row.text("Status"))
        .unwrap_or_default()
}
