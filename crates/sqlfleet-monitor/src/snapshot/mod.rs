//! Diagnostic snapshots
//!
//! Turns the result sets of MySQL administrative statements into typed records.

mod decode;
mod records;


pub use decode::{
    FromSnapshotRow, SnapshotRow, decode_all, decode_first, decode_innodb_status_text,
    decode_master_status, decode_process_list, decode_slave_status, decode_variables,
    snapshot_rows,
};
pub use records::{MasterStatus, Process, SlaveStatus, ThreadState};
