//! Typed diagnostic records
//!
//! Field sets follow MySQL 5.6 `SHOW MASTER STATUS`, `SHOW SLAVE STATUS` and
//! `SHOW PROCESSLIST`. Every record's `Default` is its zero value.

use serde::{Deserialize, Serialize};
use sqlfleet_core::Endpoint;

use super::decode::{FromSnapshotRow, SnapshotRow};

/// Current binary log write position of a master
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterStatus {
    pub file: String,
    pub position: u64,
    pub binlog_do_db: String,
    pub binlog_ignore_db: String,
    pub executed_gtid_set: String,
}

impl MasterStatus {
    /// Whether the master reported no binary log at all
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl FromSnapshotRow for MasterStatus {
    fn from_row(row: &SnapshotRow) -> Self {
        Self {
            file: row.text("File"),
            position: row.uint("Position"),
            binlog_do_db: row.text("Binlog_Do_DB"),
            binlog_ignore_db: row.text("Binlog_Ignore_DB"),
            executed_gtid_set: row.text("Executed_Gtid_Set"),
        }
    }
}

/// State of a replication thread as reported in `Slave_IO_Running` and
/// `Slave_SQL_Running`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreadState {
    Yes,
    No,
    Connecting,
    Other(String),
}

impl ThreadState {
    /// Interpret the raw flag text. Matching is exact and case-sensitive.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "Yes" => ThreadState::Yes,
            "No" => ThreadState::No,
            "Connecting" => ThreadState::Connecting,
            other => ThreadState::Other(other.to_string()),
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, ThreadState::Yes)
    }
}

impl std::fmt::Display for ThreadState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThreadState::Yes => write!(f, "Yes"),
            ThreadState::No => write!(f, "No"),
            ThreadState::Connecting => write!(f, "Connecting"),
            ThreadState::Other(s) => write!(f, "{s}"),
        }
    }
}

/// Replication state of a slave.
///
/// The all-default value means the endpoint has no replication configured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlaveStatus {
    pub slave_io_state: String,
    pub master_host: String,
    pub master_user: String,
    pub master_port: u16,
    pub connect_retry: u64,
    pub master_log_file: String,
    pub read_master_log_pos: u64,
    pub relay_log_file: String,
    pub relay_log_pos: u64,
    pub relay_master_log_file: String,
    pub slave_io_running: String,
    pub slave_sql_running: String,
    pub replicate_do_db: String,
    pub replicate_ignore_db: String,
    pub replicate_do_table: String,
    pub replicate_ignore_table: String,
    pub replicate_wild_do_table: String,
    pub replicate_wild_ignore_table: String,
    pub last_errno: u64,
    pub last_error: String,
    pub skip_counter: u64,
    pub exec_master_log_pos: u64,
    pub relay_log_space: u64,
    pub until_condition: String,
    pub until_log_file: String,
    pub until_log_pos: u64,
    pub master_ssl_allowed: String,
    pub master_ssl_ca_file: String,
    pub master_ssl_ca_path: String,
    pub master_ssl_cert: String,
    pub master_ssl_cipher: String,
    pub master_ssl_key: String,
    /// NULL while the slave is not replicating
    pub seconds_behind_master: Option<u64>,
    pub master_ssl_verify_server_cert: String,
    pub last_io_errno: u64,
    pub last_io_error: String,
    pub last_sql_errno: u64,
    pub last_sql_error: String,
    pub replicate_ignore_server_ids: String,
    pub master_server_id: u64,
    pub master_uuid: String,
    pub master_info_file: String,
    pub sql_delay: u64,
    pub sql_remaining_delay: Option<u64>,
    pub slave_sql_running_state: String,
    pub master_retry_count: u64,
    pub master_bind: String,
    pub last_io_error_timestamp: String,
    pub last_sql_error_timestamp: String,
    pub master_ssl_crl: String,
    pub master_ssl_crlpath: String,
    pub retrieved_gtid_set: String,
    pub executed_gtid_set: String,
    pub auto_position: bool,
}

impl SlaveStatus {
    /// Whether this is the "no replication configured" sentinel
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// The master this slave is configured to replicate from
    pub fn master_endpoint(&self) -> Endpoint {
        Endpoint::new(self.master_host.clone(), self.master_port)
    }

    pub fn io_thread(&self) -> ThreadState {
        ThreadState::parse(&self.slave_io_running)
    }

    pub fn sql_thread(&self) -> ThreadState {
        ThreadState::parse(&self.slave_sql_running)
    }
}

impl FromSnapshotRow for SlaveStatus {
    fn from_row(row: &SnapshotRow) -> Self {
        Self {
            slave_io_state: row.text("Slave_IO_State"),
            master_host: row.text("Master_Host"),
            master_user: row.text("Master_User"),
            master_port: row.port("Master_Port"),
            connect_retry: row.uint("Connect_Retry"),
            master_log_file: row.text("Master_Log_File"),
            read_master_log_pos: row.uint("Read_Master_Log_Pos"),
            relay_log_file: row.text("Relay_Log_File"),
            relay_log_pos: row.uint("Relay_Log_Pos"),
            relay_master_log_file: row.text("Relay_Master_Log_File"),
            slave_io_running: row.text("Slave_IO_Running"),
            slave_sql_running: row.text("Slave_SQL_Running"),
            replicate_do_db: row.text("Replicate_Do_DB"),
            replicate_ignore_db: row.text("Replicate_Ignore_DB"),
            replicate_do_table: row.text("Replicate_Do_Table"),
            replicate_ignore_table: row.text("Replicate_Ignore_Table"),
            replicate_wild_do_table: row.text("Replicate_Wild_Do_Table"),
            replicate_wild_ignore_table: row.text("Replicate_Wild_Ignore_Table"),
            last_errno: row.uint("Last_Errno"),
            last_error: row.text("Last_Error"),
            skip_counter: row.uint("Skip_Counter"),
            exec_master_log_pos: row.uint("Exec_Master_Log_Pos"),
            relay_log_space: row.uint("Relay_Log_Space"),
            until_condition: row.text("Until_Condition"),
            until_log_file: row.text("Until_Log_File"),
            until_log_pos: row.uint("Until_Log_Pos"),
            master_ssl_allowed: row.text("Master_SSL_Allowed"),
            master_ssl_ca_file: row.text("Master_SSL_CA_File"),
            master_ssl_ca_path: row.text("Master_SSL_CA_Path"),
            master_ssl_cert: row.text("Master_SSL_Cert"),
            master_ssl_cipher: row.text("Master_SSL_Cipher"),
            master_ssl_key: row.text("Master_SSL_Key"),
            seconds_behind_master: row.nullable_uint("Seconds_Behind_Master"),
            master_ssl_verify_server_cert: row.text("Master_SSL_Verify_Server_Cert"),
            last_io_errno: row.uint("Last_IO_Errno"),
            last_io_error: row.text("Last_IO_Error"),
            last_sql_errno: row.uint("Last_SQL_Errno"),
            last_sql_error: row.text("Last_SQL_Error"),
            replicate_ignore_server_ids: row.text("Replicate_Ignore_Server_Ids"),
            master_server_id: row.uint("Master_Server_Id"),
            master_uuid: row.text("Master_UUID"),
            master_info_file: row.text("Master_Info_File"),
            sql_delay: row.uint("SQL_Delay"),
            sql_remaining_delay: row.nullable_uint("SQL_Remaining_Delay"),
            slave_sql_running_state: row.text("Slave_SQL_Running_State"),
            master_retry_count: row.uint("Master_Retry_Count"),
            master_bind: row.text("Master_Bind"),
            last_io_error_timestamp: row.text("Last_IO_Error_Timestamp"),
            last_sql_error_timestamp: row.text("Last_SQL_Error_Timestamp"),
            master_ssl_crl: row.text("Master_SSL_Crl"),
            master_ssl_crlpath: row.text("Master_SSL_Crlpath"),
            retrieved_gtid_set: row.text("Retrieved_Gtid_Set"),
            executed_gtid_set: row.text("Executed_Gtid_Set"),
            auto_position: row.flag("Auto_Position"),
        }
    }

    fn column_alias(column: &str) -> Option<String> {
        replica_column_name(column)
    }
}

/// MySQL 8.0.22 renamed `Master`/`Slave` columns to `Source`/`Replica`
/// in `SHOW REPLICA STATUS`.
fn replica_column_name(column: &str) -> Option<String> {
    if !column.contains("Master") && !column.contains("Slave") {
        return None;
    }
    Some(column.replace("Master", "Source").replace("Slave", "Replica"))
}

/// One row of `SHOW PROCESSLIST`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    pub id: u64,
    pub user: String,
    pub host: String,
    pub db: String,
    pub command: String,
    pub time: u64,
    pub state: String,
    pub info: String,
}

impl FromSnapshotRow for Process {
    fn from_row(row: &SnapshotRow) -> Self {
        Self {
            id: row.uint("Id"),
            user: row.text("User"),
            host: row.text("Host"),
            db: row.text("db"),
            command: row.text("Command"),
            time: row.uint("Time"),
            state: row.text("State"),
            info: row.text("Info"),
        }
    }
}
