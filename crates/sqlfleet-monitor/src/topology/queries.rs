//! Statements issued against fleet endpoints
//!
//! The replication statements use the pre-8.4 names. MySQL 8.4 removed
//! them; each has a renamed counterpart below that is tried when the server
//! rejects the original.

/// Diagnostic and control statements for MySQL
pub struct DiagnosticQuery;

impl DiagnosticQuery {
    pub fn master_status() -> &'static str {
        "SHOW MASTER STATUS"
    }

    pub fn slave_status() -> &'static str {
        "SHOW SLAVE STATUS"
    }

    /// `SHOW MASTER STATUS` as of MySQL 8.4
    pub fn binary_log_status() -> &'static str {
        "SHOW BINARY LOG STATUS"
    }

    /// `SHOW SLAVE STATUS` as of MySQL 8.4
    pub fn replica_status() -> &'static str {
        "SHOW REPLICA STATUS"
    }

    pub fn innodb_status() -> &'static str {
        "SHOW ENGINE INNODB STATUS"
    }

    /// Takes the `LIKE` pattern as its only parameter
    pub fn global_variables() -> &'static str {
        "SHOW GLOBAL VARIABLES LIKE ?"
    }

    /// Takes the `LIKE` pattern as its only parameter
    pub fn global_status() -> &'static str {
        "SHOW GLOBAL STATUS LIKE ?"
    }

    pub fn process_list() -> &'static str {
        "SHOW FULL PROCESSLIST"
    }

    pub fn start_slave() -> &'static str {
        "START SLAVE"
    }

    pub fn stop_slave() -> &'static str {
        "STOP SLAVE"
    }

    pub fn start_replica() -> &'static str {
        "START REPLICA"
    }

    pub fn stop_replica() -> &'static str {
        "STOP REPLICA"
    }

    /// Parameters: host, port, user, password, log file, log position
    pub fn change_master() -> &'static str {
        "CHANGE MASTER TO MASTER_HOST = ?, MASTER_PORT = ?, MASTER_USER = ?, \
         MASTER_PASSWORD = ?, MASTER_LOG_FILE = ?, MASTER_LOG_POS = ?"
    }

    /// `CHANGE MASTER TO` as of MySQL 8.4, same parameters
    pub fn change_replication_source() -> &'static str {
        "CHANGE REPLICATION SOURCE TO SOURCE_HOST = ?, SOURCE_PORT = ?, SOURCE_USER = ?, \
         SOURCE_PASSWORD = ?, SOURCE_LOG_FILE = ?, SOURCE_LOG_POS = ?"
    }

    pub fn kill(process_id: u64) -> String {
        format!("KILL {process_id}")
    }

    /// `key` must already be validated as a plain identifier
    pub(crate) fn set_global(key: &str) -> String {
        format!("SET GLOBAL {key} = ?")
    }
}
