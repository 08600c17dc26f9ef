//! Replication pair classification

use sqlfleet_core::Endpoint;

use super::health::ReplicationHealth;
use crate::snapshot::{MasterStatus, SlaveStatus, ThreadState};

/// Classify a slave against the master it is expected to replicate from.
///
/// Checks run in a fixed order and the first match wins:
///
/// 1. either side unreachable: [`ReplicationHealth::Unknown`]
/// 2. slave status is the zero value: [`ReplicationHealth::NotConfigured`]
/// 3. configured master host:port differs from `expected_master`:
///    [`ReplicationHealth::WrongMaster`]
/// 4. `Last_Errno` is non-zero: [`ReplicationHealth::Error`]
/// 5. IO and SQL threads both `No`: [`ReplicationHealth::Paused`]
/// 6. executed file/position differs from the master's, or
///    `Seconds_Behind_Master` is positive: [`ReplicationHealth::Syncing`]
/// 7. otherwise [`ReplicationHealth::Healthy`]
pub fn classify_replication(
    slave: &SlaveStatus,
    master: &MasterStatus,
    expected_master: &Endpoint,
    slave_reachable: bool,
    master_reachable: bool,
) -> ReplicationHealth {
    if !slave_reachable || !master_reachable {
        return ReplicationHealth::Unknown;
    }
    if slave.is_empty() {
        return ReplicationHealth::NotConfigured;
    }
    if slave.master_endpoint() != *expected_master {
        return ReplicationHealth::WrongMaster;
    }
    if slave.last_errno != 0 {
        return ReplicationHealth::Error;
    }
    if slave.io_thread() == ThreadState::No && slave.sql_thread() == ThreadState::No {
        return ReplicationHealth::Paused;
    }
    if is_behind(slave, master) {
        return ReplicationHealth::Syncing;
    }
    ReplicationHealth::Healthy
}

fn is_behind(slave: &SlaveStatus, master: &MasterStatus) -> bool {
    slave.master_log_file != master.file
        || slave.exec_master_log_pos != master.position
        || slave.seconds_behind_master.is_some_and(|lag| lag > 0)
}
