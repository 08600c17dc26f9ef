//! Unit tests for replication classification

use super::*;
use crate::snapshot::{MasterStatus, SlaveStatus, decode_slave_status};
use sqlfleet_core::{Endpoint, QueryResult, Value};

fn master_endpoint() -> Endpoint {
    Endpoint::new("10.0.0.1", 3306)
}

fn master() -> MasterStatus {
    MasterStatus {
        file: "binlog.000002".to_string(),
        position: 500,
        ..Default::default()
    }
}

fn caught_up_slave() -> SlaveStatus {
    SlaveStatus {
        master_host: "10.0.0.1".to_string(),
        master_port: 3306,
        slave_io_running: "Yes".to_string(),
        slave_sql_running: "Yes".to_string(),
        master_log_file: "binlog.000002".to_string(),
        exec_master_log_pos: 500,
        seconds_behind_master: Some(0),
        ..Default::default()
    }
}

fn classify(slave: &SlaveStatus, master: &MasterStatus) -> ReplicationHealth {
    classify_replication(slave, master, &master_endpoint(), true, true)
}

mod health_tests {
    use super::*;

    #[test]
    fn test_health_default_is_unknown() {
        assert_eq!(ReplicationHealth::default(), ReplicationHealth::Unknown);
    }

    #[test]
    fn test_health_predicates() {
        assert!(ReplicationHealth::Healthy.is_healthy());
        assert!(!ReplicationHealth::Syncing.is_healthy());

        assert!(ReplicationHealth::Healthy.is_replicating());
        assert!(ReplicationHealth::Syncing.is_replicating());
        assert!(!ReplicationHealth::Paused.is_replicating());

        assert!(ReplicationHealth::Unknown.needs_attention());
        assert!(ReplicationHealth::WrongMaster.needs_attention());
        assert!(ReplicationHealth::Error.needs_attention());
        assert!(!ReplicationHealth::Paused.needs_attention());
        assert!(!ReplicationHealth::NotConfigured.needs_attention());
    }

    #[test]
    fn test_health_display() {
        assert_eq!(ReplicationHealth::NotConfigured.to_string(), "Not configured");
        assert_eq!(ReplicationHealth::WrongMaster.to_string(), "Wrong master");
        assert_eq!(ReplicationHealth::Healthy.to_string(), "Healthy");
    }

    #[test]
    fn test_health_serialization() {
        let json = serde_json::to_string(&ReplicationHealth::WrongMaster).unwrap();
        assert_eq!(json, "\"wrong_master\"");

        let health: ReplicationHealth = serde_json::from_str("\"not_configured\"").unwrap();
        assert_eq!(health, ReplicationHealth::NotConfigured);
    }
}

mod classify_tests {
    use super::*;

    #[test]
    fn test_caught_up_slave_is_healthy() {
        assert_eq!(classify(&caught_up_slave(), &master()), ReplicationHealth::Healthy);
    }

    #[test]
    fn test_null_lag_does_not_prevent_healthy() {
        let slave = SlaveStatus {
            seconds_behind_master: None,
            ..caught_up_slave()
        };
        assert_eq!(classify(&slave, &master()), ReplicationHealth::Healthy);
    }

    #[test]
    fn test_zero_slave_is_not_configured() {
        let slave = SlaveStatus::default();
        assert_eq!(classify(&slave, &master()), ReplicationHealth::NotConfigured);
        assert_eq!(
            classify(&slave, &MasterStatus::default()),
            ReplicationHealth::NotConfigured
        );
    }

    #[test]
    fn test_unreachable_side_is_unknown() {
        let slave = caught_up_slave();
        let expected = master_endpoint();
        for (slave_up, master_up) in [(false, true), (true, false), (false, false)] {
            assert_eq!(
                classify_replication(&slave, &master(), &expected, slave_up, master_up),
                ReplicationHealth::Unknown
            );
            assert_eq!(
                classify_replication(
                    &SlaveStatus::default(),
                    &MasterStatus::default(),
                    &expected,
                    slave_up,
                    master_up
                ),
                ReplicationHealth::Unknown
            );
        }
    }

    #[test]
    fn test_other_master_is_wrong_master() {
        let other_host = SlaveStatus {
            master_host: "10.0.0.9".to_string(),
            ..caught_up_slave()
        };
        assert_eq!(classify(&other_host, &master()), ReplicationHealth::WrongMaster);

        let other_port = SlaveStatus {
            master_port: 3307,
            ..caught_up_slave()
        };
        assert_eq!(classify(&other_port, &master()), ReplicationHealth::WrongMaster);
    }

    #[test]
    fn test_master_match_is_exact() {
        let slave = SlaveStatus {
            master_host: "localhost".to_string(),
            ..caught_up_slave()
        };
        let expected = Endpoint::new("127.0.0.1", 3306);
        assert_eq!(
            classify_replication(&slave, &master(), &expected, true, true),
            ReplicationHealth::WrongMaster
        );
    }

    #[test]
    fn test_wrong_master_wins_over_error() {
        let slave = SlaveStatus {
            master_host: "10.0.0.9".to_string(),
            last_errno: 1062,
            ..caught_up_slave()
        };
        assert_eq!(classify(&slave, &master()), ReplicationHealth::WrongMaster);
    }

    #[test]
    fn test_last_errno_is_error() {
        let slave = SlaveStatus {
            last_errno: 1062,
            last_error: "Duplicate entry '1' for key 'PRIMARY'".to_string(),
            ..caught_up_slave()
        };
        assert_eq!(classify(&slave, &master()), ReplicationHealth::Error);
    }

    #[test]
    fn test_error_wins_over_position_mismatch_and_pause() {
        let slave = SlaveStatus {
            last_errno: 1032,
            slave_io_running: "No".to_string(),
            slave_sql_running: "No".to_string(),
            exec_master_log_pos: 10,
            ..caught_up_slave()
        };
        assert_eq!(classify(&slave, &master()), ReplicationHealth::Error);
    }

    #[test]
    fn test_both_threads_stopped_is_paused() {
        let slave = SlaveStatus {
            slave_io_running: "No".to_string(),
            slave_sql_running: "No".to_string(),
            exec_master_log_pos: 10,
            ..caught_up_slave()
        };
        assert_eq!(classify(&slave, &master()), ReplicationHealth::Paused);
    }

    #[test]
    fn test_one_thread_stopped_is_not_paused() {
        let slave = SlaveStatus {
            slave_sql_running: "No".to_string(),
            ..caught_up_slave()
        };
        assert_eq!(classify(&slave, &master()), ReplicationHealth::Healthy);

        let connecting = SlaveStatus {
            slave_io_running: "Connecting".to_string(),
            slave_sql_running: "No".to_string(),
            ..caught_up_slave()
        };
        assert_eq!(classify(&connecting, &master()), ReplicationHealth::Healthy);
    }

    #[test]
    fn test_pause_requires_exact_no() {
        let slave = SlaveStatus {
            slave_io_running: "no".to_string(),
            slave_sql_running: "NO".to_string(),
            ..caught_up_slave()
        };
        assert_eq!(classify(&slave, &master()), ReplicationHealth::Healthy);
    }

    #[test]
    fn test_position_lag_is_syncing() {
        let slave = SlaveStatus {
            exec_master_log_pos: 420,
            ..caught_up_slave()
        };
        assert_eq!(classify(&slave, &master()), ReplicationHealth::Syncing);
    }

    #[test]
    fn test_log_file_lag_is_syncing() {
        let slave = SlaveStatus {
            master_log_file: "binlog.000001".to_string(),
            ..caught_up_slave()
        };
        assert_eq!(classify(&slave, &master()), ReplicationHealth::Syncing);
    }

    #[test]
    fn test_reported_delay_is_syncing() {
        let slave = SlaveStatus {
            seconds_behind_master: Some(12),
            ..caught_up_slave()
        };
        assert_eq!(classify(&slave, &master()), ReplicationHealth::Syncing);
    }

    #[test]
    fn test_decoded_row_is_healthy() {
        let result = QueryResult::from_rows(
            [
                "Master_Host",
                "Master_Port",
                "Slave_IO_Running",
                "Slave_SQL_Running",
                "Last_Errno",
                "Master_Log_File",
                "Exec_Master_Log_Pos",
            ],
            vec![vec![
                Value::from("10.0.0.1"),
                Value::from("3306"),
                Value::from("Yes"),
                Value::from("Yes"),
                Value::from("0"),
                Value::from("binlog.000002"),
                Value::from("500"),
            ]],
        );
        let slave = decode_slave_status(&result);
        let expected: Endpoint = "10.0.0.1:3306".parse().unwrap();

        assert_eq!(
            classify_replication(&slave, &master(), &expected, true, true),
            ReplicationHealth::Healthy
        );
    }

    #[test]
    fn test_decoded_empty_result_is_not_configured() {
        let slave = decode_slave_status(&QueryResult::empty());
        assert_eq!(classify(&slave, &master()), ReplicationHealth::NotConfigured);
    }
}
