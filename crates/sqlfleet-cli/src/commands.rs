//! Command handlers

use serde::Serialize;
use sqlfleet_connection::InstanceStatus;
use sqlfleet_core::{Endpoint, Value};
use sqlfleet_monitor::{MasterStatus, ReplicationReport, SlaveStatus};

use crate::fleet::Fleet;
use crate::output::OutputContext;

/// Classify every replication pair of the fleet file.
///
/// Returns whether every pair is healthy.
pub async fn check(fleet: &Fleet, output: &OutputContext) -> anyhow::Result<bool> {
    fleet.connect_all().await;
    let reports = fleet.health().check_fleet(&fleet.config().replication).await;

    output.emit(&reports, |out| {
        out.print_table(
            &["Slave", "Master", "Health", "Checked in"],
            reports.iter().map(report_row).collect(),
        )
    })?;
    Ok(reports.iter().all(|r| r.health.is_healthy()))
}

fn report_row(report: &ReplicationReport) -> Vec<String> {
    vec![
        report.pair.slave.to_string(),
        report.pair.master.to_string(),
        report.health.to_string(),
        format!("{} ms", report.response_time_ms),
    ]
}

#[derive(Serialize)]
struct InstanceReport {
    endpoint: Endpoint,
    status: InstanceStatus,
    master: Option<MasterStatus>,
    slave: Option<SlaveStatus>,
}

/// Connection state plus master and slave status of one endpoint
pub async fn instance(
    fleet: &Fleet,
    endpoint: &Endpoint,
    output: &OutputContext,
) -> anyhow::Result<()> {
    // Connection failures are part of the report here, not an error.
    if let Err(e) = fleet.connect(endpoint).await {
        tracing::warn!(error = %e, "instance unreachable");
    }
    let status = fleet.registry().check_instance(endpoint).await;

    let health = fleet.health();
    let (master, slave) = if status.is_reachable() {
        (
            Some(health.master_status(endpoint).await?),
            Some(health.slave_status(endpoint).await?),
        )
    } else {
        (None, None)
    };

    let report = InstanceReport {
        endpoint: endpoint.clone(),
        status,
        master,
        slave,
    };
    output.emit(&report, |out| {
        let mut pairs = vec![
            ("Endpoint", report.endpoint.to_string()),
            ("Status", report.status.to_string()),
        ];
        if let Some(master) = &report.master {
            pairs.push(("Binlog file", master.file.clone()));
            pairs.push(("Binlog position", master.position.to_string()));
            pairs.push(("Executed GTID set", master.executed_gtid_set.clone()));
        }
        if let Some(slave) = &report.slave {
            if slave.is_empty() {
                pairs.push(("Replication", "not configured".to_string()));
            } else {
                pairs.push(("Master", slave.master_endpoint().to_string()));
                pairs.push(("IO thread", slave.io_thread().to_string()));
                pairs.push(("SQL thread", slave.sql_thread().to_string()));
                pairs.push((
                    "Executed",
                    format!("{}:{}", slave.master_log_file, slave.exec_master_log_pos),
                ));
                pairs.push((
                    "Seconds behind master",
                    slave
                        .seconds_behind_master
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| "NULL".to_string()),
                ));
                if slave.last_errno != 0 {
                    pairs.push((
                        "Last error",
                        format!("{} {}", slave.last_errno, slave.last_error),
                    ));
                }
            }
        }
        out.print_pairs(pairs)
    })
}

/// InnoDB mutex counters of one endpoint
pub async fn innodb(
    fleet: &Fleet,
    endpoint: &Endpoint,
    output: &OutputContext,
) -> anyhow::Result<()> {
    fleet.connect(endpoint).await?;
    let counters = fleet.health().innodb_counters(endpoint).await?;
    output.emit(&counters, |out| {
        out.print_pairs([
            ("Mutex spin waits", counters.mutex_spin_waits),
            ("Mutex spin rounds", counters.mutex_spin_rounds),
            ("Mutex OS waits", counters.mutex_os_waits),
        ])
    })
}

/// Global variables, or global status counters with `status`
pub async fn variables(
    fleet: &Fleet,
    endpoint: &Endpoint,
    pattern: &str,
    status: bool,
    output: &OutputContext,
) -> anyhow::Result<()> {
    fleet.connect(endpoint).await?;
    let health = fleet.health();
    let values = if status {
        health.global_status(endpoint, pattern).await?
    } else {
        health.global_variables(endpoint, pattern).await?
    };
    output.emit(&values, |out| out.print_pairs(&values))
}

/// Threads running on one endpoint
pub async fn process_list(
    fleet: &Fleet,
    endpoint: &Endpoint,
    output: &OutputContext,
) -> anyhow::Result<()> {
    fleet.connect(endpoint).await?;
    let processes = fleet.health().process_list(endpoint).await?;
    output.emit(&processes, |out| {
        out.print_table(
            &["Id", "User", "Host", "db", "Command", "Time", "State", "Info"],
            processes
                .iter()
                .map(|p| {
                    vec![
                        p.id.to_string(),
                        p.user.clone(),
                        p.host.clone(),
                        p.db.clone(),
                        p.command.clone(),
                        p.time.to_string(),
                        p.state.clone(),
                        p.info.clone(),
                    ]
                })
                .collect(),
        )
    })
}

pub async fn start_slave(fleet: &Fleet, endpoint: &Endpoint) -> anyhow::Result<()> {
    fleet.connect(endpoint).await?;
    fleet.control().start_slave(endpoint).await?;
    println!("replication started on {endpoint}");
    Ok(())
}

pub async fn stop_slave(fleet: &Fleet, endpoint: &Endpoint) -> anyhow::Result<()> {
    fleet.connect(endpoint).await?;
    fleet.control().stop_slave(endpoint).await?;
    println!("replication stopped on {endpoint}");
    Ok(())
}

pub async fn kill(fleet: &Fleet, endpoint: &Endpoint, process_id: u64) -> anyhow::Result<()> {
    fleet.connect(endpoint).await?;
    fleet.control().kill_process(endpoint, process_id).await?;
    println!("killed process {process_id} on {endpoint}");
    Ok(())
}

pub async fn set_variable(
    fleet: &Fleet,
    endpoint: &Endpoint,
    key: &str,
    value: &str,
) -> anyhow::Result<()> {
    fleet.connect(endpoint).await?;
    fleet
        .control()
        .set_global_variable(endpoint, key, parse_value(value))
        .await?;
    println!("{key} = {value} on {endpoint}");
    Ok(())
}

/// Point `slave` at the current position of `master` using the master's
/// replication account from the fleet file
pub async fn change_master(
    fleet: &Fleet,
    slave: &Endpoint,
    master: &Endpoint,
    output: &OutputContext,
) -> anyhow::Result<()> {
    let credentials = fleet.replication_credentials(master)?;
    fleet.connect(master).await?;
    fleet.connect(slave).await?;

    let position = fleet
        .control()
        .change_master(slave, master, &credentials)
        .await?;
    output.emit(&position, |_| {
        println!(
            "{slave} now replicates from {master} at {}:{}",
            position.file, position.position
        )
    })
}

/// Integers are sent unquoted, everything else as a string literal
fn parse_value(raw: &str) -> Value {
    match raw.parse::<i64>() {
        Ok(n) => Value::Int64(n),
        Err(_) => Value::from(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value("100"), Value::Int64(100));
        assert_eq!(parse_value("-1"), Value::Int64(-1));
        assert_eq!(parse_value("ON"), Value::from("ON"));
        assert_eq!(parse_value("1.5"), Value::from("1.5"));
    }
}
