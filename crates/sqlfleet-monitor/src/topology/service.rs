//! Topology health checks over a diagnostic source

use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use sqlfleet_core::{DiagnosticSource, Endpoint, ReplicationPair, Result, Value};
use std::collections::BTreeMap;
use std::time::Instant;

use super::queries::DiagnosticQuery;
use super::renamed;
use crate::innodb::{InnoDbCounters, parse_innodb_counters};
use crate::replication::{ReplicationHealth, classify_replication};
use crate::snapshot::{
    MasterStatus, Process, SlaveStatus, decode_innodb_status_text, decode_master_status,
    decode_process_list, decode_slave_status, decode_variables,
};

/// Outcome of checking one replication pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplicationReport {
    pub pair: ReplicationPair,
    pub health: ReplicationHealth,
    /// When the check finished
    pub checked_at: DateTime<Utc>,
    /// How long the check took, in milliseconds
    pub response_time_ms: u64,
}

/// Fetches snapshots from fleet endpoints and classifies replication pairs.
///
/// Holds no state besides the source; concurrent calls are independent.
pub struct TopologyHealthService<S> {
    source: S,
}

impl<S: DiagnosticSource> TopologyHealthService<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// The underlying diagnostic source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Current binary log position of `endpoint`
    #[tracing::instrument(skip(self), fields(endpoint = %endpoint))]
    pub async fn master_status(&self, endpoint: &Endpoint) -> Result<MasterStatus> {
        let result = renamed::fetch_rows(
            &self.source,
            endpoint,
            DiagnosticQuery::master_status(),
            DiagnosticQuery::binary_log_status(),
            &[],
        )
        .await?;
        Ok(decode_master_status(&result))
    }

    /// Replication state of `endpoint`; the zero value when it is no slave
    #[tracing::instrument(skip(self), fields(endpoint = %endpoint))]
    pub async fn slave_status(&self, endpoint: &Endpoint) -> Result<SlaveStatus> {
        let result = renamed::fetch_rows(
            &self.source,
            endpoint,
            DiagnosticQuery::slave_status(),
            DiagnosticQuery::replica_status(),
            &[],
        )
        .await?;
        Ok(decode_slave_status(&result))
    }

    /// Mutex counters from the InnoDB monitor of `endpoint`
    #[tracing::instrument(skip(self), fields(endpoint = %endpoint))]
    pub async fn innodb_counters(&self, endpoint: &Endpoint) -> Result<InnoDbCounters> {
        let result = self
            .source
            .fetch_rows(endpoint, DiagnosticQuery::innodb_status(), &[])
            .await?;
        Ok(parse_innodb_counters(&decode_innodb_status_text(&result)))
    }

    /// Global variables whose name matches the `LIKE` pattern
    #[tracing::instrument(skip(self), fields(endpoint = %endpoint))]
    pub async fn global_variables(
        &self,
        endpoint: &Endpoint,
        pattern: &str,
    ) -> Result<BTreeMap<String, String>> {
        let result = self
            .source
            .fetch_rows(
                endpoint,
                DiagnosticQuery::global_variables(),
                &[Value::from(pattern)],
            )
            .await?;
        Ok(decode_variables(&result))
    }

    /// Global status counters whose name matches the `LIKE` pattern
    #[tracing::instrument(skip(self), fields(endpoint = %endpoint))]
    pub async fn global_status(
        &self,
        endpoint: &Endpoint,
        pattern: &str,
    ) -> Result<BTreeMap<String, String>> {
        let result = self
            .source
            .fetch_rows(
                endpoint,
                DiagnosticQuery::global_status(),
                &[Value::from(pattern)],
            )
            .await?;
        Ok(decode_variables(&result))
    }

    /// Threads currently running on `endpoint`
    #[tracing::instrument(skip(self), fields(endpoint = %endpoint))]
    pub async fn process_list(&self, endpoint: &Endpoint) -> Result<Vec<Process>> {
        let result = self
            .source
            .fetch_rows(endpoint, DiagnosticQuery::process_list(), &[])
            .await?;
        Ok(decode_process_list(&result))
    }

    /// Classify the pair `slave` replicating from `master`.
    ///
    /// Never fails: an unreachable endpoint or a failed fetch is reported as
    /// [`ReplicationHealth::Unknown`].
    #[tracing::instrument(skip(self), fields(slave = %slave, master = %master))]
    pub async fn check_replication(&self, slave: &Endpoint, master: &Endpoint) -> ReplicationHealth {
        let (slave_reachable, master_reachable) = futures::join!(
            self.source.is_reachable(slave),
            self.source.is_reachable(master)
        );
        if !slave_reachable || !master_reachable {
            tracing::warn!(slave_reachable, master_reachable, "endpoint unreachable");
            return classify_replication(
                &SlaveStatus::default(),
                &MasterStatus::default(),
                master,
                slave_reachable,
                master_reachable,
            );
        }

        let (slave_status, master_status) =
            futures::join!(self.slave_status(slave), self.master_status(master));
        let (slave_status, master_status) = match (slave_status, master_status) {
            (Ok(slave_status), Ok(master_status)) => (slave_status, master_status),
            (Err(e), _) | (_, Err(e)) => {
                tracing::warn!(
                    error = %e,
                    structural = e.is_structural(),
                    "failed to fetch replication status"
                );
                return ReplicationHealth::Unknown;
            }
        };

        let health = classify_replication(&slave_status, &master_status, master, true, true);
        tracing::debug!(%health, "replication classified");
        health
    }

    /// Check many pairs concurrently; reports come back in input order
    pub async fn check_fleet(&self, pairs: &[ReplicationPair]) -> Vec<ReplicationReport> {
        let checks = pairs.iter().map(|pair| async move {
            let start = Instant::now();
            let health = self.check_replication(&pair.slave, &pair.master).await;
            ReplicationReport {
                pair: pair.clone(),
                health,
                checked_at: Utc::now(),
                response_time_ms: elapsed_ms(start),
            }
        });
        let reports = join_all(checks).await;

        let unhealthy = reports.iter().filter(|r| !r.health.is_healthy()).count();
        tracing::info!(pairs = reports.len(), unhealthy, "fleet check finished");
        reports
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}
