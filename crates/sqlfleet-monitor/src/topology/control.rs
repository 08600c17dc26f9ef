//! Replication control statements

use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlfleet_core::{DiagnosticSource, Endpoint, FleetError, Result, Value};
use std::sync::LazyLock;

use super::queries::DiagnosticQuery;
use super::renamed;
use crate::snapshot::{MasterStatus, decode_master_status};

static VARIABLE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[_0-9a-zA-Z]+$").expect("valid regex"));

/// Account a slave uses to connect to its master
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplicationCredentials {
    pub user: String,
    pub password: String,
}

impl ReplicationCredentials {
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
        }
    }
}

/// Issues replication control statements. No decision logic: each method is
/// one statement against one endpoint.
pub struct ReplicationControl<S> {
    source: S,
}

impl<S: DiagnosticSource> ReplicationControl<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// The underlying diagnostic source
    pub fn source(&self) -> &S {
        &self.source
    }

    #[tracing::instrument(skip(self), fields(endpoint = %endpoint))]
    pub async fn start_slave(&self, endpoint: &Endpoint) -> Result<()> {
        renamed::execute(
            &self.source,
            endpoint,
            DiagnosticQuery::start_slave(),
            DiagnosticQuery::start_replica(),
            &[],
        )
        .await?;
        tracing::info!("slave started");
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(endpoint = %endpoint))]
    pub async fn stop_slave(&self, endpoint: &Endpoint) -> Result<()> {
        renamed::execute(
            &self.source,
            endpoint,
            DiagnosticQuery::stop_slave(),
            DiagnosticQuery::stop_replica(),
            &[],
        )
        .await?;
        tracing::info!("slave stopped");
        Ok(())
    }

    /// Kill a thread listed by `SHOW PROCESSLIST`
    #[tracing::instrument(skip(self), fields(endpoint = %endpoint))]
    pub async fn kill_process(&self, endpoint: &Endpoint, process_id: u64) -> Result<()> {
        self.source
            .execute(endpoint, &DiagnosticQuery::kill(process_id), &[])
            .await?;
        tracing::info!("process killed");
        Ok(())
    }

    /// `SET GLOBAL key = value`.
    ///
    /// A variable name cannot be bound as a parameter, so `key` is limited to
    /// letters, digits and underscores.
    #[tracing::instrument(skip(self, value), fields(endpoint = %endpoint))]
    pub async fn set_global_variable(
        &self,
        endpoint: &Endpoint,
        key: &str,
        value: Value,
    ) -> Result<()> {
        if !VARIABLE_NAME.is_match(key) {
            return Err(FleetError::InvalidKey(key.to_string()));
        }
        self.source
            .execute(endpoint, &DiagnosticQuery::set_global(key), &[value])
            .await?;
        tracing::info!("global variable set");
        Ok(())
    }

    /// Point `slave` at the current binary log position of `master`.
    ///
    /// The slave's replication threads must be stopped first. Returns the
    /// master position the slave was pointed at.
    #[tracing::instrument(skip(self, credentials), fields(slave = %slave, master = %master))]
    pub async fn change_master(
        &self,
        slave: &Endpoint,
        master: &Endpoint,
        credentials: &ReplicationCredentials,
    ) -> Result<MasterStatus> {
        let result = renamed::fetch_rows(
            &self.source,
            master,
            DiagnosticQuery::master_status(),
            DiagnosticQuery::binary_log_status(),
            &[],
        )
        .await?;
        let position = decode_master_status(&result);
        if position.file.is_empty() {
            return Err(FleetError::Query(format!(
                "{master} reports no binary log; is log_bin enabled?"
            )));
        }

        let params = [
            Value::from(master.host()),
            Value::UInt64(u64::from(master.port())),
            Value::from(credentials.user.as_str()),
            Value::from(credentials.password.as_str()),
            Value::from(position.file.as_str()),
            Value::UInt64(position.position),
        ];
        renamed::execute(
            &self.source,
            slave,
            DiagnosticQuery::change_master(),
            DiagnosticQuery::change_replication_source(),
            &params,
        )
        .await?;

        tracing::info!(
            file = %position.file,
            position = position.position,
            "slave pointed at master"
        );
        Ok(position)
    }
}
