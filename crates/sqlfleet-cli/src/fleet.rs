//! Registry setup from the fleet file

use anyhow::{Context, anyhow};
use futures::future::join_all;
use sqlfleet_connection::{ConnectionRegistry, FleetConfig, InstanceConfig};
use sqlfleet_core::Endpoint;
use sqlfleet_driver_mysql::MySqlConnectionFactory;
use sqlfleet_monitor::{ReplicationControl, ReplicationCredentials, TopologyHealthService};
use std::path::Path;
use std::sync::Arc;

/// The loaded fleet file plus the registry its endpoints are opened in
pub struct Fleet {
    config: FleetConfig,
    registry: Arc<ConnectionRegistry>,
}

impl Fleet {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let config = FleetConfig::load(path)
            .with_context(|| format!("failed to load fleet file {}", path.display()))?;
        Ok(Self::new(config))
    }

    pub fn new(config: FleetConfig) -> Self {
        Self {
            config,
            registry: Arc::new(ConnectionRegistry::new(MySqlConnectionFactory::new())),
        }
    }

    pub fn config(&self) -> &FleetConfig {
        &self.config
    }

    /// Credentials the fleet file gives for `endpoint`
    pub fn instance_config(&self, endpoint: &Endpoint) -> anyhow::Result<InstanceConfig> {
        self.config
            .endpoints
            .iter()
            .find(|entry| &entry.address == endpoint)
            .map(|entry| self.config.instance_config(entry))
            .ok_or_else(|| anyhow!("{endpoint} is not listed in the fleet file"))
    }

    /// Replication account other endpoints use to replicate from `master`
    pub fn replication_credentials(
        &self,
        master: &Endpoint,
    ) -> anyhow::Result<ReplicationCredentials> {
        let config = self.instance_config(master)?;
        Ok(ReplicationCredentials::new(config.repl_user, config.repl_password))
    }

    /// Open the connection of one endpoint
    pub async fn connect(&self, endpoint: &Endpoint) -> anyhow::Result<()> {
        let config = self.instance_config(endpoint)?;
        self.registry
            .register(endpoint.clone(), config)
            .await
            .with_context(|| format!("failed to connect to {endpoint}"))
    }

    /// Open every endpoint of the fleet file concurrently.
    ///
    /// Endpoints that refuse the connection stay unregistered and are reported
    /// as unreachable by later checks.
    pub async fn connect_all(&self) {
        let instances = self.config.instances();
        let results = join_all(
            instances
                .iter()
                .map(|(endpoint, config)| self.registry.register(endpoint.clone(), config.clone())),
        )
        .await;

        for ((endpoint, _), result) in instances.iter().zip(results) {
            if let Err(e) = result {
                tracing::warn!(endpoint = %endpoint, error = %e, "endpoint left unregistered");
            }
        }
    }

    pub fn health(&self) -> TopologyHealthService<Arc<ConnectionRegistry>> {
        TopologyHealthService::new(self.registry.clone())
    }

    pub fn control(&self) -> ReplicationControl<Arc<ConnectionRegistry>> {
        ReplicationControl::new(self.registry.clone())
    }

    pub fn registry(&self) -> &ConnectionRegistry {
        &self.registry
    }

    /// Close every open connection
    pub async fn shutdown(&self) {
        for endpoint in self.registry.endpoints() {
            self.registry.unregister(&endpoint).await;
        }
    }
}
