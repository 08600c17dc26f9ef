//! Registry of open connections keyed by endpoint

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use sqlfleet_core::{
    Connection, DiagnosticSource, Endpoint, FleetError, QueryResult, Result, StatementResult,
    Value,
};

use super::factory::ConnectionFactory;
use crate::health::{InstanceStatus, ping_database};
use crate::{FleetConfig, InstanceConfig};

struct RegisteredInstance {
    config: InstanceConfig,
    connection: Arc<dyn Connection>,
}

/// Maps each registered endpoint to its open connection and credentials.
///
/// The registry is an explicit object shared by reference (usually in an
/// `Arc`); every method is safe to call from concurrent tasks.
pub struct ConnectionRegistry {
    factory: Arc<dyn ConnectionFactory>,
    instances: RwLock<HashMap<Endpoint, Arc<RegisteredInstance>>>,
}

impl ConnectionRegistry {
    /// Create an empty registry that opens connections through `factory`
    pub fn new<F: ConnectionFactory>(factory: F) -> Self {
        Self {
            factory: Arc::new(factory),
            instances: RwLock::new(HashMap::new()),
        }
    }

    /// Register an endpoint, opening its connection.
    ///
    /// Registering an endpoint that is already present is a no-op: the first
    /// registration's credentials stay in effect.
    #[tracing::instrument(skip(self, config), fields(endpoint = %endpoint))]
    pub async fn register(&self, endpoint: Endpoint, config: InstanceConfig) -> Result<()> {
        if self.is_registered(&endpoint) {
            tracing::debug!("endpoint already registered");
            return Ok(());
        }

        let connection = self.factory.create(&endpoint, &config).await.map_err(|e| {
            tracing::error!(error = %e, "failed to open connection");
            e
        })?;

        let duplicate = {
            let mut instances = self.instances.write();
            if instances.contains_key(&endpoint) {
                Some(connection)
            } else {
                instances.insert(
                    endpoint.clone(),
                    Arc::new(RegisteredInstance { config, connection }),
                );
                None
            }
        };

        // Lost a race with a concurrent register of the same endpoint.
        if let Some(connection) = duplicate {
            tracing::debug!("endpoint registered concurrently, dropping new connection");
            if let Err(e) = connection.close().await {
                tracing::warn!(error = %e, "failed to close duplicate connection");
            }
            return Ok(());
        }

        tracing::info!("endpoint registered");
        Ok(())
    }

    /// Register every endpoint of a fleet file
    pub async fn register_fleet(&self, fleet: &FleetConfig) -> Result<()> {
        for (endpoint, config) in fleet.instances() {
            self.register(endpoint, config).await?;
        }
        Ok(())
    }

    /// Remove an endpoint and close its connection.
    ///
    /// Unknown endpoints are ignored; close failures are logged.
    #[tracing::instrument(skip(self), fields(endpoint = %endpoint))]
    pub async fn unregister(&self, endpoint: &Endpoint) {
        let removed = self.instances.write().remove(endpoint);
        match removed {
            Some(instance) => {
                if let Err(e) = instance.connection.close().await {
                    tracing::warn!(error = %e, "failed to close connection");
                }
                tracing::info!("endpoint unregistered");
            }
            None => tracing::debug!("endpoint was not registered"),
        }
    }

    /// Get the open connection of an endpoint
    pub fn get(&self, endpoint: &Endpoint) -> Option<Arc<dyn Connection>> {
        let conn = self
            .instances
            .read()
            .get(endpoint)
            .map(|instance| instance.connection.clone());
        if conn.is_none() {
            tracing::debug!(endpoint = %endpoint, "endpoint not found in registry");
        }
        conn
    }

    /// Credentials an endpoint was registered with
    pub fn instance_config(&self, endpoint: &Endpoint) -> Option<InstanceConfig> {
        self.instances
            .read()
            .get(endpoint)
            .map(|instance| instance.config.clone())
    }

    /// Check if an endpoint is registered
    pub fn is_registered(&self, endpoint: &Endpoint) -> bool {
        self.instances.read().contains_key(endpoint)
    }

    /// Number of registered endpoints
    pub fn len(&self) -> usize {
        self.instances.read().len()
    }

    /// Whether no endpoint is registered
    pub fn is_empty(&self) -> bool {
        self.instances.read().is_empty()
    }

    /// Registered endpoints, sorted
    pub fn endpoints(&self) -> Vec<Endpoint> {
        let mut endpoints: Vec<Endpoint> = self.instances.read().keys().cloned().collect();
        endpoints.sort();
        endpoints
    }

    /// Ping an endpoint and report its connection state
    #[tracing::instrument(skip(self), fields(endpoint = %endpoint))]
    pub async fn check_instance(&self, endpoint: &Endpoint) -> InstanceStatus {
        let Some(conn) = self.get(endpoint) else {
            return InstanceStatus::Unregistered;
        };
        let result = ping_database(conn.as_ref()).await;
        if let Err(e) = &result {
            tracing::debug!(error = %e, "ping failed");
        }
        InstanceStatus::from_ping(&result)
    }

    fn connection_for(&self, endpoint: &Endpoint) -> Result<Arc<dyn Connection>> {
        self.get(endpoint)
            .ok_or_else(|| FleetError::NotRegistered(endpoint.clone()))
    }
}

#[async_trait]
impl DiagnosticSource for ConnectionRegistry {
    async fn is_reachable(&self, endpoint: &Endpoint) -> bool {
        self.check_instance(endpoint).await.is_reachable()
    }

    async fn fetch_rows(
        &self,
        endpoint: &Endpoint,
        sql: &str,
        params: &[Value],
    ) -> Result<QueryResult> {
        let conn = self.connection_for(endpoint)?;
        conn.query(sql, params).await
    }

    async fn execute(
        &self,
        endpoint: &Endpoint,
        sql: &str,
        params: &[Value],
    ) -> Result<StatementResult> {
        let conn = self.connection_for(endpoint)?;
        conn.execute(sql, params).await
    }
}
