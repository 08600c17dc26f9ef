//! Connection factory used by the registry

use std::sync::Arc;

use async_trait::async_trait;
use sqlfleet_core::{Connection, Endpoint, Result};

use crate::InstanceConfig;

/// Factory trait for opening connections to fleet endpoints
#[async_trait]
pub trait ConnectionFactory: Send + Sync + 'static {
    /// Open a connection to `endpoint` with the given credentials.
    ///
    /// An invalid connection URL or a refused handshake is an error.
    async fn create(
        &self,
        endpoint: &Endpoint,
        config: &InstanceConfig,
    ) -> Result<Arc<dyn Connection>>;
}

#[async_trait]
impl<T: ConnectionFactory> ConnectionFactory for Arc<T> {
    async fn create(
        &self,
        endpoint: &Endpoint,
        config: &InstanceConfig,
    ) -> Result<Arc<dyn Connection>> {
        (**self).create(endpoint, config).await
    }
}
