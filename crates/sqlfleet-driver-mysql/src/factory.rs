//! Registry factory that opens MySQL connections

use async_trait::async_trait;
use sqlfleet_connection::{ConnectionFactory, InstanceConfig};
use sqlfleet_core::{Connection, Endpoint, Result};
use std::sync::Arc;

use crate::MySqlConnection;

/// Opens one [`MySqlConnection`] per registered endpoint, authenticated as
/// the instance's DBA user
#[derive(Debug, Default, Clone, Copy)]
pub struct MySqlConnectionFactory;

impl MySqlConnectionFactory {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ConnectionFactory for MySqlConnectionFactory {
    #[tracing::instrument(skip(self, config), fields(endpoint = %endpoint, user = %config.dba_user))]
    async fn create(
        &self,
        endpoint: &Endpoint,
        config: &InstanceConfig,
    ) -> Result<Arc<dyn Connection>> {
        let url = config.connection_url(endpoint)?;
        let connection = MySqlConnection::connect(&url).await?;
        Ok(Arc::new(connection))
    }
}
