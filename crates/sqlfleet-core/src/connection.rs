//! Connection trait for an open database handle

use crate::{QueryResult, Result, StatementResult, Value};
use async_trait::async_trait;

/// A database connection
#[async_trait]
pub trait Connection: Send + Sync {
    /// Get the driver name (e.g. "mysql")
    fn driver_name(&self) -> &str;

    /// Execute a statement that returns no rows (`START SLAVE`, `KILL`, `SET GLOBAL`, ...)
    async fn execute(&self, sql: &str, params: &[Value]) -> Result<StatementResult>;

    /// Execute a query that returns rows
    async fn query(&self, sql: &str, params: &[Value]) -> Result<QueryResult>;

    /// Close the connection
    async fn close(&self) -> Result<()>;

    /// Check if the connection is closed
    fn is_closed(&self) -> bool;
}
