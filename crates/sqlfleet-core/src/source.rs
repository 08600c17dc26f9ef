//! The view of the connection layer that health checks depend on

use crate::{Endpoint, QueryResult, Result, StatementResult, Value};
use async_trait::async_trait;
use std::sync::Arc;

/// Something that can run diagnostic statements against fleet endpoints.
///
/// Implemented by the connection registry; tests substitute in-memory fakes.
/// Every call must return its own snapshot. No retry or timeout is applied
/// on top of what the implementation does.
#[async_trait]
pub trait DiagnosticSource: Send + Sync {
    /// Whether the endpoint is registered and answers a ping
    async fn is_reachable(&self, endpoint: &Endpoint) -> bool;

    /// Run a read query against the endpoint
    async fn fetch_rows(
        &self,
        endpoint: &Endpoint,
        sql: &str,
        params: &[Value],
    ) -> Result<QueryResult>;

    /// Run a statement that returns no rows against the endpoint
    async fn execute(
        &self,
        endpoint: &Endpoint,
        sql: &str,
        params: &[Value],
    ) -> Result<StatementResult>;
}

#[async_trait]
impl<T: DiagnosticSource + ?Sized> DiagnosticSource for Arc<T> {
    async fn is_reachable(&self, endpoint: &Endpoint) -> bool {
        (**self).is_reachable(endpoint).await
    }

    async fn fetch_rows(
        &self,
        endpoint: &Endpoint,
        sql: &str,
        params: &[Value],
    ) -> Result<QueryResult> {
        (**self).fetch_rows(endpoint, sql, params).await
    }

    async fn execute(
        &self,
        endpoint: &Endpoint,
        sql: &str,
        params: &[Value],
    ) -> Result<StatementResult> {
        (**self).execute(endpoint, sql, params).await
    }
}
