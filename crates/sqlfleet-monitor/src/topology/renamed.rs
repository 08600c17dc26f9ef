//! Fallback to the statement names MySQL 8.4 introduced

use sqlfleet_core::{DiagnosticSource, Endpoint, QueryResult, Result, StatementResult, Value};

/// Run `legacy`, retrying with `renamed` when the server rejects it.
///
/// Structural failures are returned as they are; the endpoint would refuse
/// the renamed statement for the same reason.
pub(super) async fn fetch_rows<S: DiagnosticSource>(
    source: &S,
    endpoint: &Endpoint,
    legacy: &str,
    renamed: &str,
    params: &[Value],
) -> Result<QueryResult> {
    match source.fetch_rows(endpoint, legacy, params).await {
        Err(e) if !e.is_structural() => {
            tracing::debug!(error = %e, statement = renamed, "statement rejected, retrying");
            source.fetch_rows(endpoint, renamed, params).await
        }
        result => result,
    }
}

/// Statement counterpart of [`fetch_rows`]
pub(super) async fn execute<S: DiagnosticSource>(
    source: &S,
    endpoint: &Endpoint,
    legacy: &str,
    renamed: &str,
    params: &[Value],
) -> Result<StatementResult> {
    match source.execute(endpoint, legacy, params).await {
        Err(e) if !e.is_structural() => {
            tracing::debug!(error = %e, statement = renamed, "statement rejected, retrying");
            source.execute(endpoint, renamed, params).await
        }
        result => result,
    }
}
