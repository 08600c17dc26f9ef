//! Liveness check for an open connection

use sqlfleet_core::Connection;
use std::time::{Duration, Instant};

/// Statement sent by [`ping_database`]
pub const PING_QUERY: &str = "SELECT 1";

/// Round-trip time of a successful ping
pub type PingResult = Result<Duration, PingError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PingError {
    #[error("Connection is closed")]
    ConnectionClosed,
    #[error("Ping query failed: {0}")]
    QueryFailed(String),
}

/// Run [`PING_QUERY`] and time it. A closed connection is not queried.
pub async fn ping_database(conn: &dyn Connection) -> PingResult {
    if conn.is_closed() {
        return Err(PingError::ConnectionClosed);
    }

    let start = Instant::now();
    conn.query(PING_QUERY, &[])
        .await
        .map(|_| start.elapsed())
        .map_err(|e| PingError::QueryFailed(e.to_string()))
}
