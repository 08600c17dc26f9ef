//! Fleet topology checks and replication control
//!
//! Both services work over any [`sqlfleet_core::DiagnosticSource`], usually
//! the connection registry.

mod control;
mod queries;
mod renamed;
mod service;


pub use control::{ReplicationControl, ReplicationCredentials};
pub use queries::DiagnosticQuery;
pub use service::{ReplicationReport, TopologyHealthService};
