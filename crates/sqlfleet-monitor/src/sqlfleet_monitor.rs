//! sqlfleet monitor - replication health classification for MySQL fleets
//!
//! This crate provides:
//! - Snapshot decoding of `SHOW MASTER STATUS`, `SHOW SLAVE STATUS`,
//!   `SHOW PROCESSLIST` and `SHOW GLOBAL VARIABLES`
//! - InnoDB monitor text parsing
//! - Replication pair classification
//! - Topology checks and replication control over a diagnostic source

pub mod innodb;
pub mod replication;
pub mod snapshot;
pub mod topology;

pub use innodb::*;
pub use replication::*;
pub use snapshot::*;
pub use topology::*;
