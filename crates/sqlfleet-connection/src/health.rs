//! Reachability checks for registered instances
//!
//! This module provides the ping used by the registry and the
//! classification of a single instance's connection state.
//!
//! # Example
//!
//! ```ignore
//! use sqlfleet_connection::health::{ping_database, InstanceStatus};
//!
//! let status = InstanceStatus::from_ping(&ping_database(connection.as_ref()).await);
//! println!("Status: {status}");
//! ```

mod ping;
mod status;


pub use ping::{PING_QUERY, PingError, PingResult, ping_database};
pub use status::InstanceStatus;
