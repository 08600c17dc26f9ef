//! sqlfleet connection - endpoint registry and fleet configuration
//!
//! This crate handles connection lifecycle for fleet endpoints, their
//! credentials, and the fleet configuration file.

mod config;
pub mod health;
pub mod registry;

pub use config::{CredentialDefaults, EndpointConfig, FleetConfig, InstanceConfig};
pub use health::{InstanceStatus, PingError, PingResult, ping_database};
pub use registry::{ConnectionFactory, ConnectionRegistry};
