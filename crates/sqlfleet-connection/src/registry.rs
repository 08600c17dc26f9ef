//! Connection registry for fleet endpoints
//!
//! The registry owns one open connection per registered endpoint together
//! with the credentials it was registered with. It is the
//! `DiagnosticSource` the monitor runs its status queries through.
//!
//! # Example
//!
//! ```ignore
//! use sqlfleet_connection::{ConnectionRegistry, InstanceConfig};
//!
//! let registry = ConnectionRegistry::new(factory);
//! registry.register(endpoint.clone(), InstanceConfig::new("dba", "dba", "repl", "repl")).await?;
//! let status = registry.check_instance(&endpoint).await;
//! registry.unregister(&endpoint).await;
//! ```

mod factory;
#[allow(clippy::module_inception)]
mod registry;

#[cfg(test)]
mod tests;

pub use factory::ConnectionFactory;
pub use registry::ConnectionRegistry;
