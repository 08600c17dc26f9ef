//! sqlfleet core - shared abstractions for the fleet monitor
//!
//! This crate provides the types every other sqlfleet crate depends on:
//!
//! - `Endpoint` - host+port identity of one database server
//! - `Value`, `Row`, `QueryResult` - typed result cells with lenient conversions
//! - `Connection` - trait for an open database handle
//! - `DiagnosticSource` - what the monitor needs from the connection layer

mod connection;
mod endpoint;
mod error;
mod source;
mod types;

pub use connection::*;
pub use endpoint::*;
pub use error::*;
pub use source::*;
pub use types::*;
