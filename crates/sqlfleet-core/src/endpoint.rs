//! Database server endpoint identity

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::FleetError;

/// A database server address made of a host and a port.
///
/// Two endpoints are equal only when host and port match exactly; no DNS
/// resolution or case folding is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Endpoint {
    host: String,
    port: u16,
}

impl Endpoint {
    /// Create an endpoint from its parts
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Parse `host:port`, or `[v6-host]:port` for IPv6 literals
    pub fn parse(address: &str) -> Result<Self, FleetError> {
        let invalid = || FleetError::InvalidEndpoint(address.to_string());

        let (host, port) = if let Some(rest) = address.strip_prefix('[') {
            let (host, rest) = rest.split_once(']').ok_or_else(invalid)?;
            let port = rest.strip_prefix(':').ok_or_else(invalid)?;
            (host, port)
        } else {
            let (host, port) = address.rsplit_once(':').ok_or_else(invalid)?;
            if host.contains(':') {
                return Err(invalid());
            }
            (host, port)
        };

        if host.is_empty() {
            return Err(invalid());
        }
        let port = port.parse::<u16>().map_err(|_| invalid())?;
        Ok(Self::new(host, port))
    }

    /// Host name or IP literal
    pub fn host(&self) -> &str {
        &self.host
    }

    /// TCP port
    pub fn port(&self) -> u16 {
        self.port
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

impl FromStr for Endpoint {
    type Err = FleetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Endpoint {
    type Error = FleetError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Endpoint> for String {
    fn from(endpoint: Endpoint) -> Self {
        endpoint.to_string()
    }
}

/// A slave endpoint and the master it is expected to replicate from
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReplicationPair {
    pub slave: Endpoint,
    pub master: Endpoint,
}

impl ReplicationPair {
    pub fn new(slave: Endpoint, master: Endpoint) -> Self {
        Self { slave, master }
    }
}

impl fmt::Display for ReplicationPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.slave, self.master)
    }
}
