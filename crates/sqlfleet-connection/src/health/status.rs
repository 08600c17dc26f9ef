//! Instance connection state

use serde::{Deserialize, Serialize};

use super::PingResult;

/// Running state of one registered endpoint, as seen through its connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstanceStatus {
    /// The instance answers a ping
    Ok,
    /// The instance is registered but the ping failed
    Error,
    /// The endpoint has not been registered
    Unregistered,
}

impl InstanceStatus {
    /// Classify a ping outcome for a registered endpoint
    pub fn from_ping(result: &PingResult) -> Self {
        match result {
            Ok(_) => InstanceStatus::Ok,
            Err(_) => InstanceStatus::Error,
        }
    }

    /// Whether queries can be sent to the instance
    pub fn is_reachable(&self) -> bool {
        matches!(self, InstanceStatus::Ok)
    }
}

impl std::fmt::Display for InstanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InstanceStatus::Ok => write!(f, "OK"),
            InstanceStatus::Error => write!(f, "Error"),
            InstanceStatus::Unregistered => write!(f, "Unregistered"),
        }
    }
}
