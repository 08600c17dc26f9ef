//! Replication health states

use serde::{Deserialize, Serialize};

/// Health of one master/slave pair.
///
/// Variants are listed in the order the classifier checks them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReplicationHealth {
    /// An endpoint is unreachable or its status could not be fetched
    #[default]
    Unknown,
    /// The slave has no replication configured
    NotConfigured,
    /// The slave replicates from a different master than expected
    WrongMaster,
    /// The slave reports a replication error
    Error,
    /// Both replication threads are stopped
    Paused,
    /// The slave is behind the master
    Syncing,
    /// The slave is caught up with the expected master
    Healthy,
}

impl ReplicationHealth {
    /// Check if the pair is healthy
    pub fn is_healthy(&self) -> bool {
        matches!(self, ReplicationHealth::Healthy)
    }

    /// Check if replication is running (healthy or catching up)
    pub fn is_replicating(&self) -> bool {
        matches!(self, ReplicationHealth::Healthy | ReplicationHealth::Syncing)
    }

    /// Whether an operator has to step in
    pub fn needs_attention(&self) -> bool {
        matches!(
            self,
            ReplicationHealth::Unknown
                | ReplicationHealth::WrongMaster
                | ReplicationHealth::Error
        )
    }
}

impl std::fmt::Display for ReplicationHealth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReplicationHealth::Unknown => write!(f, "Unknown"),
            ReplicationHealth::NotConfigured => write!(f, "Not configured"),
            ReplicationHealth::WrongMaster => write!(f, "Wrong master"),
            ReplicationHealth::Error => write!(f, "Error"),
            ReplicationHealth::Paused => write!(f, "Paused"),
            ReplicationHealth::Syncing => write!(f, "Syncing"),
            ReplicationHealth::Healthy => write!(f, "Healthy"),
        }
    }
}
