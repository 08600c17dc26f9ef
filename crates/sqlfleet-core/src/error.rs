//! Error types for sqlfleet

use thiserror::Error;

use crate::Endpoint;

/// Core error type for sqlfleet operations
#[derive(Error, Debug)]
pub enum FleetError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error("Driver error: {0}")]
    Driver(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("The instance is not registered: {0}")]
    NotRegistered(Endpoint),

    #[error("Invalid endpoint '{0}': expected host:port")]
    InvalidEndpoint(String),

    #[error("The key is not valid: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl FleetError {
    /// Whether the failure means the endpoint could not be reached at all
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            FleetError::Connection(_) | FleetError::NotRegistered(_) | FleetError::Io(_)
        )
    }
}

/// Result type alias for sqlfleet operations
pub type Result<T> = std::result::Result<T, FleetError>;
