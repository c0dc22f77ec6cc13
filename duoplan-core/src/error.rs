//! Error types for duoplan.

use thiserror::Error;

/// Errors that can occur in duoplan operations.
#[derive(Error, Debug)]
pub enum DuoplanError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Couple space not found: {0}")]
    SpaceNotFound(String),

    #[error("Couple space '{0}' already has a partner")]
    SpaceFull(String),

    #[error("Already a member of couple space '{0}'")]
    AlreadyMember(String),

    #[error("User '{0}' is not in a couple space")]
    NotInSpace(String),

    #[error("Couple space '{0}' is waiting for a partner to join")]
    WaitingForPartner(String),

    #[error("Day not found: {0}")]
    DayNotFound(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for DuoplanError {
    fn from(err: serde_json::Error) -> Self {
        DuoplanError::Serialization(err.to_string())
    }
}

/// Result type alias for duoplan operations.
pub type DuoplanResult<T> = Result<T, DuoplanError>;
