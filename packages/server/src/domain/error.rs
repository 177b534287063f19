//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// RoomToken validation error
    #[error("RoomToken cannot be empty")]
    RoomTokenEmpty,
}

/// Errors related to connection registry bookkeeping
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The connection was never registered or has already been unregistered
    #[error("connection '{0}' is not registered")]
    ConnectionNotFound(String),

    /// The connection exists but has not completed its handshake
    #[error("connection '{0}' is not open")]
    NotOpen(String),

    /// The connection's send queue was full or closed, so it was unregistered
    #[error("connection '{0}' was dropped: send queue unavailable")]
    Dropped(String),
}

/// Errors returned by the student document store
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// No student matches the given timestamp
    #[error("no student with timestamp {0}")]
    StudentNotFound(i64),

    /// The backing store is unavailable
    #[error("student store unavailable: {0}")]
    Unavailable(String),
}
