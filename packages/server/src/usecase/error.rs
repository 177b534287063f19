//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::{RegistryError, RepositoryError};

/// Errors from joining a room
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JoinRoomError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("failed to encode join notice: {0}")]
    Encode(String),
}

/// Errors from relaying a message
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RelayMessageError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("failed to encode relayed message: {0}")]
    Encode(String),
}

/// Errors from dispatching an event on a relay connection
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouterError {
    /// The connection already went through teardown
    #[error("connection '{0}' is closed")]
    SessionClosed(String),

    #[error(transparent)]
    Join(#[from] JoinRoomError),

    #[error(transparent)]
    Relay(#[from] RelayMessageError),
}

impl RouterError {
    /// Whether the registry no longer holds the connection
    pub fn is_connection_gone(&self) -> bool {
        matches!(
            self,
            RouterError::Join(JoinRoomError::Registry(
                RegistryError::ConnectionNotFound(_) | RegistryError::Dropped(_)
            )) | RouterError::Relay(RelayMessageError::Registry(
                RegistryError::ConnectionNotFound(_) | RegistryError::Dropped(_)
            ))
        )
    }
}

/// Errors from the student record use cases
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StudentUseCaseError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
