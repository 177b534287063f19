//! Domain factories for creating identifiers.

use super::value_object::{ConnectionId, StudentId};

/// Factory for generating ConnectionId instances.
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    /// Generate a new ConnectionId with a random UUID v4.
    pub fn generate() -> ConnectionId {
        ConnectionId::from_uuid(uuid::Uuid::new_v4())
    }
}

/// Factory for generating StudentId instances.
pub struct StudentIdFactory;

impl StudentIdFactory {
    /// Generate a new StudentId with a random UUID v4.
    pub fn generate() -> StudentId {
        StudentId::from_uuid(uuid::Uuid::new_v4())
    }
}
