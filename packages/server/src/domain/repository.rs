//! Repository and registry traits.
//!
//! The domain layer defines these abstractions; the infrastructure layer
//! provides the concrete in-memory implementations.

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{
    entity::{Student, StudentProfile},
    error::{RegistryError, RepositoryError},
    value_object::{ConnectionId, RoomToken, Timestamp},
};

/// A live room and how many connections are in it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomOccupancy {
    pub room: RoomToken,
    pub members: usize,
}

/// Bookkeeping for relay connections and their room membership.
///
/// Every connection is in at most one room. Delivery is non-blocking:
/// a member whose outbound queue is full or closed is unregistered.
#[async_trait]
pub trait ConnectionRegistry: Send + Sync {
    /// Admit a connection whose outbound frames go to `sender`
    async fn register(&self, sender: mpsc::Sender<String>) -> ConnectionId;

    /// Mark the handshake of a registered connection as finished
    async fn activate(&self, id: &ConnectionId) -> Result<(), RegistryError>;

    /// Put the connection in `room`, leaving any other room first
    async fn join(&self, id: &ConnectionId, room: RoomToken) -> Result<(), RegistryError>;

    /// Remove the connection from its room; no-op when it is in none
    async fn leave(&self, id: &ConnectionId);

    /// Leave and forget the connection. Idempotent.
    async fn unregister(&self, id: &ConnectionId);

    /// Deliver `payload` to the members of `room` except `exclude`
    ///
    /// Returns the number of members the payload was queued for.
    async fn broadcast(
        &self,
        room: &RoomToken,
        payload: &str,
        exclude: Option<&ConnectionId>,
    ) -> usize;

    /// Deliver `payload` to a single connection
    ///
    /// Fails with `ConnectionNotFound` once the connection has been
    /// unregistered, and with `Dropped` when this send found its queue
    /// full or closed.
    async fn send_to(&self, id: &ConnectionId, payload: &str) -> Result<(), RegistryError>;

    async fn room_of(&self, id: &ConnectionId) -> Option<RoomToken>;

    async fn members(&self, room: &RoomToken) -> Vec<ConnectionId>;

    /// Live rooms sorted by token
    async fn rooms(&self) -> Vec<RoomOccupancy>;

    async fn connection_count(&self) -> usize;
}

/// Document store for student records
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Student>, RepositoryError>;

    async fn insert(&self, student: Student) -> Result<(), RepositoryError>;

    /// Clear the `current` flag on every student, returning how many changed
    async fn clear_current(&self) -> Result<usize, RepositoryError>;

    /// Update the first student created at `timestamp`
    async fn update_by_timestamp(
        &self,
        timestamp: Timestamp,
        profile: StudentProfile,
        current: bool,
    ) -> Result<(), RepositoryError>;

    /// Remove the first student created at `timestamp`
    async fn remove_by_timestamp(&self, timestamp: Timestamp) -> Result<(), RepositoryError>;
}
