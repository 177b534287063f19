//! Shared application state.

use std::sync::Arc;

use crate::{
    domain::{ConnectionRegistry, StudentRepository},
    infrastructure::{registry::InMemoryConnectionRegistry, repository::InMemoryStudentRepository},
};

/// Shared application state
pub struct AppState {
    /// Relay connections and room membership
    pub registry: Arc<dyn ConnectionRegistry>,
    /// Student document store
    pub students: Arc<dyn StudentRepository>,
    /// Outbound frames buffered per relay connection
    pub send_queue_capacity: usize,
}

impl AppState {
    /// State backed by the in-memory registry and student store
    pub fn in_memory(send_queue_capacity: usize) -> Self {
        Self {
            registry: Arc::new(InMemoryConnectionRegistry::new()),
            students: Arc::new(InMemoryStudentRepository::new()),
            send_queue_capacity,
        }
    }
}
