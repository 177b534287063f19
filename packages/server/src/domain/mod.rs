//! Domain layer for the studyhall backend.
//!
//! This module contains the relay and student models that are independent
//! of data transfer objects (DTOs) and infrastructure concerns.

pub mod entity;
pub mod error;
pub mod event;
pub mod factory;
pub mod repository;
pub mod value_object;

pub use entity::{Connection, ConnectionState, Student, StudentProfile};
pub use error::{RegistryError, RepositoryError, ValueObjectError};
pub use event::RelayEvent;
pub use factory::{ConnectionIdFactory, StudentIdFactory};
pub use repository::{ConnectionRegistry, RoomOccupancy, StudentRepository};
pub use value_object::{ConnectionId, RoomToken, SenderLabel, StudentId, Timestamp};
