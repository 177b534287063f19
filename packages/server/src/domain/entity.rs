//! Core domain models for the relay and the student records.

use super::value_object::{ConnectionId, RoomToken, StudentId, Timestamp};

/// Liveness of a relay connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Upgrade accepted, handshake not finished yet
    Connecting,
    /// Handshake finished; the connection may join rooms and receive broadcasts
    Open,
    /// Terminal state
    Closed,
}

/// A client connection tracked by the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    /// Connection identifier
    pub id: ConnectionId,
    /// The single room this connection currently belongs to
    pub room: Option<RoomToken>,
    /// Liveness state
    pub state: ConnectionState,
}

impl Connection {
    /// Create a connection that has not completed its handshake
    pub fn new(id: ConnectionId) -> Self {
        Self {
            id,
            room: None,
            state: ConnectionState::Connecting,
        }
    }

    /// Mark the handshake as finished. A closed connection stays closed.
    pub fn open(&mut self) {
        if self.state == ConnectionState::Connecting {
            self.state = ConnectionState::Open;
        }
    }

    /// Close the connection and drop its room membership
    ///
    /// Returns the room it was in, if any.
    pub fn close(&mut self) -> Option<RoomToken> {
        self.state = ConnectionState::Closed;
        self.room.take()
    }

    pub fn is_open(&self) -> bool {
        self.state == ConnectionState::Open
    }

    /// Move the connection into `room`, returning the room it left.
    ///
    /// Returns `None` both when it was in no room and when it was already in `room`.
    pub fn move_to(&mut self, room: RoomToken) -> Option<RoomToken> {
        match self.room.replace(room) {
            Some(previous) if Some(&previous) != self.room.as_ref() => Some(previous),
            _ => None,
        }
    }
}

/// Editable fields of a student record
#[derive(Debug, Clone, PartialEq)]
pub struct StudentProfile {
    pub firstname: String,
    pub lastname: String,
    pub age: f64,
    pub gender: String,
    pub awesome: f64,
}

/// A stored student record
#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    /// Document identifier
    pub id: StudentId,
    pub firstname: String,
    pub lastname: String,
    pub age: f64,
    pub gender: String,
    /// Whether this is the most recently enrolled student
    pub current: bool,
    pub awesome: f64,
    /// Creation time; used as the lookup key by update and delete
    pub timestamp: Timestamp,
}

impl Student {
    /// Create a newly enrolled student. New students are always current.
    pub fn enroll(id: StudentId, profile: StudentProfile, timestamp: Timestamp) -> Self {
        Self {
            id,
            firstname: profile.firstname,
            lastname: profile.lastname,
            age: profile.age,
            gender: profile.gender,
            current: true,
            awesome: profile.awesome,
            timestamp,
        }
    }

    /// Overwrite the editable fields. Identity and timestamp are kept.
    pub fn apply(&mut self, profile: StudentProfile, current: bool) {
        self.firstname = profile.firstname;
        self.lastname = profile.lastname;
        self.age = profile.age;
        self.gender = profile.gender;
        self.awesome = profile.awesome;
        self.current = current;
    }
}
