//! Inbound relay events.

use super::value_object::{RoomToken, SenderLabel};

/// An application-level event received on a relay connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayEvent {
    /// Join `room`, announcing the sender by `sender`
    Open { sender: SenderLabel, room: RoomToken },
    /// Relay `text` to the members of `room`
    Message { room: RoomToken, text: String },
    /// The client is going away
    Disconnect,
}

impl RelayEvent {
    /// Event name as it appears on the wire
    pub fn name(&self) -> &'static str {
        match self {
            Self::Open { .. } => "open",
            Self::Message { .. } => "message",
            Self::Disconnect => "disconnect",
        }
    }
}
