//! Relay socket frame DTOs.
//!
//! Every frame is a JSON object with an `event` name and, except for
//! `disconnect`, a `data` payload:
//!
//! ```text
//! {"event":"open","data":["alice","lobby"]}
//! {"event":"message","data":["lobby","hi"]}
//! {"event":"disconnect"}
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{RelayEvent, RoomToken, SenderLabel, ValueObjectError};

/// Why an inbound text frame could not be turned into an event
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("malformed frame: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid event payload: {0}")]
    Invalid(#[from] ValueObjectError),
}

/// Decode a text frame into a relay event
pub fn decode_event(text: &str) -> Result<RelayEvent, FrameError> {
    let frame: InboundFrame = serde_json::from_str(text)?;
    Ok(RelayEvent::try_from(frame)?)
}

/// Frame received from a relay client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "lowercase")]
pub enum InboundFrame {
    /// `[senderLabel, roomToken]`
    Open(String, String),
    /// `[roomToken, text]`
    Message(String, String),
    Disconnect,
}

impl TryFrom<InboundFrame> for RelayEvent {
    type Error = ValueObjectError;

    fn try_from(frame: InboundFrame) -> Result<Self, Self::Error> {
        match frame {
            InboundFrame::Open(sender, room) => Ok(RelayEvent::Open {
                sender: SenderLabel::from(sender),
                room: RoomToken::new(room)?,
            }),
            InboundFrame::Message(room, text) => Ok(RelayEvent::Message {
                room: RoomToken::new(room)?,
                text,
            }),
            InboundFrame::Disconnect => Ok(RelayEvent::Disconnect),
        }
    }
}

/// Frame sent to a relay client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "lowercase")]
pub enum OutboundFrame {
    /// Relayed text or a system notice
    Message(String),
}
