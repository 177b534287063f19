//! Room Router: per-connection event protocol.
//!
//! Each relay connection owns a [`RelaySession`] and feeds it one
//! [`RelayEvent`] at a time:
//!
//! ```text
//! unjoined --open--> joined --open--> joined (other room)
//!     \                 |
//!      +--disconnect / transport close--> closed (terminal)
//! ```
//!
//! A closed session rejects every further event.

use std::sync::Arc;

use crate::domain::{ConnectionId, ConnectionRegistry, RelayEvent, RoomToken};

use super::{
    disconnect::DisconnectUseCase, error::RouterError, join_room::JoinRoomUseCase,
    relay_message::RelayMessageUseCase,
};

/// Where a connection is in its lifecycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionPhase {
    Unjoined,
    Joined(RoomToken),
    Closed,
}

/// Router-side state of one relay connection
#[derive(Debug)]
pub struct RelaySession {
    id: ConnectionId,
    phase: SessionPhase,
}

impl RelaySession {
    pub fn new(id: ConnectionId) -> Self {
        Self {
            id,
            phase: SessionPhase::Unjoined,
        }
    }

    pub fn id(&self) -> &ConnectionId {
        &self.id
    }

    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    pub fn is_closed(&self) -> bool {
        self.phase == SessionPhase::Closed
    }
}

/// What the connection loop should do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

/// Interprets relay events and turns them into registry operations
pub struct RoomRouter {
    join_room: JoinRoomUseCase,
    relay_message: RelayMessageUseCase,
    disconnect: DisconnectUseCase,
}

impl RoomRouter {
    pub fn new(registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self {
            join_room: JoinRoomUseCase::new(registry.clone()),
            relay_message: RelayMessageUseCase::new(registry.clone()),
            disconnect: DisconnectUseCase::new(registry),
        }
    }

    /// Handle one inbound event for `session`.
    ///
    /// # Errors
    ///
    /// * `RouterError::SessionClosed` - the session already went through teardown,
    ///   or the registry dropped the connection while handling this event; the
    ///   session is closed either way
    /// * `RouterError::Join` / `RouterError::Relay` - the event could not be applied;
    ///   the session stays usable
    pub async fn dispatch(
        &self,
        session: &mut RelaySession,
        event: RelayEvent,
    ) -> Result<Flow, RouterError> {
        if session.is_closed() {
            return Err(RouterError::SessionClosed(session.id.to_string()));
        }
        tracing::debug!(connection_id = %session.id, event = event.name(), "Dispatching event");

        match self.apply(session, event).await {
            Err(e) if e.is_connection_gone() => {
                tracing::warn!(connection_id = %session.id, "Registry dropped the connection: {}", e);
                self.close(session).await;
                Err(RouterError::SessionClosed(session.id.to_string()))
            }
            result => result,
        }
    }

    async fn apply(
        &self,
        session: &mut RelaySession,
        event: RelayEvent,
    ) -> Result<Flow, RouterError> {
        match event {
            RelayEvent::Open { sender, room } => {
                self.join_room
                    .execute(&session.id, &sender, room.clone())
                    .await?;
                session.phase = SessionPhase::Joined(room);
                Ok(Flow::Continue)
            }
            RelayEvent::Message { room, text } => {
                self.relay_message.execute(&session.id, &room, text).await?;
                Ok(Flow::Continue)
            }
            RelayEvent::Disconnect => {
                self.close(session).await;
                Ok(Flow::Stop)
            }
        }
    }

    /// Tear the session down: leave its room and unregister it.
    ///
    /// Safe to call more than once.
    pub async fn close(&self, session: &mut RelaySession) {
        if session.is_closed() {
            return;
        }
        let room = self.disconnect.execute(&session.id).await;
        session.phase = SessionPhase::Closed;
        match room {
            Some(room) => {
                tracing::info!(connection_id = %session.id, room = %room, "Connection closed")
            }
            None => tracing::info!(connection_id = %session.id, "Connection closed"),
        }
    }
}
