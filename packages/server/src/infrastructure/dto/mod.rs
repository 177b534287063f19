//! Data transfer objects for the HTTP API and the relay socket.

pub mod http;
pub mod websocket;
