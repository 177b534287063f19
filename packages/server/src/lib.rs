//! Studyhall server library.
//!
//! A small backend exposing student record endpoints and a WebSocket relay
//! that groups connections into named rooms and forwards messages between them.

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use config::ServerConfig;
pub use ui::{build_app, run as run_server};
