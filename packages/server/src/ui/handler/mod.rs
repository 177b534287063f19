//! Handler modules for HTTP and WebSocket endpoints.

pub mod http;
pub mod student;
pub mod websocket;

// Re-export HTTP handlers
pub use http::{get_rooms, health_check};
pub use student::{create_student, delete_student, list_students, update_student};

// Re-export WebSocket handlers
pub use websocket::websocket_handler;
