//! UseCase 層
//!
//! ビジネスロジックを実装するレイヤー。
//! UI 層から呼び出され、Domain 層を操作します。

pub mod delete_student;
pub mod disconnect;
pub mod error;
pub mod join_room;
pub mod list_students;
pub mod register_student;
pub mod relay_message;
pub mod room_router;
pub mod update_student;

pub use delete_student::DeleteStudentUseCase;
pub use disconnect::DisconnectUseCase;
pub use error::{JoinRoomError, RelayMessageError, RouterError, StudentUseCaseError};
pub use join_room::JoinRoomUseCase;
pub use list_students::ListStudentsUseCase;
pub use register_student::RegisterStudentUseCase;
pub use relay_message::RelayMessageUseCase;
pub use room_router::{Flow, RelaySession, RoomRouter, SessionPhase};
pub use update_student::UpdateStudentUseCase;

use crate::infrastructure::dto::websocket::OutboundFrame;

/// Serialize an outbound frame for the relay socket
fn encode_frame(frame: &OutboundFrame) -> Result<String, serde_json::Error> {
    serde_json::to_string(frame)
}
