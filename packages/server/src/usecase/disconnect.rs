//! UseCase: 切断処理

use std::sync::Arc;

use crate::domain::{ConnectionId, ConnectionRegistry, RoomToken};

/// 切断のユースケース
pub struct DisconnectUseCase {
    registry: Arc<dyn ConnectionRegistry>,
}

impl DisconnectUseCase {
    /// 新しい DisconnectUseCase を作成
    pub fn new(registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// ルームから退出させ、登録を解除する
    ///
    /// # Returns
    ///
    /// 退出前に所属していたルーム
    pub async fn execute(&self, connection_id: &ConnectionId) -> Option<RoomToken> {
        let room = self.registry.room_of(connection_id).await;
        self.registry.leave(connection_id).await;
        self.registry.unregister(connection_id).await;
        room
    }
}
