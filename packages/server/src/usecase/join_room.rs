//! UseCase: ルーム参加処理
//!
//! 接続をルームに参加させ、参加通知を既存メンバーに配信します。
//! 参加した本人には通知を送りません。

use std::sync::Arc;

use crate::{
    domain::{ConnectionId, ConnectionRegistry, RoomToken, SenderLabel},
    infrastructure::dto::websocket::OutboundFrame,
};

use super::{encode_frame, error::JoinRoomError};

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    registry: Arc<dyn ConnectionRegistry>,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
    pub fn new(registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// ルーム参加を実行
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - 参加通知を受け取ったメンバー数
    /// * `Err(JoinRoomError)` - 参加失敗
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        sender: &SenderLabel,
        room: RoomToken,
    ) -> Result<usize, JoinRoomError> {
        self.registry.join(connection_id, room.clone()).await?;

        let notice = format!("{sender} connected to {room}");
        tracing::info!(connection_id = %connection_id, "{}", notice);

        let payload = encode_frame(&OutboundFrame::Message(notice))
            .map_err(|e| JoinRoomError::Encode(e.to_string()))?;
        Ok(self
            .registry
            .broadcast(&room, &payload, Some(connection_id))
            .await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{domain::RegistryError, infrastructure::registry::InMemoryConnectionRegistry};
    use tokio::sync::mpsc;

    async fn open_connection(
        registry: &Arc<InMemoryConnectionRegistry>,
    ) -> (ConnectionId, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(8);
        let id = registry.register(tx).await;
        registry.activate(&id).await.unwrap();
        (id, rx)
    }

    fn room(token: &str) -> RoomToken {
        RoomToken::new(token.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_join_announces_to_existing_members_only() {
        // テスト項目: 参加通知は既存メンバーに届き、参加者本人には届かない
        // given (前提条件):
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let usecase = JoinRoomUseCase::new(registry.clone());
        let (alice, mut rx_alice) = open_connection(&registry).await;
        let (bob, mut rx_bob) = open_connection(&registry).await;
        usecase
            .execute(&alice, &SenderLabel::from("alice".to_string()), room("lobby"))
            .await
            .unwrap();

        // when (操作):
        let notified = usecase
            .execute(&bob, &SenderLabel::from("bob".to_string()), room("lobby"))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(notified, 1);
        assert_eq!(
            rx_alice.try_recv().unwrap(),
            r#"{"event":"message","data":"bob connected to lobby"}"#
        );
        assert!(rx_bob.try_recv().is_err());
        assert_eq!(registry.members(&room("lobby")).await.len(), 2);
    }

    #[tokio::test]
    async fn test_join_unknown_connection_fails() {
        // テスト項目: 未登録の接続は参加できずエラーになる
        // given (前提条件):
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let usecase = JoinRoomUseCase::new(registry.clone());
        let ghost = crate::domain::ConnectionIdFactory::generate();

        // when (操作):
        let result = usecase
            .execute(&ghost, &SenderLabel::from("ghost".to_string()), room("lobby"))
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(JoinRoomError::Registry(RegistryError::ConnectionNotFound(
                ghost.to_string()
            )))
        );
    }
}
