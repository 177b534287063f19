//! UseCase: メッセージ中継処理
//!
//! 送信者に本文をそのまま返し（自己確認）、指定ルームのメンバーへ配信します。
//! 送信者自身がそのルームのメンバーであっても、受け取るのは自己確認の一通だけです。

use std::sync::Arc;

use crate::{
    domain::{ConnectionId, ConnectionRegistry, RoomToken},
    infrastructure::dto::websocket::OutboundFrame,
};

use super::{encode_frame, error::RelayMessageError};

/// メッセージ中継のユースケース
pub struct RelayMessageUseCase {
    registry: Arc<dyn ConnectionRegistry>,
}

impl RelayMessageUseCase {
    /// 新しい RelayMessageUseCase を作成
    pub fn new(registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// メッセージ中継を実行
    ///
    /// 送信者の所属ルームは配送先の決定に関係しません。
    /// 自己確認を送れない送信者（登録解除済み、またはキューが詰まって切り離された接続）
    /// のメッセージはルームに配信しません。
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - メッセージを受け取ったルームメンバー数（送信者を除く）
    /// * `Err(RelayMessageError)` - 中継失敗
    pub async fn execute(
        &self,
        from: &ConnectionId,
        room: &RoomToken,
        text: String,
    ) -> Result<usize, RelayMessageError> {
        let payload = encode_frame(&OutboundFrame::Message(text))
            .map_err(|e| RelayMessageError::Encode(e.to_string()))?;

        self.registry.send_to(from, &payload).await?;
        let delivered = self.registry.broadcast(room, &payload, Some(from)).await;
        tracing::debug!(
            connection_id = %from,
            room = %room,
            delivered,
            "Relayed message"
        );

        Ok(delivered)
    }
}
