//! InMemory Connection Registry 実装
//!
//! ドメイン層が定義する ConnectionRegistry trait の具体的な実装。
//! 接続表とルーム表を一つの Mutex で保護します。
//!
//! ブロードキャスト時はロック中に送信先のスナップショットを取り、
//! ロックを解放してから `try_send` で配送します。

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::{
    Mutex,
    mpsc::{self, error::TrySendError},
};

use crate::domain::{
    Connection, ConnectionId, ConnectionIdFactory, ConnectionRegistry, RegistryError,
    RoomOccupancy, RoomToken,
};

/// A registered connection together with its outbound queue
struct ConnectionEntry {
    connection: Connection,
    sender: mpsc::Sender<String>,
}

#[derive(Default)]
struct RegistryState {
    connections: HashMap<ConnectionId, ConnectionEntry>,
    rooms: HashMap<RoomToken, HashSet<ConnectionId>>,
}

impl RegistryState {
    /// Drop `id` from the member set of `room`; empty rooms cease to exist.
    fn remove_member(&mut self, room: &RoomToken, id: &ConnectionId) {
        if let Some(members) = self.rooms.get_mut(room) {
            members.remove(id);
            if members.is_empty() {
                self.rooms.remove(room);
            }
        }
    }
}

/// インメモリ Connection Registry 実装
#[derive(Default)]
pub struct InMemoryConnectionRegistry {
    state: Mutex<RegistryState>,
}

impl InMemoryConnectionRegistry {
    /// 新しい InMemoryConnectionRegistry を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConnectionRegistry for InMemoryConnectionRegistry {
    async fn register(&self, sender: mpsc::Sender<String>) -> ConnectionId {
        let id = ConnectionIdFactory::generate();
        let mut state = self.state.lock().await;
        state.connections.insert(
            id.clone(),
            ConnectionEntry {
                connection: Connection::new(id.clone()),
                sender,
            },
        );
        tracing::debug!(connection_id = %id, "Connection registered");
        id
    }

    async fn activate(&self, id: &ConnectionId) -> Result<(), RegistryError> {
        let mut state = self.state.lock().await;
        let entry = state
            .connections
            .get_mut(id)
            .ok_or_else(|| RegistryError::ConnectionNotFound(id.to_string()))?;
        entry.connection.open();
        Ok(())
    }

    async fn join(&self, id: &ConnectionId, room: RoomToken) -> Result<(), RegistryError> {
        let mut state = self.state.lock().await;
        let entry = state
            .connections
            .get_mut(id)
            .ok_or_else(|| RegistryError::ConnectionNotFound(id.to_string()))?;
        if !entry.connection.is_open() {
            return Err(RegistryError::NotOpen(id.to_string()));
        }

        let previous = entry.connection.move_to(room.clone());
        if let Some(previous) = previous {
            state.remove_member(&previous, id);
            tracing::debug!(connection_id = %id, room = %previous, "Left room");
        }
        state.rooms.entry(room).or_default().insert(id.clone());
        Ok(())
    }

    async fn leave(&self, id: &ConnectionId) {
        let mut state = self.state.lock().await;
        let Some(room) = state
            .connections
            .get_mut(id)
            .and_then(|entry| entry.connection.room.take())
        else {
            return;
        };
        state.remove_member(&room, id);
        tracing::debug!(connection_id = %id, room = %room, "Left room");
    }

    async fn unregister(&self, id: &ConnectionId) {
        let mut state = self.state.lock().await;
        let Some(mut entry) = state.connections.remove(id) else {
            return;
        };
        if let Some(room) = entry.connection.close() {
            state.remove_member(&room, id);
        }
        tracing::debug!(connection_id = %id, "Connection unregistered");
        // Dropping `entry` drops the registry's sender, which ends the writer task.
    }

    async fn broadcast(
        &self,
        room: &RoomToken,
        payload: &str,
        exclude: Option<&ConnectionId>,
    ) -> usize {
        let targets: Vec<(ConnectionId, mpsc::Sender<String>)> = {
            let state = self.state.lock().await;
            let Some(members) = state.rooms.get(room) else {
                return 0;
            };
            members
                .iter()
                .filter(|id| exclude != Some(*id))
                .filter_map(|id| {
                    state
                        .connections
                        .get(id)
                        .filter(|entry| entry.connection.is_open())
                        .map(|entry| (id.clone(), entry.sender.clone()))
                })
                .collect()
        };

        let mut delivered = 0;
        let mut dead = Vec::new();
        for (id, sender) in targets {
            match sender.try_send(payload.to_string()) {
                Ok(()) => delivered += 1,
                Err(TrySendError::Full(_)) => {
                    tracing::warn!(connection_id = %id, room = %room, "Send queue full, dropping member");
                    dead.push(id);
                }
                Err(TrySendError::Closed(_)) => dead.push(id),
            }
        }

        for id in dead {
            self.unregister(&id).await;
        }
        delivered
    }

    async fn send_to(&self, id: &ConnectionId, payload: &str) -> Result<(), RegistryError> {
        let sender = {
            let state = self.state.lock().await;
            let entry = state
                .connections
                .get(id)
                .ok_or_else(|| RegistryError::ConnectionNotFound(id.to_string()))?;
            if !entry.connection.is_open() {
                return Err(RegistryError::NotOpen(id.to_string()));
            }
            entry.sender.clone()
        };

        match sender.try_send(payload.to_string()) {
            Ok(()) => Ok(()),
            Err(e) => {
                if matches!(e, TrySendError::Full(_)) {
                    tracing::warn!(connection_id = %id, "Send queue full, dropping connection");
                }
                self.unregister(id).await;
                Err(RegistryError::Dropped(id.to_string()))
            }
        }
    }

    async fn room_of(&self, id: &ConnectionId) -> Option<RoomToken> {
        let state = self.state.lock().await;
        state
            .connections
            .get(id)
            .and_then(|entry| entry.connection.room.clone())
    }

    async fn members(&self, room: &RoomToken) -> Vec<ConnectionId> {
        let state = self.state.lock().await;
        let mut members: Vec<ConnectionId> = state
            .rooms
            .get(room)
            .map(|members| members.iter().cloned().collect())
            .unwrap_or_default();
        members.sort();
        members
    }

    async fn rooms(&self) -> Vec<RoomOccupancy> {
        let state = self.state.lock().await;
        let mut rooms: Vec<RoomOccupancy> = state
            .rooms
            .iter()
            .map(|(room, members)| RoomOccupancy {
                room: room.clone(),
                members: members.len(),
            })
            .collect();
        rooms.sort_by(|a, b| a.room.cmp(&b.room));
        rooms
    }

    async fn connection_count(&self) -> usize {
        let state = self.state.lock().await;
        state.connections.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - 接続の登録・ルーム参加・退出・登録解除
    // - ブロードキャストの配送先（除外指定、スナップショット時点のメンバー）
    // - 詰まった接続の切り離し
    //
    // 【どのようなシナリオをテストするか】
    // 1. 一つの接続は常に高々一つのルームに属する
    // 2. 登録解除は冪等
    // 3. 空ルームへのブロードキャストは何もしない
    // ========================================

    fn room(token: &str) -> RoomToken {
        RoomToken::new(token.to_string()).unwrap()
    }

    async fn open_connection(
        registry: &InMemoryConnectionRegistry,
        capacity: usize,
    ) -> (ConnectionId, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(capacity);
        let id = registry.register(tx).await;
        registry.activate(&id).await.unwrap();
        (id, rx)
    }

    #[tokio::test]
    async fn test_join_puts_connection_in_exactly_one_room() {
        // テスト項目: 別ルームに参加すると以前のルームから外れる
        // given (前提条件):
        let registry = InMemoryConnectionRegistry::new();
        let (c, _rx) = open_connection(&registry, 8).await;

        // when (操作):
        registry.join(&c, room("lobby")).await.unwrap();
        registry.join(&c, room("arena")).await.unwrap();

        // then (期待する結果):
        assert_eq!(registry.room_of(&c).await, Some(room("arena")));
        assert_eq!(registry.members(&room("arena")).await, vec![c.clone()]);
        assert!(registry.members(&room("lobby")).await.is_empty());
        // 空になったルームは消える
        let rooms = registry.rooms().await;
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].room, room("arena"));
    }

    #[tokio::test]
    async fn test_join_same_room_is_idempotent() {
        // テスト項目: 同じルームへの再参加はメンバー数を変えない
        // given (前提条件):
        let registry = InMemoryConnectionRegistry::new();
        let (c, _rx) = open_connection(&registry, 8).await;

        // when (操作):
        registry.join(&c, room("lobby")).await.unwrap();
        registry.join(&c, room("lobby")).await.unwrap();

        // then (期待する結果):
        assert_eq!(registry.members(&room("lobby")).await.len(), 1);
    }

    #[tokio::test]
    async fn test_join_requires_open_connection() {
        // テスト項目: ハンドシェイク前の接続や未登録の接続は参加できない
        // given (前提条件):
        let registry = InMemoryConnectionRegistry::new();
        let (tx, _rx) = mpsc::channel(8);
        let connecting = registry.register(tx).await;
        let unknown = ConnectionIdFactory::generate();

        // when (操作):
        let not_open = registry.join(&connecting, room("lobby")).await;
        let not_found = registry.join(&unknown, room("lobby")).await;

        // then (期待する結果):
        assert_eq!(
            not_open,
            Err(RegistryError::NotOpen(connecting.to_string()))
        );
        assert_eq!(
            not_found,
            Err(RegistryError::ConnectionNotFound(unknown.to_string()))
        );
        assert!(registry.rooms().await.is_empty());
    }

    #[tokio::test]
    async fn test_leave_without_room_is_noop() {
        // テスト項目: どのルームにも属していない接続の leave は何もしない
        // given (前提条件):
        let registry = InMemoryConnectionRegistry::new();
        let (c, _rx) = open_connection(&registry, 8).await;

        // when (操作):
        registry.leave(&c).await;

        // then (期待する結果):
        assert_eq!(registry.connection_count().await, 1);
        assert_eq!(registry.room_of(&c).await, None);
    }

    #[tokio::test]
    async fn test_broadcast_excludes_designated_connection() {
        // テスト項目: 除外指定された接続以外の全メンバーに配送される
        // given (前提条件):
        let registry = InMemoryConnectionRegistry::new();
        let (a, mut rx_a) = open_connection(&registry, 8).await;
        let (b, mut rx_b) = open_connection(&registry, 8).await;
        let (c, mut rx_c) = open_connection(&registry, 8).await;
        for id in [&a, &b, &c] {
            registry.join(id, room("lobby")).await.unwrap();
        }

        // when (操作):
        let delivered = registry.broadcast(&room("lobby"), "hi", Some(&a)).await;

        // then (期待する結果):
        assert_eq!(delivered, 2);
        assert!(rx_a.try_recv().is_err());
        assert_eq!(rx_b.try_recv().unwrap(), "hi");
        assert_eq!(rx_c.try_recv().unwrap(), "hi");
    }

    #[tokio::test]
    async fn test_broadcast_to_empty_room_is_noop() {
        // テスト項目: メンバーのいないルームへのブロードキャストは 0 件配送で終わる
        // given (前提条件):
        let registry = InMemoryConnectionRegistry::new();
        let (_c, mut rx) = open_connection(&registry, 8).await;

        // when (操作):
        let delivered = registry.broadcast(&room("lobby"), "hi", None).await;

        // then (期待する結果):
        assert_eq!(delivered, 0);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_broadcast_does_not_reach_later_joiners() {
        // テスト項目: ブロードキャスト後に参加した接続には配送されない
        // given (前提条件):
        let registry = InMemoryConnectionRegistry::new();
        let (a, mut rx_a) = open_connection(&registry, 8).await;
        let (b, mut rx_b) = open_connection(&registry, 8).await;
        registry.join(&a, room("lobby")).await.unwrap();

        // when (操作):
        registry.broadcast(&room("lobby"), "before", None).await;
        registry.join(&b, room("lobby")).await.unwrap();

        // then (期待する結果):
        assert_eq!(rx_a.try_recv().unwrap(), "before");
        assert!(rx_b.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_unregister_is_idempotent() {
        // テスト項目: 登録解除を二回呼んでも一回と同じ結果になる
        // given (前提条件):
        let registry = InMemoryConnectionRegistry::new();
        let (a, _rx_a) = open_connection(&registry, 8).await;
        let (b, _rx_b) = open_connection(&registry, 8).await;
        registry.join(&a, room("lobby")).await.unwrap();
        registry.join(&b, room("lobby")).await.unwrap();

        // when (操作):
        registry.unregister(&a).await;
        registry.unregister(&a).await;

        // then (期待する結果):
        assert_eq!(registry.connection_count().await, 1);
        assert_eq!(registry.members(&room("lobby")).await, vec![b]);
        assert_eq!(registry.room_of(&a).await, None);
    }

    #[tokio::test]
    async fn test_unregistered_connection_never_receives_broadcast() {
        // テスト項目: 切断後の接続には以前のルームへのブロードキャストが届かない
        // given (前提条件):
        let registry = InMemoryConnectionRegistry::new();
        let (a, mut rx_a) = open_connection(&registry, 8).await;
        registry.join(&a, room("lobby")).await.unwrap();

        // when (操作):
        registry.unregister(&a).await;
        let delivered = registry.broadcast(&room("lobby"), "hi", None).await;

        // then (期待する結果): 送信側が破棄され、キューは閉じている
        assert_eq!(delivered, 0);
        assert!(rx_a.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_broadcast_drops_stuck_member() {
        // テスト項目: 送信キューが詰まったメンバーは切り離され、他のメンバーには配送される
        // given (前提条件):
        let registry = InMemoryConnectionRegistry::new();
        let (stuck, _rx_stuck) = open_connection(&registry, 1).await;
        let (healthy, mut rx_healthy) = open_connection(&registry, 8).await;
        registry.join(&stuck, room("lobby")).await.unwrap();
        registry.join(&healthy, room("lobby")).await.unwrap();
        registry.send_to(&stuck, "fill").await.unwrap();

        // when (操作):
        let delivered = registry.broadcast(&room("lobby"), "hi", None).await;

        // then (期待する結果):
        assert_eq!(delivered, 1);
        assert_eq!(rx_healthy.try_recv().unwrap(), "hi");
        assert_eq!(registry.members(&room("lobby")).await, vec![healthy]);
        assert_eq!(registry.connection_count().await, 1);
    }

    #[tokio::test]
    async fn test_send_to_closed_receiver_unregisters() {
        // テスト項目: 受信側が閉じた接続への直接送信は失敗し、登録が解除される
        // given (前提条件):
        let registry = InMemoryConnectionRegistry::new();
        let (c, rx) = open_connection(&registry, 8).await;
        drop(rx);

        // when (操作):
        let sent = registry.send_to(&c, "hi").await;

        // then (期待する結果):
        assert_eq!(sent, Err(RegistryError::Dropped(c.to_string())));
        assert_eq!(registry.connection_count().await, 0);
    }

    #[tokio::test]
    async fn test_send_to_unregistered_connection_fails() {
        // テスト項目: 登録解除済みの接続への直接送信は ConnectionNotFound になる
        // given (前提条件):
        let registry = InMemoryConnectionRegistry::new();
        let (c, _rx) = open_connection(&registry, 8).await;
        registry.unregister(&c).await;

        // when (操作):
        let sent = registry.send_to(&c, "hi").await;

        // then (期待する結果):
        assert_eq!(sent, Err(RegistryError::ConnectionNotFound(c.to_string())));
    }
}
