//! Socket.IO 推送中继
//!
//! 推送是尽力而为的快递，不是账本：发送失败只记 warn 日志，
//! 不重试、不回放。客户端以 HTTP 查询为准（见 comanda-client 的轮询兜底）。

use std::sync::Arc;

use dashmap::DashMap;
use serde::Serialize;
use socketioxide::SocketIo;
use socketioxide::extract::{Data, SocketRef};
use socketioxide::layer::SocketIoLayer;
use tracing::{debug, warn};
use uuid::Uuid;

use shared::events;
use shared::events::RelayHello;

use crate::utils::time::now_millis;

// ========== Relay Service ==========

/// 广播服务，持有 Socket.IO 句柄和连接注册表。
///
/// | 客户端事件 | 动作 |
/// |-----------|------|
/// | `join-kitchen` | 加入 `kitchen` 房间（员工面板） |
/// | `join-order-tracking` (订单编号) | 加入 `order_<code>` 房间 |
/// | `join-user` (用户 ID) | 加入 `user_<id>` 房间 |
///
/// 每个新连接都会先收到 `relay-hello`，携带本次启动的 epoch。
/// 客户端发现 epoch 变了就知道服务端重启过，错过的推送不会补发，
/// 应当重新走 HTTP 拉取。
#[derive(Clone)]
pub struct RelayService {
    io: SocketIo,
    epoch: String,
    connections: Arc<DashMap<String, i64>>,
}

impl RelayService {
    /// 创建服务并返回挂到 axum Router 上的 tower layer
    pub fn new() -> (Self, SocketIoLayer) {
        let (layer, io) = SocketIo::new_layer();
        let epoch = Uuid::new_v4().to_string();
        let connections: Arc<DashMap<String, i64>> = Arc::new(DashMap::new());

        let hello_epoch = epoch.clone();
        let registry = connections.clone();
        io.ns("/", async move |socket: SocketRef| {
            registry.insert(socket.id.to_string(), now_millis());
            debug!(target: "relay", "Socket {} connected", socket.id);

            let hello = RelayHello {
                epoch: hello_epoch.clone(),
                server_time: now_millis(),
            };
            if let Err(e) = socket.emit(events::RELAY_HELLO, &hello) {
                warn!(target: "relay", "Failed to greet socket {}: {}", socket.id, e);
            }

            socket.on(events::JOIN_KITCHEN, async |socket: SocketRef| {
                socket.join(events::ROOM_KITCHEN);
                debug!(target: "relay", "Socket {} joined kitchen", socket.id);
            });

            socket.on(
                events::JOIN_ORDER_TRACKING,
                async |socket: SocketRef, Data::<String>(order_code)| {
                    socket.join(events::room_for_order(&order_code));
                    debug!(
                        target: "relay",
                        "Socket {} tracking order {}", socket.id, order_code
                    );
                },
            );

            socket.on(
                events::JOIN_USER,
                async |socket: SocketRef, Data::<String>(user_id)| {
                    socket.join(events::room_for_user(&user_id));
                    debug!(target: "relay", "Socket {} joined user room {}", socket.id, user_id);
                },
            );

            let registry = registry.clone();
            socket.on_disconnect(async move |socket: SocketRef| {
                registry.remove(&socket.id.to_string());
                debug!(target: "relay", "Socket {} disconnected", socket.id);
            });
        });

        (
            Self {
                io,
                epoch,
                connections,
            },
            layer,
        )
    }

    /// 本次启动的 epoch，随 relay-hello 发给每个连接
    pub fn epoch(&self) -> &str {
        &self.epoch
    }

    /// 当前在线连接数
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// 推送到厨房房间（员工面板）
    pub async fn emit_kitchen<T: Serialize>(&self, event: &str, payload: &T) {
        if let Err(e) = self.io.to(events::ROOM_KITCHEN).emit(event, payload).await {
            warn!(target: "relay", "Failed to push {} to kitchen: {}", event, e);
        }
    }

    /// 推送到单个订单的追踪房间
    pub async fn emit_order<T: Serialize>(&self, order_code: &str, event: &str, payload: &T) {
        let room = events::room_for_order(order_code);
        if let Err(e) = self.io.to(room).emit(event, payload).await {
            warn!(
                target: "relay",
                "Failed to push {} for order {}: {}", event, order_code, e
            );
        }
    }

    /// 推送到某个顾客的个人房间
    pub async fn emit_user<T: Serialize>(&self, user_id: &str, event: &str, payload: &T) {
        let room = events::room_for_user(user_id);
        if let Err(e) = self.io.to(room).emit(event, payload).await {
            warn!(
                target: "relay",
                "Failed to push {} to user {}: {}", event, user_id, e
            );
        }
    }

    /// 全局广播（所有连接，不分房间）
    pub async fn broadcast<T: Serialize>(&self, event: &str, payload: &T) {
        if let Err(e) = self.io.emit(event, payload).await {
            warn!(target: "relay", "Failed to broadcast {}: {}", event, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_epoch_unique_per_boot() {
        let (relay_a, _layer_a) = RelayService::new();
        let (relay_b, _layer_b) = RelayService::new();
        assert!(!relay_a.epoch().is_empty());
        assert_ne!(relay_a.epoch(), relay_b.epoch());
    }

    #[tokio::test]
    async fn test_emits_without_subscribers_are_noops() {
        let (relay, _layer) = RelayService::new();
        assert_eq!(relay.connection_count(), 0);
        // 没有任何订阅者时推送静默完成，不报错不阻塞
        relay.emit_kitchen("new-order", &serde_json::json!({"code": "ORD001"})).await;
        relay.emit_order("ORD001", "order-updated", &serde_json::json!({})).await;
        relay.broadcast("order-status-changed", &serde_json::json!({})).await;
    }
}
