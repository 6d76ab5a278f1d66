//! Realtime event and room names
//!
//! The socket layer is fire-and-forget: pushes are a courtesy, HTTP remains
//! the source of truth. Event names are the platform contract and must not
//! drift from the dashboards listening for them.

use serde::{Deserialize, Serialize};

use crate::order::OrderChannel;

// ============================================================================
// Client -> server
// ============================================================================

/// Join the staff kitchen room
pub const JOIN_KITCHEN: &str = "join-kitchen";
/// Join the tracking room of one order; payload is the order code
pub const JOIN_ORDER_TRACKING: &str = "join-order-tracking";
/// Join a customer's personal room; payload is the customer id
pub const JOIN_USER: &str = "join-user";

// ============================================================================
// Server -> client
// ============================================================================

/// Sent to every new connection (restart detection)
pub const RELAY_HELLO: &str = "relay-hello";

pub const NEW_ORDER: &str = "new-order";
pub const NEW_QR_ORDER: &str = "new-qr-order";
pub const ORDER_UPDATED: &str = "order-updated";
pub const QR_ORDER_UPDATED: &str = "qr-order-updated";
pub const ORDER_STATUS_CHANGED: &str = "order-status-changed";
pub const QR_ORDER_STATUS_CHANGED: &str = "qr-order-status-changed";
pub const INVENTORY_UPDATED: &str = "inventory-updated";
/// Personal confirmation pushed to `user_<id>` when a signed-in customer orders
pub const ORDER_PLACED: &str = "order-placed";

/// Creation event name for a channel
pub fn new_order_event(channel: OrderChannel) -> &'static str {
    match channel {
        OrderChannel::DineInQr => NEW_QR_ORDER,
        OrderChannel::Staff | OrderChannel::Scheduled => NEW_ORDER,
    }
}

/// Full-payload update event name for a channel
pub fn order_updated_event(channel: OrderChannel) -> &'static str {
    match channel {
        OrderChannel::DineInQr => QR_ORDER_UPDATED,
        OrderChannel::Staff | OrderChannel::Scheduled => ORDER_UPDATED,
    }
}

/// Compact status event name for a channel
pub fn status_changed_event(channel: OrderChannel) -> &'static str {
    match channel {
        OrderChannel::DineInQr => QR_ORDER_STATUS_CHANGED,
        OrderChannel::Staff | OrderChannel::Scheduled => ORDER_STATUS_CHANGED,
    }
}

// ============================================================================
// Rooms
// ============================================================================

/// Staff dashboards viewing pending/active orders
pub const ROOM_KITCHEN: &str = "kitchen";

/// Per-order tracking room
pub fn room_for_order(order_code: &str) -> String {
    format!("order_{order_code}")
}

/// Per-customer room
pub fn room_for_user(user_id: &str) -> String {
    format!("user_{user_id}")
}

// ============================================================================
// Handshake
// ============================================================================

/// Handshake payload pushed on connect. The epoch is regenerated on every
/// server boot; a client seeing a new epoch re-fetches over HTTP rather
/// than trusting missed pushes to be replayed (they are not).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RelayHello {
    pub epoch: String,
    pub server_time: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_event_names() {
        assert_eq!(new_order_event(OrderChannel::DineInQr), "new-qr-order");
        assert_eq!(new_order_event(OrderChannel::Staff), "new-order");
        assert_eq!(new_order_event(OrderChannel::Scheduled), "new-order");
        assert_eq!(
            status_changed_event(OrderChannel::DineInQr),
            "qr-order-status-changed"
        );
    }

    #[test]
    fn test_room_names() {
        assert_eq!(room_for_order("QR001"), "order_QR001");
        assert_eq!(room_for_user("customer:abc"), "user_customer:abc");
    }
}
