//! Order vocabulary shared by server and client
//!
//! One `Order` entity covers the three intake channels (QR dine-in,
//! staff-entered, scheduled). Channel-specific fields are optional and the
//! wire strings below are the platform contract, so every rename here is
//! load-bearing.

use serde::{Deserialize, Serialize};
use validator::Validate;

// ============================================================================
// Channel
// ============================================================================

/// Intake channel for an order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum OrderChannel {
    /// Placed by a dine-in customer scanning a table QR code
    #[serde(rename = "dine-in-qr")]
    DineInQr,
    /// Entered through the public checkout / staff dashboard
    #[serde(rename = "staff-entered")]
    Staff,
    /// Scheduled for a future date/time (pre-order)
    #[serde(rename = "scheduled")]
    Scheduled,
}

impl OrderChannel {
    /// Human code prefix for this channel (`QR001`, `ORD001`, `PRE001`)
    pub fn code_prefix(&self) -> &'static str {
        match self {
            OrderChannel::DineInQr => "QR",
            OrderChannel::Staff => "ORD",
            OrderChannel::Scheduled => "PRE",
        }
    }

    /// Sequence counter key for this channel
    pub fn sequence_key(&self) -> &'static str {
        match self {
            OrderChannel::DineInQr => "qr_order",
            OrderChannel::Staff => "order",
            OrderChannel::Scheduled => "pre_order",
        }
    }
}

// ============================================================================
// Status
// ============================================================================

/// Order lifecycle status
///
/// QR/staff orders move `pending → accepted → ready → delivered` (or
/// `cancelled`); scheduled orders are created `confirmed` and only ever
/// move to `completed` or `cancelled`. No transition table is enforced for
/// QR/staff orders; staff dashboards advance states in order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Newly placed, not yet picked up by the kitchen
    #[default]
    Pending,
    /// Accepted by a chef, cooking sub-states apply
    Accepted,
    /// Ready for pickup / service
    Ready,
    /// Handed over to the customer
    Delivered,
    /// Cancelled before completion
    Cancelled,
    /// Scheduled order acknowledged (scheduled channel creation default)
    Confirmed,
    /// Scheduled order fulfilled
    Completed,
}

impl OrderStatus {
    /// Terminal states for the scheduled channel
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }
}

/// Kitchen progress, nested under `accepted` (QR/staff orders only)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CookingStatus {
    #[serde(rename = "not started")]
    #[default]
    NotStarted,
    Preparing,
    Cooking,
    Plating,
    Ready,
}

/// Kitchen queue priority
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderPriority {
    #[default]
    Normal,
    High,
}

/// Fulfilment mode for scheduled orders
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FulfilmentType {
    #[serde(rename = "dine-in")]
    DineIn,
    #[serde(rename = "takeaway")]
    Takeaway,
    #[serde(rename = "delivery")]
    Delivery,
}

// ============================================================================
// Line items
// ============================================================================

/// Ordered line item, copied by value at order time (no menu reference)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    /// Item name as shown on the menu at order time
    pub name: String,
    /// Quantity ordered
    pub quantity: i32,
    /// Unit price at order time
    pub price: f64,
}

impl OrderItem {
    pub fn line_total(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

// ============================================================================
// Requests
// ============================================================================

/// Create-order request body, shared by all three public intake routes.
///
/// The route determines the channel; channel-specific requirements
/// (`tableNumber` for QR, `scheduledFor`/`fulfilment` for scheduled) are
/// checked by the handler.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[validate(length(min = 1, max = 200, message = "Customer name is required"))]
    pub customer_name: String,
    #[validate(length(min = 5, max = 20, message = "Valid phone number is required"))]
    pub customer_phone: String,
    #[validate(email(message = "Invalid email address"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    #[validate(length(min = 1, message = "Order must contain at least one item"))]
    pub items: Vec<OrderItem>,
    /// Caller-supplied total, stored as-is
    #[validate(range(min = 0.0, message = "Total amount must not be negative"))]
    pub total_amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_number: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_for: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fulfilment: Option<FulfilmentType>,
    #[serde(default)]
    pub priority: OrderPriority,
    #[validate(length(max = 500, message = "Notes too long"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Customer account id, when the order was placed while logged in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
}

/// Status mutation request; at least one field must be present
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderStatusRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooking_status: Option<CookingStatus>,
}

// ============================================================================
// Views and events
// ============================================================================

/// Wire view of a persisted order (record id in `table:id` string form)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub code: String,
    pub channel: OrderChannel,
    pub customer_name: String,
    pub customer_phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    pub items: Vec<OrderItem>,
    pub total_amount: f64,
    pub status: OrderStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooking_status: Option<CookingStatus>,
    #[serde(default)]
    pub priority: OrderPriority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_number: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_for: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fulfilment: Option<FulfilmentType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_chef: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Compact status event, broadcast globally on every status mutation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusChanged {
    /// Human order code (`QR001` / `ORD001` / `PRE001`)
    pub order_id: String,
    pub status: OrderStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooking_status: Option<CookingStatus>,
    /// Unix millis of the mutation
    pub timestamp: i64,
}
