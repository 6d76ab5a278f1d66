//! Pending intent - 跨登录跳转的续作对象
//!
//! The client wizard serializes what the customer was doing before a login
//! redirect and resumes it afterwards. One discriminated value object
//! replaces the ad hoc key-value entries, so the resume match is
//! exhaustive and type-checked:
//!
//! ```json
//! {
//!   "type": "table-food",
//!   "payload": { "reservation": { "reservationDate": "2025-06-01", ... } }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::order::{FulfilmentType, OrderItem};

/// 客户端持久化键名 (localStorage contract, preserved verbatim)
pub mod keys {
    pub const CURRENT_ORDER: &str = "currentOrder";
    pub const PENDING_RESERVATION: &str = "pendingReservation";
    pub const RESERVATION_CONTEXT: &str = "reservationContext";
    pub const RESERVATION_STATE: &str = "reservationState";
    pub const RETURN_AFTER_LOGIN: &str = "returnAfterLogin";
    pub const PREORDER_CONTEXT: &str = "preorderContext";
    pub const CUSTOMER_TOKEN: &str = "customerToken";
    pub const CUSTOMER_USER: &str = "customerUser";
    pub const QR_TABLE_NUMBER: &str = "qrTableNumber";
}

/// Reservation details staged by the wizard before checkout/login
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReservationDraft {
    /// `YYYY-MM-DD` in the restaurant timezone
    pub reservation_date: String,
    pub time_slot: String,
    pub selected_tables: Vec<i32>,
    #[serde(default)]
    pub food_items: Vec<OrderItem>,
    #[serde(default)]
    pub food_total: f64,
    pub table_total: f64,
    pub grand_total: f64,
}

/// Scheduled-order details staged before checkout/login
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PreorderDraft {
    /// `YYYY-MM-DD` in the restaurant timezone
    pub scheduled_date: String,
    /// `HH:MM`
    pub scheduled_time: String,
    pub fulfilment: FulfilmentType,
    pub items: Vec<OrderItem>,
    pub total_amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_address: Option<String>,
}

/// Delivery checkout staged before login
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryDraft {
    pub delivery_address: String,
    pub items: Vec<OrderItem>,
    pub total_amount: f64,
}

/// What the customer was in the middle of when a login was required
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "payload")]
pub enum PendingIntent {
    /// Tables only, no food attached
    #[serde(rename = "table-only")]
    TableOnly { reservation: ReservationDraft },
    /// Tables plus a bundled food order
    #[serde(rename = "table-food")]
    TableFood { reservation: ReservationDraft },
    /// Scheduled order for a future date/time
    #[serde(rename = "preorder")]
    Preorder { preorder: PreorderDraft },
    /// Immediate delivery checkout
    #[serde(rename = "delivery")]
    Delivery { order: DeliveryDraft },
}

impl PendingIntent {
    /// Wire tag of this intent
    pub fn kind(&self) -> &'static str {
        match self {
            PendingIntent::TableOnly { .. } => "table-only",
            PendingIntent::TableFood { .. } => "table-food",
            PendingIntent::Preorder { .. } => "preorder",
            PendingIntent::Delivery { .. } => "delivery",
        }
    }
}
