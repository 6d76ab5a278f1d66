//! Table reservation vocabulary
//!
//! The restaurant floor has a fixed set of eight numbered tables. Slots are
//! labeled hour ranges; the server stores whatever label the client sends
//! and matches on exact string equality, so the canonical list below exists
//! for the client UI, not as a server-side vocabulary check.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::order::OrderItem;

/// Every physical table number. Adding a table is a code change.
pub const TABLE_UNIVERSE: [i32; 8] = [1, 2, 3, 4, 5, 6, 7, 8];

/// Canonical time-slot labels offered by the client UI
pub const TIME_SLOTS: [&str; 8] = [
    "12:00-13:00",
    "13:00-14:00",
    "14:00-15:00",
    "15:00-16:00",
    "18:00-19:00",
    "19:00-20:00",
    "20:00-21:00",
    "21:00-22:00",
];

/// How far ahead a reservation may be placed, in days (today inclusive)
pub const BOOKING_WINDOW_DAYS: i64 = 30;

/// Reservation lifecycle status
///
/// Only `pending` and `confirmed` are *active* for conflict checking.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    #[default]
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl ReservationStatus {
    /// Active reservations hold their tables against new bookings
    pub fn is_active(&self) -> bool {
        matches!(self, ReservationStatus::Pending | ReservationStatus::Confirmed)
    }
}

/// Create-reservation request body
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    #[validate(length(min = 1, max = 200, message = "Customer name is required"))]
    pub customer_name: String,
    #[validate(length(min = 5, max = 20, message = "Valid phone number is required"))]
    pub customer_phone: String,
    #[validate(email(message = "Invalid email address"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    /// Calendar date, `YYYY-MM-DD` in the restaurant timezone
    #[validate(length(min = 10, max = 10, message = "Date must be YYYY-MM-DD"))]
    pub reservation_date: String,
    #[validate(length(min = 1, max = 50, message = "Time slot is required"))]
    pub time_slot: String,
    #[validate(length(min = 1, message = "Select at least one table"))]
    pub selected_tables: Vec<i32>,
    #[serde(default)]
    pub has_food: bool,
    #[serde(default)]
    pub food_items: Vec<OrderItem>,
    #[serde(default)]
    pub food_total: f64,
    #[serde(default)]
    pub table_total: f64,
    #[serde(default)]
    pub grand_total: f64,
}

/// Status mutation request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReservationStatusRequest {
    pub status: ReservationStatus,
}

/// Availability query result for one `(date, timeSlot)` pair
///
/// Invariant: the two sets partition [`TABLE_UNIVERSE`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TableAvailability {
    pub available_tables: Vec<i32>,
    pub reserved_tables: Vec<i32>,
}

/// Wire view of a persisted reservation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationView {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub code: String,
    pub customer_name: String,
    pub customer_phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    /// Midnight of the reserved day, Unix millis in the restaurant timezone
    pub reservation_date: i64,
    pub time_slot: String,
    pub selected_tables: Vec<i32>,
    pub has_food: bool,
    #[serde(default)]
    pub food_items: Vec<OrderItem>,
    pub food_total: f64,
    pub table_total: f64,
    pub grand_total: f64,
    pub status: ReservationStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_universe_is_one_through_eight() {
        assert_eq!(TABLE_UNIVERSE.len(), 8);
        assert_eq!(TABLE_UNIVERSE[0], 1);
        assert_eq!(TABLE_UNIVERSE[7], 8);
    }

    #[test]
    fn test_active_statuses() {
        assert!(ReservationStatus::Pending.is_active());
        assert!(ReservationStatus::Confirmed.is_active());
        assert!(!ReservationStatus::Completed.is_active());
        assert!(!ReservationStatus::Cancelled.is_active());
    }

    #[test]
    fn test_request_wire_shape() {
        let body = serde_json::json!({
            "customerName": "Ravi",
            "customerPhone": "5559876",
            "reservationDate": "2025-06-01",
            "timeSlot": "18:00-19:00",
            "selectedTables": [1, 2]
        });
        let req: CreateReservationRequest = serde_json::from_value(body).unwrap();
        assert_eq!(req.selected_tables, vec![1, 2]);
        assert!(!req.has_food);
        assert_eq!(req.grand_total, 0.0);
    }
}
