//! 桌位预订数据模型

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use shared::{CreateReservationRequest, OrderItem, ReservationStatus};

use super::serde_helpers;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    /// 预订编号，如 RES4830217
    pub code: String,
    pub customer_name: String,
    pub customer_phone: String,
    #[serde(default)]
    pub customer_email: Option<String>,
    /// 预订日期当天 0 点的 epoch 毫秒（餐厅时区）
    pub reservation_date: i64,
    /// 时段字符串，如 "19:00-20:00"，按原样存储、按原样比较
    pub time_slot: String,
    pub selected_tables: Vec<i32>,
    /// 是否随预订提前点餐
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
    pub status: ReservationStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Reservation {
    /// 从预订请求构造，日期已由服务层换算成当天 0 点毫秒
    pub fn from_request(
        req: CreateReservationRequest,
        code: String,
        reservation_date: i64,
        now: i64,
    ) -> Self {
        Self {
            id: None,
            code,
            customer_name: req.customer_name,
            customer_phone: req.customer_phone,
            customer_email: req.customer_email,
            reservation_date,
            time_slot: req.time_slot,
            selected_tables: req.selected_tables,
            has_food: req.has_food,
            food_items: req.food_items,
            food_total: req.food_total,
            table_total: req.table_total,
            grand_total: req.grand_total,
            status: ReservationStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// 生成预订编号：RES + 时间戳后五位 + 三位随机数。
    /// 理论上可能撞号，源系统也不查重，唯一索引兜底。
    pub fn generate_code(now: i64, random: u32) -> String {
        format!("RES{}{:03}", now % 100_000, random % 1000)
    }

    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_embeds_timestamp_and_random_suffix() {
        let code = Reservation::generate_code(1_700_000_048_302, 17);
        assert_eq!(code, "RES48302017");
    }

    #[test]
    fn new_reservation_is_pending() {
        let req: CreateReservationRequest = serde_json::from_value(serde_json::json!({
            "customerName": "Ravi",
            "customerPhone": "9812345678",
            "reservationDate": "2025-06-01",
            "timeSlot": "19:00-20:00",
            "selectedTables": [2, 3]
        }))
        .unwrap();
        let r = Reservation::from_request(req, "RES1".into(), 1_748_716_200_000, 5);
        assert_eq!(r.status, ReservationStatus::Pending);
        assert_eq!(r.selected_tables, vec![2, 3]);
        assert!(!r.has_food);
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["reservationDate"], 1_748_716_200_000_i64);
        assert_eq!(json["timeSlot"], "19:00-20:00");
    }
}
