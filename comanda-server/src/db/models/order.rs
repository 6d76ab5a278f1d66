//! 订单数据模型
//!
//! 三种下单渠道共用一张 `orders` 表，通过 `channel` 字段区分。
//! 字段名与前端约定保持 camelCase。

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use shared::{
    CookingStatus, CreateOrderRequest, FulfilmentType, OrderChannel, OrderItem, OrderPriority,
    OrderStatus,
};

use super::serde_helpers;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    /// 订单编号，如 QR001 / ORD042 / PRE007
    pub code: String,
    pub channel: OrderChannel,
    pub customer_name: String,
    pub customer_phone: String,
    #[serde(default)]
    pub customer_email: Option<String>,
    pub items: Vec<OrderItem>,
    pub total_amount: f64,
    pub status: OrderStatus,
    #[serde(default)]
    pub cooking_status: Option<CookingStatus>,
    #[serde(default)]
    pub priority: OrderPriority,
    /// 扫码点餐的桌号
    #[serde(default)]
    pub table_number: Option<i32>,
    /// 外送地址或自取说明
    #[serde(default)]
    pub delivery_target: Option<String>,
    /// 预订单的取餐/用餐时间（epoch 毫秒）
    #[serde(default)]
    pub scheduled_for: Option<i64>,
    #[serde(default)]
    pub fulfilment: Option<FulfilmentType>,
    /// 接单后指派的厨师
    #[serde(default)]
    pub assigned_chef: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub customer_id: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Order {
    /// 根据下单请求构造新订单，状态按渠道取初始值：
    /// 预订单（scheduled）直接进入 confirmed，其余渠道从 pending 开始。
    /// 厨房流水线状态只对即时渠道有意义，预订单不带。
    pub fn from_request(
        req: CreateOrderRequest,
        channel: OrderChannel,
        code: String,
        now: i64,
    ) -> Self {
        let (status, cooking_status) = match channel {
            OrderChannel::Scheduled => (OrderStatus::Confirmed, None),
            OrderChannel::DineInQr | OrderChannel::Staff => {
                (OrderStatus::Pending, Some(CookingStatus::NotStarted))
            }
        };
        Self {
            id: None,
            code,
            channel,
            customer_name: req.customer_name,
            customer_phone: req.customer_phone,
            customer_email: req.customer_email,
            items: req.items,
            total_amount: req.total_amount,
            status,
            cooking_status,
            priority: req.priority,
            table_number: req.table_number,
            delivery_target: req.delivery_target,
            scheduled_for: req.scheduled_for,
            fulfilment: req.fulfilment,
            assigned_chef: None,
            notes: req.notes,
            customer_id: req.customer_id,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_string())
    }
}
