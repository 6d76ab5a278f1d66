//! 订单生命周期
//!
//! 三个下单渠道共用一套生命周期管理：
//!
//! | 渠道 | 初始状态 | 状态约束 |
//! |------|---------|---------|
//! | dine-in-qr / staff-entered | pending | 不设流转表，面板按顺序推进 |
//! | scheduled | confirmed | 只接受 confirmed → completed，终态不可再动 |
//!
//! 金额完全信任调用方，服务端不重算（价格争议走人工）。
//! 每次成功写库都会向相关房间推送，推送失败不影响请求结果。

use tracing::info;

use shared::{
    CookingStatus, CreateOrderRequest, FulfilmentType, OrderChannel, OrderStatus,
    OrderStatusChanged, UpdateOrderStatusRequest, events,
};

use crate::auth::CurrentUser;
use crate::db::models::Order;
use crate::db::repository::{OrderRepository, SequenceRepository};
use crate::notify::Notifier;
use crate::realtime::RelayService;
use crate::utils::time::now_millis;
use crate::utils::validation::{MAX_ADDRESS_LEN, validate_required_text};
use crate::utils::{AppError, AppResult};

/// 预订单状态机检查：目标必须是 completed，当前必须还没走到终态。
/// 厨房流水线状态对预订单没有意义，带了就报错。
fn validate_scheduled_update(
    current: OrderStatus,
    target: Option<OrderStatus>,
    cooking: Option<CookingStatus>,
) -> Result<(), AppError> {
    if cooking.is_some() {
        return Err(AppError::validation(
            "Cooking status does not apply to scheduled orders",
        ));
    }
    match target {
        Some(OrderStatus::Completed) => {
            if current.is_terminal() {
                return Err(AppError::business_rule(format!(
                    "Order is already {}",
                    status_label(current)
                )));
            }
            Ok(())
        }
        _ => Err(AppError::validation(
            "Scheduled orders can only be marked completed",
        )),
    }
}

fn status_label(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Pending => "pending",
        OrderStatus::Accepted => "accepted",
        OrderStatus::Ready => "ready",
        OrderStatus::Delivered => "delivered",
        OrderStatus::Cancelled => "cancelled",
        OrderStatus::Confirmed => "confirmed",
        OrderStatus::Completed => "completed",
    }
}

#[derive(Clone)]
pub struct OrderLifecycle {
    orders: OrderRepository,
    sequences: SequenceRepository,
    relay: RelayService,
    notifier: Notifier,
}

impl OrderLifecycle {
    pub fn new(
        orders: OrderRepository,
        sequences: SequenceRepository,
        relay: RelayService,
        notifier: Notifier,
    ) -> Self {
        Self {
            orders,
            sequences,
            relay,
            notifier,
        }
    }

    /// 新订单：取渠道编号、落库、推送厨房。
    /// 登录顾客下的单再给个人房间发一份确认。
    pub async fn create(&self, channel: OrderChannel, req: CreateOrderRequest) -> AppResult<Order> {
        match channel {
            OrderChannel::DineInQr if req.table_number.is_none() => {
                return Err(AppError::validation("Table number is required for QR orders"));
            }
            OrderChannel::Scheduled => {
                if req.scheduled_for.is_none() {
                    return Err(AppError::validation(
                        "Scheduled time is required for pre-orders",
                    ));
                }
                if req.fulfilment == Some(FulfilmentType::Delivery) {
                    match &req.delivery_target {
                        Some(address) => {
                            validate_required_text(address, "deliveryAddress", MAX_ADDRESS_LEN)?
                        }
                        None => {
                            return Err(AppError::validation(
                                "Delivery address is required for delivery pre-orders",
                            ));
                        }
                    }
                }
            }
            _ => {}
        }

        let code = self.sequences.next_order_code(channel).await?;
        let now = now_millis();
        let order = Order::from_request(req, channel, code, now);
        let created = self.orders.create(order).await?;

        info!(
            target: "orders",
            "Created {} order {} ({} items, total {})",
            status_label(created.status),
            created.code,
            created.items.len(),
            created.total_amount
        );

        self.relay
            .emit_kitchen(events::new_order_event(channel), &created)
            .await;
        if let Some(customer_id) = &created.customer_id {
            self.relay
                .emit_user(customer_id, events::ORDER_PLACED, &created)
                .await;
        }

        Ok(created)
    }

    /// 状态流转。QR / 前台渠道不设流转表；预订单只认 completed。
    /// 状态进入 accepted 时盖上操作员的名字作为接单厨师。
    pub async fn update_status(
        &self,
        id_or_code: &str,
        req: UpdateOrderStatusRequest,
        actor: &CurrentUser,
    ) -> AppResult<Order> {
        if req.status.is_none() && req.cooking_status.is_none() {
            return Err(AppError::validation("Nothing to update"));
        }

        let existing = self.resolve(id_or_code).await?;
        let id = existing
            .id_string()
            .ok_or_else(|| AppError::internal("Order record has no id"))?;

        let assigned_chef = match existing.channel {
            OrderChannel::Scheduled => {
                validate_scheduled_update(existing.status, req.status, req.cooking_status)?;
                None
            }
            OrderChannel::DineInQr | OrderChannel::Staff => {
                if req.status == Some(OrderStatus::Accepted) {
                    Some(actor.display_name.clone())
                } else {
                    None
                }
            }
        };

        let now = now_millis();
        let updated = self
            .orders
            .update_status(&id, req.status, req.cooking_status, assigned_chef, now)
            .await?;

        info!(
            target: "orders",
            "Order {} -> {} by {}",
            updated.code,
            status_label(updated.status),
            actor.username
        );

        self.push_update(&updated, now).await;

        if updated.channel == OrderChannel::Scheduled
            && updated.status == OrderStatus::Completed
            && let Some(email) = &updated.customer_email
        {
            self.notifier
                .feedback_request(&updated.code, email, &updated.customer_name);
        }

        Ok(updated)
    }

    /// 取消预订单，终态不能取消
    pub async fn cancel(&self, id_or_code: &str) -> AppResult<Order> {
        let existing = self.resolve(id_or_code).await?;
        if existing.channel != OrderChannel::Scheduled {
            return Err(AppError::validation(
                "Only scheduled orders use the cancel endpoint",
            ));
        }
        if existing.status.is_terminal() {
            return Err(AppError::business_rule(format!(
                "Order is already {}",
                status_label(existing.status)
            )));
        }
        let id = existing
            .id_string()
            .ok_or_else(|| AppError::internal("Order record has no id"))?;

        let now = now_millis();
        let updated = self
            .orders
            .update_status(&id, Some(OrderStatus::Cancelled), None, None, now)
            .await?;

        info!(target: "orders", "Order {} cancelled", updated.code);

        self.push_update(&updated, now).await;
        self.notifier.cancellation(
            &updated.code,
            updated.customer_email.as_deref(),
            &updated.customer_name,
        );

        Ok(updated)
    }

    /// 顾客追踪：按订单编号查，不挑渠道
    pub async fn track(&self, code: &str) -> AppResult<Order> {
        self.orders
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order {} not found", code)))
    }

    pub async fn list(
        &self,
        channel: OrderChannel,
        status: Option<OrderStatus>,
    ) -> AppResult<Vec<Order>> {
        Ok(self.orders.find_by_channel(channel, status).await?)
    }

    pub async fn remove(&self, id: &str) -> AppResult<()> {
        self.orders.delete(id).await?;
        Ok(())
    }

    /// 全量订单推给厨房和追踪房间，紧凑事件全局广播
    async fn push_update(&self, order: &Order, now: i64) {
        let event = events::order_updated_event(order.channel);
        self.relay.emit_kitchen(event, order).await;
        self.relay.emit_order(&order.code, event, order).await;

        let compact = OrderStatusChanged {
            order_id: order.code.clone(),
            status: order.status,
            cooking_status: order.cooking_status,
            timestamp: now,
        };
        self.relay
            .broadcast(events::status_changed_event(order.channel), &compact)
            .await;
    }

    /// "table:id" 走主键查，其余当订单编号查
    async fn resolve(&self, id_or_code: &str) -> AppResult<Order> {
        let found = if id_or_code.contains(':') {
            self.orders.find_by_id(id_or_code).await?
        } else {
            self.orders.find_by_code(id_or_code).await?
        };
        found.ok_or_else(|| AppError::not_found(format!("Order {} not found", id_or_code)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheduled_guard_accepts_only_completion() {
        assert!(
            validate_scheduled_update(OrderStatus::Confirmed, Some(OrderStatus::Completed), None)
                .is_ok()
        );
        // 其它目标状态一律拒绝
        for target in [
            OrderStatus::Pending,
            OrderStatus::Accepted,
            OrderStatus::Ready,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
            OrderStatus::Confirmed,
        ] {
            assert!(
                validate_scheduled_update(OrderStatus::Confirmed, Some(target), None).is_err()
            );
        }
        assert!(validate_scheduled_update(OrderStatus::Confirmed, None, None).is_err());
    }

    #[test]
    fn scheduled_guard_rejects_terminal_current() {
        for current in [OrderStatus::Completed, OrderStatus::Cancelled] {
            assert!(
                validate_scheduled_update(current, Some(OrderStatus::Completed), None).is_err()
            );
        }
    }

    #[test]
    fn scheduled_guard_rejects_cooking_status() {
        assert!(
            validate_scheduled_update(
                OrderStatus::Confirmed,
                Some(OrderStatus::Completed),
                Some(CookingStatus::Preparing)
            )
            .is_err()
        );
    }
}
