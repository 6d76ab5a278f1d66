//! 购物车 - 菜品小计与订座上下文合并
//!
//! table-food 流程里结账页把购物车结到订座上：应付总额 =
//! 订座费 + 菜品小计，最终一条订座记录带桌带菜提交。
//! 没有订座上下文时就是普通点餐结账（staff-entered 渠道）。

use shared::intent::{ReservationDraft, keys};
use shared::{CreateOrderRequest, CreateReservationRequest, OrderItem, OrderPriority};

use crate::store::{LocalStore, StoreError};

/// 购物车会话
#[derive(Debug, Default)]
pub struct CartSession {
    items: Vec<OrderItem>,
    reservation: Option<ReservationDraft>,
}

impl CartSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从本地存储装载。暂存的订座上下文（如果有）一并挂上，
    /// 向导里已点的菜预填进购物车。
    pub fn load(store: &LocalStore) -> Result<Self, StoreError> {
        let reservation: Option<ReservationDraft> = store.get(keys::RESERVATION_CONTEXT)?;
        let items = reservation
            .as_ref()
            .map(|r| r.food_items.clone())
            .unwrap_or_default();
        Ok(Self { items, reservation })
    }

    /// 加一道菜，同名同价合并数量
    pub fn add(&mut self, item: OrderItem) {
        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|i| i.name == item.name && i.price == item.price)
        {
            existing.quantity += item.quantity;
            return;
        }
        self.items.push(item);
    }

    /// 改数量，0 即移除
    pub fn set_quantity(&mut self, name: &str, quantity: i32) {
        if quantity <= 0 {
            self.items.retain(|i| i.name != name);
            return;
        }
        if let Some(item) = self.items.iter_mut().find(|i| i.name == name) {
            item.quantity = quantity;
        }
    }

    pub fn remove(&mut self, name: &str) {
        self.items.retain(|i| i.name != name);
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 附带的订座上下文
    pub fn reservation(&self) -> Option<&ReservationDraft> {
        self.reservation.as_ref()
    }

    /// 菜品小计
    pub fn food_subtotal(&self) -> f64 {
        self.items.iter().map(OrderItem::line_total).sum()
    }

    /// 订座费部分，没有上下文时为 0
    pub fn table_total(&self) -> f64 {
        self.reservation
            .as_ref()
            .map(|r| r.table_total)
            .unwrap_or(0.0)
    }

    /// 应付总额 = 订座费 + 菜品小计
    pub fn grand_total(&self) -> f64 {
        self.table_total() + self.food_subtotal()
    }

    /// 有订座上下文时结账走订座创建，一条记录带桌带菜
    pub fn reservation_request(
        &self,
        customer_name: &str,
        customer_phone: &str,
        customer_email: Option<String>,
    ) -> Option<CreateReservationRequest> {
        let reservation = self.reservation.as_ref()?;
        Some(CreateReservationRequest {
            customer_name: customer_name.to_string(),
            customer_phone: customer_phone.to_string(),
            customer_email,
            reservation_date: reservation.reservation_date.clone(),
            time_slot: reservation.time_slot.clone(),
            selected_tables: reservation.selected_tables.clone(),
            has_food: !self.items.is_empty(),
            food_items: self.items.clone(),
            food_total: self.food_subtotal(),
            table_total: reservation.table_total,
            grand_total: self.grand_total(),
        })
    }

    /// 普通点餐结账请求 (staff-entered 渠道)
    pub fn order_request(
        &self,
        customer_name: &str,
        customer_phone: &str,
        customer_email: Option<String>,
    ) -> CreateOrderRequest {
        CreateOrderRequest {
            customer_name: customer_name.to_string(),
            customer_phone: customer_phone.to_string(),
            customer_email,
            items: self.items.clone(),
            total_amount: self.food_subtotal(),
            table_number: None,
            delivery_target: None,
            scheduled_for: None,
            fulfilment: None,
            priority: OrderPriority::Normal,
            notes: None,
            customer_id: None,
        }
    }

    /// 结账成功后清掉订座上下文
    pub fn clear_context(store: &mut LocalStore) -> Result<(), StoreError> {
        store.remove(keys::RESERVATION_CONTEXT)
    }
}
