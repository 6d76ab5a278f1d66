//! 库存数据模型

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use shared::{AdjustAction, CreateInventoryRequest, InventoryStatus};

use super::serde_helpers;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    pub name: String,
    pub quantity: i64,
    /// 计量单位，如 kg / litre / pieces
    pub unit: String,
    pub min_stock: i64,
    /// 由数量和最低库存推导，写入时同步更新
    pub status: InventoryStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

impl InventoryItem {
    pub fn from_request(req: CreateInventoryRequest, now: i64) -> Self {
        let status = InventoryStatus::derive(req.quantity, req.min_stock);
        Self {
            id: None,
            name: req.name,
            quantity: req.quantity,
            unit: req.unit,
            min_stock: req.min_stock,
            status,
            created_at: now,
            updated_at: now,
        }
    }

    /// 重新推导状态，任何改动数量或阈值的写路径都要调用
    pub fn refresh_status(&mut self) {
        self.status = InventoryStatus::derive(self.quantity, self.min_stock);
    }

    /// 增减库存，扣减到 0 为止不产生负数
    pub fn apply_adjustment(&mut self, action: AdjustAction, amount: i64) {
        match action {
            AdjustAction::Add => self.quantity += amount,
            AdjustAction::Reduce => self.quantity = (self.quantity - amount).max(0),
        }
        self.refresh_status();
    }

    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(quantity: i64, min_stock: i64) -> InventoryItem {
        InventoryItem::from_request(
            serde_json::from_value(serde_json::json!({
                "name": "Basmati Rice",
                "quantity": quantity,
                "unit": "kg",
                "minStock": min_stock
            }))
            .unwrap(),
            1,
        )
    }

    #[test]
    fn status_derived_on_create() {
        assert_eq!(item(0, 10).status, InventoryStatus::OutOfStock);
        assert_eq!(item(5, 10).status, InventoryStatus::Low);
        assert_eq!(item(6, 10).status, InventoryStatus::Available);
    }

    #[test]
    fn reduce_clamps_at_zero() {
        let mut it = item(3, 10);
        it.apply_adjustment(AdjustAction::Reduce, 8);
        assert_eq!(it.quantity, 0);
        assert_eq!(it.status, InventoryStatus::OutOfStock);
    }

    #[test]
    fn add_recovers_status() {
        let mut it = item(0, 10);
        it.apply_adjustment(AdjustAction::Add, 20);
        assert_eq!(it.quantity, 20);
        assert_eq!(it.status, InventoryStatus::Available);
    }
}
