//! Inventory vocabulary
//!
//! Quantities are integer grams. `status` is never set by callers; it is a
//! pure function of `(quantity, minStock)` recomputed on every write.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Derived stock level
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InventoryStatus {
    Available,
    Low,
    #[serde(rename = "out of stock")]
    OutOfStock,
}

impl InventoryStatus {
    /// Compute the stock level from quantity vs minimum stock.
    ///
    /// `2 * quantity <= min_stock` is the integer form of
    /// `quantity <= minStock * 0.5`, so the half-way boundary itself
    /// counts as low.
    pub fn derive(quantity: i64, min_stock: i64) -> Self {
        if quantity == 0 {
            InventoryStatus::OutOfStock
        } else if 2 * quantity <= min_stock {
            InventoryStatus::Low
        } else {
            InventoryStatus::Available
        }
    }
}

/// Quantity adjustment direction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AdjustAction {
    Add,
    Reduce,
}

/// Create-item request body
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateInventoryRequest {
    #[validate(length(min = 1, max = 200, message = "Item name is required"))]
    pub name: String,
    #[validate(range(min = 0, message = "Quantity must not be negative"))]
    pub quantity: i64,
    #[validate(length(min = 1, max = 20, message = "Unit is required"))]
    pub unit: String,
    #[validate(range(min = 0, message = "Minimum stock must not be negative"))]
    pub min_stock: i64,
}

/// Update request: either absolute fields or a relative adjustment
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInventoryRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_stock: Option<i64>,
    /// Absolute quantity override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    /// Relative adjustment, applied after the absolute fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<AdjustAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_boundaries() {
        // zero always wins
        assert_eq!(InventoryStatus::derive(0, 0), InventoryStatus::OutOfStock);
        assert_eq!(InventoryStatus::derive(0, 2000), InventoryStatus::OutOfStock);
        // exactly half of min stock is low
        assert_eq!(InventoryStatus::derive(1000, 2000), InventoryStatus::Low);
        // one gram above half is available
        assert_eq!(InventoryStatus::derive(1001, 2000), InventoryStatus::Available);
        // odd min stock rounds in favor of low
        assert_eq!(InventoryStatus::derive(500, 1001), InventoryStatus::Low);
        assert_eq!(InventoryStatus::derive(501, 1001), InventoryStatus::Available);
    }

    #[test]
    fn test_wire_strings() {
        assert_eq!(
            serde_json::to_string(&InventoryStatus::OutOfStock).unwrap(),
            "\"out of stock\""
        );
        assert_eq!(
            serde_json::to_string(&InventoryStatus::Low).unwrap(),
            "\"low\""
        );
    }
}
