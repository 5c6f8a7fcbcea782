//! Inventory types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::InventoryItemId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventoryCategory {
    Seeds,
    Fertilizer,
    Pesticide,
    Equipment,
    Other,
}

/// Stocked input or equipment item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: InventoryItemId,
    pub name: String,
    pub category: InventoryCategory,
    pub quantity: f64,
    pub unit: String,
    pub supplier: String,
    pub purchase_date: NaiveDate,
    pub cost_per_unit: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reorder_point: Option<f64>,
}

impl InventoryItem {
    /// Whether stock has fallen to or below the reorder point, if one is set.
    pub fn needs_reorder(&self) -> bool {
        self.reorder_point
            .map(|point| self.quantity <= point)
            .unwrap_or(false)
    }
}
