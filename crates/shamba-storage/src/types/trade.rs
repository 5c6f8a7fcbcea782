//! Trade types: suppliers, customers, harvests and sales.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CustomerId, HarvestId, JournalEntryId, PlotId, SaleId, SeasonId, SupplierId};

/// Input supplier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: SupplierId,
    pub name: String,
    pub contact: String,
    pub phone: String,
    pub notes: String,
}

/// Produce buyer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub contact: String,
    pub phone: String,
    pub notes: String,
}

/// Harvested produce lot. `quantity_remaining` decreases as sales draw it
/// down; it starts equal to `quantity`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Harvest {
    pub id: HarvestId,
    pub plot_id: PlotId,
    pub season_id: SeasonId,
    pub crop: String,
    pub quantity: f64,
    pub unit: String,
    pub date: NaiveDate,
    pub quantity_remaining: f64,
}

/// A sale of harvested produce. When the sale is posted to the ledger the
/// generated entry's id is kept here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: SaleId,
    pub customer_id: CustomerId,
    pub harvest_id: HarvestId,
    pub quantity: f64,
    pub unit_price: Decimal,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub journal_entry_id: Option<JournalEntryId>,
}

impl Sale {
    /// Total sale value.
    pub fn total(&self) -> Decimal {
        self.unit_price * Decimal::try_from(self.quantity).unwrap_or_default()
    }
}
