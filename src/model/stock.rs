use super::ids::StockItemId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A spare part or consumable tracked by quantity.
///
/// `current_quantity` is unsigned, so it can never go negative; debits clamp at zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockItem {
    pub id: StockItemId,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub category: String,
    pub current_quantity: u32,
    pub min_quantity: u32,
    pub unit: String,
    pub cost_price: f64,
    #[serde(default)]
    pub supplier: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl StockItem {
    /// At or below the configured minimum.
    pub fn is_critical(&self) -> bool {
        self.current_quantity <= self.min_quantity
    }

    pub fn stock_value(&self) -> f64 {
        f64::from(self.current_quantity) * self.cost_price
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockItemCreate {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub current_quantity: u32,
    pub min_quantity: u32,
    pub unit: String,
    pub cost_price: f64,
    pub supplier: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct StockItemUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub current_quantity: Option<u32>,
    pub min_quantity: Option<u32>,
    pub unit: Option<String>,
    pub cost_price: Option<f64>,
    pub supplier: Option<String>,
    pub location: Option<String>,
}
