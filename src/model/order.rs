use super::ids::{CustomerId, EquipmentId, OrderId, StockItemId, TechnicianId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Status of a service order.
///
/// ```text
/// open ──► in-progress ──► completed
///   │           │
///   └───────────┴────────► cancelled      (pending-parts ──► cancelled)
/// open ───────────────────► completed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Open,
    InProgress,
    PendingParts,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Open,
        OrderStatus::InProgress,
        OrderStatus::PendingParts,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    /// Open or in progress: the statuses a technician is still working on.
    pub fn is_active(self) -> bool {
        matches!(self, OrderStatus::Open | OrderStatus::InProgress)
    }

    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        match (self, next) {
            (OrderStatus::Open, OrderStatus::InProgress) => true,
            (OrderStatus::Open | OrderStatus::InProgress, OrderStatus::Completed) => true,
            (from, OrderStatus::Cancelled) => !from.is_terminal(),
            _ => false,
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // `pad` so board columns can align on it.
        f.pad(match self {
            OrderStatus::Open => "open",
            OrderStatus::InProgress => "in-progress",
            OrderStatus::PendingParts => "pending-parts",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        })
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown order status: {s}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    Preventive,
    Corrective,
    Emergency,
    Installation,
}

/// Parts reserved for an order; debited from stock when the order completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartReservation {
    #[serde(rename = "id")]
    pub part_id: StockItemId,
    pub name: String,
    pub requested_quantity: u32,
}

impl PartReservation {
    pub fn new(part_id: impl Into<StockItemId>, name: impl Into<String>, quantity: u32) -> Self {
        Self {
            part_id: part_id.into(),
            name: name.into(),
            requested_quantity: quantity,
        }
    }
}

/// A work ticket ("O.S.") for one maintenance visit or intervention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceOrder {
    pub id: OrderId,
    #[serde(rename = "osNumber")]
    pub order_number: String,
    pub customer_id: CustomerId,
    pub equipment_id: EquipmentId,
    #[serde(default)]
    pub technician_id: Option<TechnicianId>,
    #[serde(rename = "type")]
    pub kind: OrderType,
    pub status: OrderStatus,
    #[serde(default)]
    pub is_emergency: bool,
    pub description: String,
    #[serde(default)]
    pub parts: Vec<PartReservation>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_signature: Option<String>,
}

impl ServiceOrder {
    /// Corrective work or anything flagged as an emergency.
    pub fn is_failure(&self) -> bool {
        self.kind == OrderType::Corrective || self.is_emergency
    }
}

/// Draft submitted by the order form.
///
/// Required fields are optional here so a half-filled form can be represented and rejected
/// with a precise message. `order_number` and `status` are stamped before submission.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    #[serde(rename = "osNumber", skip_serializing_if = "String::is_empty")]
    pub order_number: String,
    pub customer_id: Option<CustomerId>,
    pub equipment_id: Option<EquipmentId>,
    pub technician_id: Option<TechnicianId>,
    #[serde(rename = "type")]
    pub kind: Option<OrderType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    pub is_emergency: bool,
    pub description: String,
    pub parts: Vec<PartReservation>,
    pub updated_by: String,
}

#[derive(Debug, Clone, Default)]
pub struct OrderUpdate {
    pub equipment_id: Option<EquipmentId>,
    pub kind: Option<OrderType>,
    pub is_emergency: Option<bool>,
    pub description: Option<String>,
    pub parts: Option<Vec<PartReservation>>,
    pub customer_signature: Option<String>,
}

/// `OS-{year}-{NNN}`, one past the highest sequence already used in `year`.
///
/// `None` once the year's sequence is exhausted.
pub fn next_order_number<'a>(
    existing: impl IntoIterator<Item = &'a str>,
    year: i32,
) -> Option<String> {
    let prefix = format!("OS-{year}-");
    let last = existing
        .into_iter()
        .filter_map(|number| number.strip_prefix(&prefix))
        .filter_map(|seq| seq.parse::<u32>().ok())
        .max()
        .unwrap_or(0);
    let next = last.checked_add(1)?;
    Some(format!("{prefix}{next:03}"))
}
