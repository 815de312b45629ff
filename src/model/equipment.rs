use super::ids::{CustomerId, EquipmentId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EquipmentStatus {
    Operational,
    Maintenance,
    OutOfService,
}

impl Display for EquipmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            EquipmentStatus::Operational => "operational",
            EquipmentStatus::Maintenance => "maintenance",
            EquipmentStatus::OutOfService => "out of service",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DriveType {
    Geared,
    Gearless,
    Hydraulic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalSpecs {
    pub stops: u32,
    pub capacity_kg: u32,
    pub capacity_persons: u32,
    #[serde(default)]
    pub speed: Option<f64>,
    pub drive_type: DriveType,
    #[serde(default)]
    pub control_panel: Option<String>,
}

/// An elevator unit installed at a customer site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub id: EquipmentId,
    pub customer_id: CustomerId,
    pub name: String,
    #[serde(default)]
    pub position: Option<String>,
    pub brand: String,
    pub model: String,
    #[serde(default)]
    pub serial_number: String,
    #[serde(default)]
    pub manufacture_year: Option<u16>,
    pub technical_specs: TechnicalSpecs,
    pub status: EquipmentStatus,
    #[serde(default)]
    pub last_preventive_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub next_preventive_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentCreate {
    pub customer_id: Option<CustomerId>,
    pub name: String,
    pub position: Option<String>,
    pub brand: String,
    pub model: String,
    pub serial_number: String,
    pub manufacture_year: Option<u16>,
    pub technical_specs: TechnicalSpecs,
    pub status: EquipmentStatus,
}

/// Field edits. Status changes go through [`crate::equipment_actor::EquipmentAction::SetStatus`].
#[derive(Debug, Clone, Default)]
pub struct EquipmentUpdate {
    pub name: Option<String>,
    pub position: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub technical_specs: Option<TechnicalSpecs>,
    pub last_preventive_date: Option<DateTime<Utc>>,
    pub next_preventive_date: Option<DateTime<Utc>>,
}
