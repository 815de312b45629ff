use super::ids::TechnicianId;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SPECIALTY: &str = "Mecânica";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Technician {
    pub id: TechnicianId,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default = "default_specialty")]
    pub specialty: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_specialty() -> String {
    DEFAULT_SPECIALTY.to_string()
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicianCreate {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub specialty: String,
    pub is_active: bool,
}

impl TechnicianCreate {
    pub fn new(name: impl Into<String>, email: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            specialty: default_specialty(),
            is_active: true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TechnicianUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub specialty: Option<String>,
    pub is_active: Option<bool>,
}
