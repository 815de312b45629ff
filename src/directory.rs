//! Display-time name lookups across stores.
//!
//! Orders only carry ids. A [`Directory`] is a snapshot of the customer, equipment and
//! technician lists that resolves those ids to names, falling back to [`NOT_ASSIGNED`] when a
//! reference is empty or no longer exists.

use crate::model::{Customer, CustomerId, Equipment, EquipmentId, Technician, TechnicianId};
use std::collections::HashMap;

pub const NOT_ASSIGNED: &str = "Not assigned";

#[derive(Debug, Default, Clone)]
pub struct Directory {
    customers: HashMap<CustomerId, Customer>,
    equipment: HashMap<EquipmentId, Equipment>,
    technicians: HashMap<TechnicianId, Technician>,
}

impl Directory {
    pub fn new(
        customers: Vec<Customer>,
        equipment: Vec<Equipment>,
        technicians: Vec<Technician>,
    ) -> Self {
        Self {
            customers: customers.into_iter().map(|c| (c.id.clone(), c)).collect(),
            equipment: equipment.into_iter().map(|e| (e.id.clone(), e)).collect(),
            technicians: technicians.into_iter().map(|t| (t.id.clone(), t)).collect(),
        }
    }

    pub fn customer(&self, id: &CustomerId) -> Option<&Customer> {
        self.customers.get(id)
    }

    pub fn customers(&self) -> impl Iterator<Item = &Customer> {
        self.customers.values()
    }

    pub fn customer_name(&self, id: &CustomerId) -> &str {
        self.customers
            .get(id)
            .map_or(NOT_ASSIGNED, |c| c.name.as_str())
    }

    pub fn equipment_name(&self, id: &EquipmentId) -> &str {
        self.equipment
            .get(id)
            .map_or(NOT_ASSIGNED, |e| e.name.as_str())
    }

    pub fn technician_name(&self, id: Option<&TechnicianId>) -> &str {
        id.and_then(|id| self.technicians.get(id))
            .map_or(NOT_ASSIGNED, |t| t.name.as_str())
    }
}
