//! Custom actions for the Equipment actor.

use crate::model::EquipmentStatus;

#[derive(Debug, Clone)]
pub enum EquipmentAction {
    /// Move the unit to another operational status.
    ///
    /// Refused with [`EquipmentError::ActiveOrders`](super::EquipmentError::ActiveOrders)
    /// while any non-terminal order references the unit.
    SetStatus(EquipmentStatus),
}

#[derive(Debug, Clone, PartialEq)]
pub enum EquipmentActionResult {
    StatusChanged {
        from: EquipmentStatus,
        to: EquipmentStatus,
    },
    /// The unit already had the requested status.
    Unchanged,
}
