//! Custom actions for the Order actor.

use crate::model::{OrderStatus, PartReservation, TechnicianId};

#[derive(Debug, Clone)]
pub enum OrderAction {
    /// `open` to `in-progress`.
    Start,
    /// `open` or `in-progress` to `completed`, then debit the reserved parts.
    Finalize,
    /// Any non-terminal status to `cancelled`. No stock effect.
    Cancel,
    AssignTechnician(TechnicianId),
}

/// Results from OrderActions - variants match 1:1 with OrderAction
#[derive(Debug, Clone, PartialEq)]
pub enum OrderActionResult {
    Started,
    /// The parts that are debited once the completion is confirmed.
    Finalized { parts: Vec<PartReservation> },
    Cancelled { from: OrderStatus },
    Assigned {
        previous: Option<TechnicianId>,
        technician: TechnicianId,
    },
}
