//! Error types for the Equipment actor.

use crate::model::EquipmentStatus;
use actor_framework::RemoteError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum EquipmentError {
    #[error("Equipment not found: {0}")]
    NotFound(String),

    #[error("Equipment validation error: {0}")]
    Validation(String),

    /// Status changes are refused while work is still open against the unit.
    #[error("Cannot set status to {requested}: {open_orders} open order(s) on this equipment")]
    ActiveOrders {
        requested: EquipmentStatus,
        open_orders: usize,
    },

    /// The order store could not be consulted, so the guard could not run.
    #[error("Could not check open service orders: {0}")]
    OrderLookup(String),

    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

crate::impl_from_framework_error!(EquipmentError);
