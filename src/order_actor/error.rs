//! Error types for the Order actor.

use crate::model::OrderStatus;
use actor_framework::RemoteError;
use thiserror::Error;

/// Errors that can occur during service order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// The draft failed validation; nothing was sent to the server.
    #[error("Order validation error: {0}")]
    Validation(String),

    /// The status machine has no edge from `from` to `to`.
    #[error("Cannot move order from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// Finalize was requested again; stock has already been debited once.
    #[error("Order {0} is already completed")]
    AlreadyFinalized(String),

    /// Completed and cancelled orders are read-only.
    #[error("Order is {0} and can no longer be edited")]
    Locked(OrderStatus),

    /// The order was completed but one or more stock debits failed.
    #[error("Order completed, but stock was not debited for: {0}")]
    StockDebit(String),

    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

crate::impl_from_framework_error!(OrderError);
