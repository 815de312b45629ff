//! Error plumbing shared by the actor modules.

use crate::customer_actor::CustomerError;
use crate::equipment_actor::EquipmentError;
use crate::order_actor::OrderError;
use crate::stock_actor::StockError;
use crate::technician_actor::TechnicianError;
use actor_framework::RemoteError;
use thiserror::Error;

/// Implements `From<FrameworkError>` for an actor error enum.
///
/// The enum must have `NotFound(String)`, `Remote(RemoteError)` and
/// `ActorCommunicationError(String)` variants. Errors raised by the entity itself come back
/// unchanged, so domain variants like `InvalidTransition` survive the trip through the actor.
#[macro_export]
macro_rules! impl_from_framework_error {
    ($error:ident) => {
        impl From<actor_framework::FrameworkError> for $error {
            fn from(e: actor_framework::FrameworkError) -> Self {
                match e.into_entity::<$error>() {
                    Ok(own) => own,
                    Err(actor_framework::FrameworkError::NotFound(id)) => $error::NotFound(id),
                    Err(actor_framework::FrameworkError::Remote(remote)) => $error::Remote(remote),
                    Err(other) => $error::ActorCommunicationError(other.to_string()),
                }
            }
        }
    };
}

/// Any failure of a console operation, for callers that work across stores.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConsoleError {
    #[error(transparent)]
    Customer(#[from] CustomerError),
    #[error(transparent)]
    Equipment(#[from] EquipmentError),
    #[error(transparent)]
    Technician(#[from] TechnicianError),
    #[error(transparent)]
    Stock(#[from] StockError),
    #[error(transparent)]
    Order(#[from] OrderError),
}

impl ConsoleError {
    /// The underlying remote failure, if that is what went wrong.
    pub fn remote(&self) -> Option<&RemoteError> {
        match self {
            ConsoleError::Customer(CustomerError::Remote(e))
            | ConsoleError::Equipment(EquipmentError::Remote(e))
            | ConsoleError::Technician(TechnicianError::Remote(e))
            | ConsoleError::Stock(StockError::Remote(e))
            | ConsoleError::Order(OrderError::Remote(e)) => Some(e),
            _ => None,
        }
    }

    /// Short text suitable for a transient notification.
    pub fn user_message(&self) -> String {
        match self.remote() {
            Some(remote) => remote.user_message().to_string(),
            None => self.to_string(),
        }
    }
}
