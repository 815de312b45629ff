//! Error types for the Customer actor.

use actor_framework::RemoteError;
use thiserror::Error;

/// Errors that can occur during customer operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CustomerError {
    /// The requested customer was not found.
    #[error("Customer not found: {0}")]
    NotFound(String),

    /// The form data failed validation; nothing was sent to the server.
    #[error("Customer validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

crate::impl_from_framework_error!(CustomerError);
