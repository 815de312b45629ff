//! Error types for the Technician actor.

use actor_framework::RemoteError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum TechnicianError {
    #[error("Technician not found: {0}")]
    NotFound(String),

    #[error("Technician validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

crate::impl_from_framework_error!(TechnicianError);
