//! Error types for the Stock actor.

use actor_framework::RemoteError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum StockError {
    #[error("Stock item not found: {0}")]
    NotFound(String),

    #[error("Stock validation error: {0}")]
    Validation(String),

    /// Item codes are unique across the inventory.
    #[error("Stock code already in use: {0}")]
    DuplicateCode(String),

    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

crate::impl_from_framework_error!(StockError);
