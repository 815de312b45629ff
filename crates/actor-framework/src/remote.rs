//! # Remote Source
//!
//! The seam between an actor's local list and the system of record. Production code plugs in
//! an HTTP implementation; tests use [`InMemoryRemote`](crate::memory::InMemoryRemote).

use crate::entity::ActorEntity;
use crate::error::RemoteError;
use async_trait::async_trait;
use std::sync::Arc;

/// List/create/update/delete against the remote collection for `T`.
#[async_trait]
pub trait RemoteSource<T: ActorEntity>: Send + Sync {
    async fn list(&self) -> Result<Vec<T>, RemoteError>;

    /// Returns the server's representation of the new entity, id included.
    async fn create(&self, params: &T::Create) -> Result<T, RemoteError>;

    /// Sends the merged entity and returns what the server stored.
    async fn update(&self, id: &T::Id, entity: &T) -> Result<T, RemoteError>;

    async fn delete(&self, id: &T::Id) -> Result<(), RemoteError>;
}

/// Shared handle the actor holds.
pub type SharedRemote<T> = Arc<dyn RemoteSource<T>>;
