//! # ActorClient Trait
//!
//! Common interface for resource-specific clients: default store operations built on top of a
//! generic `ResourceClient`, with errors mapped into the resource's own error type.
use crate::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit the standard store operations.
///
/// ```rust,ignore
/// #[async_trait]
/// impl ActorClient<Customer> for CustomerClient {
///     type Error = CustomerError;
///     fn inner(&self) -> &ResourceClient<Customer> { &self.inner }
///     fn map_error(e: FrameworkError) -> CustomerError { ... }
/// }
///
/// // load(), get(), list(), view(), set_search() and delete() come for free.
/// customer_client.load().await?;
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific resource error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Replace the local list from the remote source.
    #[tracing::instrument(skip(self))]
    async fn load(&self) -> Result<usize, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().load().await.map_err(Self::map_error)
    }

    /// Fetch an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    async fn list(&self) -> Result<Vec<T>, Self::Error> {
        self.inner().list().await.map_err(Self::map_error)
    }

    #[tracing::instrument(skip(self))]
    async fn set_search(&self, term: String) -> Result<(), Self::Error> {
        self.inner().set_search(term).await.map_err(Self::map_error)
    }

    /// The search-filtered, sorted view.
    async fn view(&self) -> Result<Vec<T>, Self::Error> {
        self.inner().view().await.map_err(Self::map_error)
    }

    /// Delete an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}
