//! # Generic Client
//!
//! This module defines the generic client for communicating with actors.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{Filter, ResourceRequest, Response, StoreEvent};
use tokio::sync::{broadcast, mpsc, oneshot};

/// ## ResourceClient
///
/// A type-safe, async handle to a `ResourceActor<T>`. Requests go over a Tokio mpsc channel and
/// results come back on oneshot channels. Cloning is cheap (two senders).
///
/// * **Async API** – every method resolves to `Result<…, FrameworkError>`.
/// * **Observable** – [`ResourceClient::subscribe`] yields the actor's [`StoreEvent`]s.
pub struct ResourceClient<T: ActorEntity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
    events: broadcast::Sender<StoreEvent<T::Id>>,
}

impl<T: ActorEntity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            events: self.events.clone(),
        }
    }
}

impl<T: ActorEntity> ResourceClient<T> {
    pub fn new(
        sender: mpsc::Sender<ResourceRequest<T>>,
        events: broadcast::Sender<StoreEvent<T::Id>>,
    ) -> Self {
        Self { sender, events }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    /// Replace the local list with the remote one. Returns the number of records loaded.
    pub async fn load(&self) -> Result<usize, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Load { respond_to })
            .await
    }

    pub async fn create(&self, params: T::Create) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    /// Every record, in the entity's natural order.
    pub async fn list(&self) -> Result<Vec<T>, FrameworkError> {
        self.query(|_| true).await
    }

    /// Records matching `filter`, in the entity's natural order.
    pub async fn query(
        &self,
        filter: impl Fn(&T) -> bool + Send + Sync + 'static,
    ) -> Result<Vec<T>, FrameworkError> {
        let filter: Filter<T> = Box::new(filter);
        self.request(|respond_to| ResourceRequest::Query { filter, respond_to })
            .await
    }

    pub async fn set_search(&self, term: impl Into<String>) -> Result<(), FrameworkError> {
        let term = term.into();
        self.request(|respond_to| ResourceRequest::Search { term, respond_to })
            .await
    }

    /// The list filtered by the current search term.
    pub async fn view(&self) -> Result<Vec<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::View { respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Update {
            id,
            update,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to })
            .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Action {
            id,
            action,
            respond_to,
        })
        .await
    }

    /// Observe confirmed changes. Dropping the receiver ends the subscription.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent<T::Id>> {
        self.events.subscribe()
    }
}
