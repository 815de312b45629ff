//! # ActorEntity Trait
//!
//! The `ActorEntity` trait is the contract every remotely-backed resource (Customer, Equipment,
//! Order, ...) implements to be managed by the generic `ResourceActor`. It fixes the associated
//! types for ids, draft and patch payloads, actions, context and errors, and provides the hooks
//! the actor calls around each remote write.
//!
//! # Architecture Note
//! The actor owns the local list; the remote API owns the truth. Every hook here runs on a
//! *candidate copy* of the entity before the write is sent, so a rejected hook or a failed
//! remote call leaves the local list exactly as it was.
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::prepare_create`]
//! - [`ActorEntity::matches`] / [`ActorEntity::compare`]
//! - [`ActorEntity::on_delete`]
//! - [`ActorEntity::is_mutation`] / [`ActorEntity::on_committed`]
//!
//! Defaults accept everything and do nothing.

use async_trait::async_trait;
use std::cmp::Ordering;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource entity must implement to be managed by ResourceActor.
///
/// # Async & Context
/// Hooks are async so they may call other actors. The `Context` type is injected into every
/// hook by `ResourceActor::run`, which lets dependencies be wired after construction.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + Debug + 'static {
    /// Identifier assigned by the remote source.
    /// Must be buildable from a string so in-process remotes can mint ids.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<String>;

    /// Draft payload sent to the remote on create.
    type Create: Clone + Send + Sync + Debug;

    /// Partial changes merged into an existing entity.
    type Update: Send + Sync + Debug;

    /// Resource-specific operations (e.g. `Finalize`, `Debit`).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// One error enum for the whole actor; clients recover it from
    /// [`FrameworkError::EntityError`](crate::FrameworkError::EntityError) by downcast.
    type Error: std::error::Error + Send + Sync + 'static;

    fn id(&self) -> &Self::Id;

    /// Materialize an entity from its draft once an id exists.
    /// Called by in-process remotes standing in for the server.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Validate a draft and stamp locally generated fields before it is sent.
    ///
    /// `existing` is the current local list, for uniqueness checks and sequence numbers.
    /// An error here never reaches the remote.
    fn prepare_create(
        params: Self::Create,
        _existing: &[&Self],
        _ctx: &Self::Context,
    ) -> Result<Self::Create, Self::Error> {
        Ok(params)
    }

    /// Case-insensitive search predicate for the filtered view. `term` is lower-cased and non-empty.
    fn matches(&self, _term: &str) -> bool {
        true
    }

    /// Natural ordering of the view.
    fn compare(&self, _other: &Self) -> Ordering {
        Ordering::Equal
    }

    // --- Lifecycle Hooks (Async) ---

    /// Merge an update into a candidate copy. Domain rules are checked here.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called before the remote delete is issued.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Whether the action changes the entity and therefore has to be persisted.
    fn is_mutation(_action: &Self::Action) -> bool {
        true
    }

    /// Handle a custom resource-specific action on a candidate copy.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;

    /// Side effects that must only run once the action's result has been persisted.
    async fn on_committed(
        &self,
        _result: &Self::ActionResult,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        Ok(())
    }
}
