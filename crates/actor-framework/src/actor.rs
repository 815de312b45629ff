//! # Generic Actor Server
//!
//! This module defines the `ResourceActor`, which owns the local list for one entity type and
//! keeps it synchronized with a remote source. Messages are processed sequentially, so the
//! list needs no locking.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{ResourceRequest, StoreEvent};
use crate::remote::SharedRemote;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info, warn};

const EVENT_CAPACITY: usize = 64;

/// Receives user-facing outcomes of writes (e.g. a toast service).
pub trait Reporter: Send + Sync {
    fn success(&self, message: String);
    fn failure(&self, error: &FrameworkError);
}

/// The generic actor that manages a remotely-backed collection of entities.
///
/// ## Write policy
///
/// Writes are **confirmation-first**: the entity hooks run on a candidate copy, the candidate
/// is sent to the remote, and only the server's answer is stored. If a hook rejects the change
/// or the remote call fails, the local list is left exactly as it was and the error is
/// returned (and reported, when a [`Reporter`] is attached).
///
/// ## Operations
///
/// * **Load**: `remote.list()` replaces the whole list. A failed load keeps the previous list.
/// * **Create**: `prepare_create` validates and stamps the draft, `remote.create` persists it,
///   the returned entity is inserted.
/// * **Get / Query / View**: clones out of the store, sorted by `ActorEntity::compare`.
///   `View` filters by the current search term.
/// * **Update**: `on_update` merges into a clone, `remote.update` persists, the answer replaces the entry.
/// * **Delete**: `on_delete`, then `remote.delete`, then removal.
/// * **Action**: `handle_action` on a clone; mutating actions are persisted before the result
///   is stored, then `on_committed` runs its side effects.
///
/// ```rust,ignore
/// let (actor, client) = ResourceActor::<Customer>::new(32, remote);
/// tokio::spawn(actor.run(()));
/// client.load().await?;
/// ```
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    remote: SharedRemote<T>,
    events: broadcast::Sender<StoreEvent<T::Id>>,
    reporter: Option<Arc<dyn Reporter>>,
    search: String,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` backed by `remote`, and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the capacity of the request channel; callers wait when it is full.
    /// A size of zero is raised to one.
    pub fn new(buffer_size: usize, remote: SharedRemote<T>) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size.max(1));
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            remote,
            events: events.clone(),
            reporter: None,
            search: String::new(),
        };
        let client = ResourceClient::new(sender, events);
        (actor, client)
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    /// Runs the actor's event loop, processing messages until every client is dropped.
    ///
    /// # Context Injection
    /// `context` is handed to every entity hook, so dependencies created after the actor
    /// (other clients) can still be wired in.
    pub async fn run(mut self, context: T::Context) {
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Load { respond_to } => {
                    let result = self.load(entity_type).await;
                    self.report_failure(&result);
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let result = self.create(params, &context, entity_type).await;
                    self.report(&result, || format!("{entity_type} created"));
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Query { filter, respond_to } => {
                    let items = self.sorted(|item| filter(item));
                    debug!(entity_type, matched = items.len(), "Query");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Search { term, respond_to } => {
                    debug!(entity_type, %term, "Search");
                    self.search = term.trim().to_lowercase();
                    let _ = respond_to.send(Ok(()));
                }
                ResourceRequest::View { respond_to } => {
                    let term = self.search.clone();
                    let items = self.sorted(|item| term.is_empty() || item.matches(&term));
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let result = self.update(id, update, &context, entity_type).await;
                    self.report(&result, || format!("{entity_type} updated"));
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let result = self.delete(id, &context, entity_type).await;
                    self.report(&result, || format!("{entity_type} removed"));
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    // Read-only actions stay quiet unless they fail.
                    let mutation = T::is_mutation(&action);
                    let result = self.action(id, action, &context, entity_type).await;
                    if mutation {
                        self.report(&result, || format!("{entity_type} updated"));
                    } else {
                        self.report_failure(&result);
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    async fn load(&mut self, entity_type: &str) -> Result<usize, FrameworkError> {
        let items = self.remote.list().await.map_err(|e| {
            warn!(entity_type, error = %e, "Load failed, keeping previous list");
            FrameworkError::from(e)
        })?;
        self.store = items
            .into_iter()
            .map(|item| (item.id().clone(), item))
            .collect();
        let count = self.store.len();
        info!(entity_type, count, "Loaded");
        self.publish(StoreEvent::Loaded { count });
        Ok(count)
    }

    async fn create(
        &mut self,
        params: T::Create,
        context: &T::Context,
        entity_type: &str,
    ) -> Result<T, FrameworkError> {
        let prepared = {
            let existing: Vec<&T> = self.store.values().collect();
            T::prepare_create(params, &existing, context)
        };
        let params = prepared.map_err(|e| {
            warn!(entity_type, error = %e, "Create rejected");
            FrameworkError::entity(e)
        })?;
        let item = self.remote.create(&params).await.map_err(|e| {
            warn!(entity_type, error = %e, "Remote create failed");
            FrameworkError::from(e)
        })?;
        let id = item.id().clone();
        self.store.insert(id.clone(), item.clone());
        info!(entity_type, %id, size = self.store.len(), "Created");
        self.publish(StoreEvent::Created(id));
        Ok(item)
    }

    async fn update(
        &mut self,
        id: T::Id,
        update: T::Update,
        context: &T::Context,
        entity_type: &str,
    ) -> Result<T, FrameworkError> {
        let mut candidate = self.find(&id, entity_type)?.clone();
        if let Err(e) = candidate.on_update(update, context).await {
            warn!(entity_type, %id, error = %e, "Update rejected");
            return Err(FrameworkError::entity(e));
        }
        let saved = self.persist(&id, &candidate, entity_type).await?;
        info!(entity_type, %id, "Updated");
        self.publish(StoreEvent::Updated(id));
        Ok(saved)
    }

    async fn delete(
        &mut self,
        id: T::Id,
        context: &T::Context,
        entity_type: &str,
    ) -> Result<(), FrameworkError> {
        let item = self.find(&id, entity_type)?;
        if let Err(e) = item.on_delete(context).await {
            warn!(entity_type, %id, error = %e, "on_delete failed");
            return Err(FrameworkError::entity(e));
        }
        self.remote.delete(&id).await.map_err(|e| {
            warn!(entity_type, %id, error = %e, "Remote delete failed");
            FrameworkError::from(e)
        })?;
        self.store.remove(&id);
        info!(entity_type, %id, size = self.store.len(), "Deleted");
        self.publish(StoreEvent::Removed(id));
        Ok(())
    }

    async fn action(
        &mut self,
        id: T::Id,
        action: T::Action,
        context: &T::Context,
        entity_type: &str,
    ) -> Result<T::ActionResult, FrameworkError> {
        let mutation = T::is_mutation(&action);
        let mut candidate = self.find(&id, entity_type)?.clone();
        let result = match candidate.handle_action(action, context).await {
            Ok(result) => result,
            Err(e) => {
                warn!(entity_type, %id, error = %e, "Action failed");
                return Err(FrameworkError::entity(e));
            }
        };
        if !mutation {
            return Ok(result);
        }

        let saved = self.persist(&id, &candidate, entity_type).await?;
        info!(entity_type, %id, "Action ok");
        self.publish(StoreEvent::Updated(id.clone()));

        if let Err(e) = saved.on_committed(&result, context).await {
            warn!(entity_type, %id, error = %e, "Post-commit effects failed");
            return Err(FrameworkError::entity(e));
        }
        Ok(result)
    }

    /// Sends the candidate to the remote and stores the server's answer.
    async fn persist(
        &mut self,
        id: &T::Id,
        candidate: &T,
        entity_type: &str,
    ) -> Result<T, FrameworkError> {
        let saved = self.remote.update(id, candidate).await.map_err(|e| {
            warn!(entity_type, %id, error = %e, "Remote update failed, local state kept");
            FrameworkError::from(e)
        })?;
        self.store.insert(id.clone(), saved.clone());
        Ok(saved)
    }

    fn find(&self, id: &T::Id, entity_type: &str) -> Result<&T, FrameworkError> {
        self.store.get(id).ok_or_else(|| {
            warn!(entity_type, %id, "Not found");
            FrameworkError::NotFound(id.to_string())
        })
    }

    fn sorted(&self, keep: impl Fn(&T) -> bool) -> Vec<T> {
        let mut items: Vec<T> = self
            .store
            .values()
            .filter(|item| keep(*item))
            .cloned()
            .collect();
        items.sort_by(|a, b| a.compare(b));
        items
    }

    fn publish(&self, event: StoreEvent<T::Id>) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }

    fn report<R>(&self, result: &Result<R, FrameworkError>, success: impl FnOnce() -> String) {
        if let Some(reporter) = &self.reporter {
            match result {
                Ok(_) => reporter.success(success()),
                Err(e) => reporter.failure(e),
            }
        }
    }

    fn report_failure<R>(&self, result: &Result<R, FrameworkError>) {
        if let (Some(reporter), Err(e)) = (&self.reporter, result) {
            reporter.failure(e);
        }
    }
}
