//! # In-Memory Remote
//!
//! An in-process stand-in for the remote API. It mints uuid ids on create, records how many
//! calls of each kind it served and can be told to fail the next call, which makes the
//! confirmation-first write path observable in tests.
//!
//! ```rust,ignore
//! let remote = InMemoryRemote::<Customer>::new().shared();
//! remote.fail_next(RemoteError::Unreachable("refused".into()));
//! let (actor, client) = ResourceActor::new(10, remote.clone());
//! ```

use crate::entity::ActorEntity;
use crate::error::RemoteError;
use crate::remote::RemoteSource;
use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

/// Number of calls served per operation, failed ones included.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CallCounts {
    pub list: usize,
    pub create: usize,
    pub update: usize,
    pub delete: usize,
}

struct MemoryState<T> {
    items: Vec<T>,
    calls: CallCounts,
    fail_next: Option<RemoteError>,
}

pub struct InMemoryRemote<T: ActorEntity> {
    state: Mutex<MemoryState<T>>,
}

impl<T: ActorEntity> Default for InMemoryRemote<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> InMemoryRemote<T> {
    pub fn new() -> Self {
        Self::with_items(Vec::new())
    }

    /// Seeds the remote with records that `list` will return.
    pub fn with_items(items: Vec<T>) -> Self {
        Self {
            state: Mutex::new(MemoryState {
                items,
                calls: CallCounts::default(),
                fail_next: None,
            }),
        }
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// The next call of any kind fails with `error`.
    pub fn fail_next(&self, error: RemoteError) {
        self.lock().fail_next = Some(error);
    }

    pub fn calls(&self) -> CallCounts {
        self.lock().calls
    }

    /// Snapshot of what the remote currently stores.
    pub fn items(&self) -> Vec<T> {
        self.lock().items.clone()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn injected<T>(state: &mut MemoryState<T>) -> Result<(), RemoteError> {
    match state.fail_next.take() {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

fn not_found(id: &impl std::fmt::Display) -> RemoteError {
    RemoteError::Status {
        status: 404,
        message: format!("{id} not found"),
    }
}

#[async_trait]
impl<T: ActorEntity> RemoteSource<T> for InMemoryRemote<T> {
    async fn list(&self) -> Result<Vec<T>, RemoteError> {
        let mut state = self.lock();
        state.calls.list += 1;
        injected(&mut state)?;
        Ok(state.items.clone())
    }

    async fn create(&self, params: &T::Create) -> Result<T, RemoteError> {
        let mut state = self.lock();
        state.calls.create += 1;
        injected(&mut state)?;
        let id = T::Id::from(Uuid::new_v4().to_string());
        let item = T::from_create_params(id, params.clone()).map_err(|e| RemoteError::Status {
            status: 400,
            message: e.to_string(),
        })?;
        state.items.push(item.clone());
        Ok(item)
    }

    async fn update(&self, id: &T::Id, entity: &T) -> Result<T, RemoteError> {
        let mut state = self.lock();
        state.calls.update += 1;
        injected(&mut state)?;
        let slot = state
            .items
            .iter_mut()
            .find(|item| item.id() == id)
            .ok_or_else(|| not_found(id))?;
        *slot = entity.clone();
        Ok(entity.clone())
    }

    async fn delete(&self, id: &T::Id) -> Result<(), RemoteError> {
        let mut state = self.lock();
        state.calls.delete += 1;
        injected(&mut state)?;
        let before = state.items.len();
        state.items.retain(|item| item.id() != id);
        if state.items.len() == before {
            return Err(not_found(id));
        }
        Ok(())
    }
}
