//! # Generic Messages
//!
//! Message types used between `ResourceClient` and `ResourceActor`, plus the change events
//! the actor broadcasts to observers.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Read-only projection over the local list.
pub type Filter<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// Internal message type sent to the actor to request operations.
///
/// # The CRUD Pattern
/// Besides Create/Get/Update/Delete and custom `Action`s, a remotely-backed list needs:
///
/// - **Load**: replace the whole list from the remote source.
/// - **List / Query**: snapshots of the list, optionally filtered.
/// - **Search / View**: the search term and the derived, sorted view it drives.
pub enum ResourceRequest<T: ActorEntity> {
    Load {
        respond_to: Response<usize>,
    },
    Create {
        params: T::Create,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Query {
        filter: Filter<T>,
        respond_to: Response<Vec<T>>,
    },
    Search {
        term: String,
        respond_to: Response<()>,
    },
    View {
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}

/// Published after every confirmed change to the local list.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent<Id> {
    Loaded { count: usize },
    Created(Id),
    Updated(Id),
    Removed(Id),
}
