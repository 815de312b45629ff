//! # Equipment Actor
//!
//! Owns the list of elevator units. Field edits are plain merges; status changes are an
//! action guarded by the order store: a unit cannot change status while a non-terminal
//! service order references it.
//!
//! ## Context
//!
//! The actor runs with an [`OrderClient`](crate::clients::OrderClient) as its context:
//!
//! ```rust,ignore
//! let (equipment_actor, equipment_client) = equipment_actor::new(32, remote);
//! tokio::spawn(equipment_actor.run(order_client.clone()));
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::EquipmentClient;
use crate::model::Equipment;
use actor_framework::{ResourceActor, SharedRemote};

/// Creates a new Equipment actor and its client.
pub fn new(
    buffer_size: usize,
    remote: SharedRemote<Equipment>,
) -> (ResourceActor<Equipment>, EquipmentClient) {
    let (actor, client) = ResourceActor::new(buffer_size, remote);
    (actor, EquipmentClient::new(client))
}
