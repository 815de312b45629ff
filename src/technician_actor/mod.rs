//! # Technician Actor
//!
//! Owns the field team. No dependencies, no custom actions.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::TechnicianClient;
use crate::model::Technician;
use actor_framework::{ResourceActor, SharedRemote};

/// Creates a new Technician actor and its client.
pub fn new(
    buffer_size: usize,
    remote: SharedRemote<Technician>,
) -> (ResourceActor<Technician>, TechnicianClient) {
    let (actor, client) = ResourceActor::new(buffer_size, remote);
    (actor, TechnicianClient::new(client))
}
