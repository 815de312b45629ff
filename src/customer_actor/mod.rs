//! # Customer Actor
//!
//! Owns the list of customer sites. Plain CRUD with form validation; the only cross-store
//! concern is that geocoded coordinates are written back through [`CustomerUpdate`].
//!
//! [`CustomerUpdate`]: crate::model::CustomerUpdate

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::CustomerClient;
use crate::model::Customer;
use actor_framework::{ResourceActor, SharedRemote};

/// Creates a new Customer actor and its client.
pub fn new(
    buffer_size: usize,
    remote: SharedRemote<Customer>,
) -> (ResourceActor<Customer>, CustomerClient) {
    let (actor, client) = ResourceActor::new(buffer_size, remote);
    (actor, CustomerClient::new(client))
}
