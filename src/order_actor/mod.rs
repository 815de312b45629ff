//! # Order Actor
//!
//! Owns the service orders and enforces the status machine:
//!
//! ```text
//! open ──► in-progress ──► completed
//!  │  └────────────────────► completed
//!  └──────────┴────────────► cancelled   (pending-parts ──► cancelled)
//! ```
//!
//! Every transition is applied to a candidate copy, persisted, and only then stored. Finalize
//! debits the reserved parts through the [`StockClient`] after the completed status has been
//! confirmed by the server, so a second finalize is refused with
//! [`OrderError::AlreadyFinalized`] instead of debiting twice.
//!
//! ## Context
//!
//! ```rust,ignore
//! let (order_actor, order_client) = order_actor::new(32, remote);
//! tokio::spawn(order_actor.run(OrderContext::new(stock_client.clone(), "admin")));
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::{OrderClient, StockClient};
use crate::model::ServiceOrder;
use actor_framework::{ResourceActor, SharedRemote};

/// Dependencies of the order actor, injected at `run` time.
#[derive(Clone)]
pub struct OrderContext {
    pub stock: StockClient,
    /// Stamped into `updatedBy` on every change.
    pub operator: String,
}

impl OrderContext {
    pub fn new(stock: StockClient, operator: impl Into<String>) -> Self {
        Self {
            stock,
            operator: operator.into(),
        }
    }
}

/// Creates a new Order actor and its client.
pub fn new(
    buffer_size: usize,
    remote: SharedRemote<ServiceOrder>,
) -> (ResourceActor<ServiceOrder>, OrderClient) {
    let (actor, client) = ResourceActor::new(buffer_size, remote);
    (actor, OrderClient::new(client))
}
