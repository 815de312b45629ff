//! # Stock Actor
//!
//! Owns the spare-parts inventory. Besides CRUD it exposes two actions:
//!
//! ```rust,ignore
//! // Read-only, never hits the remote
//! let level = stock_client.check_stock(item_id.clone()).await?;
//!
//! // Persisted; the quantity never drops below zero
//! let (before, after) = stock_client.debit(item_id, 2).await?;
//! ```
//!
//! Debits are issued by the order actor when an order completes.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::StockClient;
use crate::model::StockItem;
use actor_framework::{ResourceActor, SharedRemote};

/// Creates a new Stock actor and its client.
pub fn new(
    buffer_size: usize,
    remote: SharedRemote<StockItem>,
) -> (ResourceActor<StockItem>, StockClient) {
    let (actor, client) = ResourceActor::new(buffer_size, remote);
    (actor, StockClient::new(client))
}
