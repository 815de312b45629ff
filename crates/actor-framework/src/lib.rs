//! # Actor Framework
//!
//! Building blocks for type-safe stores that mirror a remote REST collection. Each resource
//! type gets one actor that owns its local list and processes requests sequentially; clients
//! talk to it by message passing.
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`ActorEntity`]) - validation, merge rules and domain actions
//! 2. **Runtime Layer** ([`ResourceActor`]) - the local list, the write path and change events
//! 3. **Interface Layer** ([`ResourceClient`], [`ActorClient`]) - typed requests
//! 4. **Remote Layer** ([`RemoteSource`]) - the system of record behind every list
//!
//! Domain logic is written once, in the entity; the actor takes care of ordering, remote
//! confirmation and keeping the list untouched when something fails.
//!
//! ## Context Injection Pattern
//!
//! Dependencies are injected when the actor starts, not when it is constructed:
//!
//! ```rust,ignore
//! let (stock_actor, stock_client) = ResourceActor::<StockItem>::new(32, stock_remote);
//! let (order_actor, order_client) = ResourceActor::<ServiceOrder>::new(32, order_remote);
//!
//! tokio::spawn(stock_actor.run(()));
//! // The order actor debits stock when an order completes.
//! tokio::spawn(order_actor.run(OrderContext::new(StockClient::new(stock_client), "admin")));
//! ```
//!
//! As long as the dependency graph is acyclic, dropping the outer clients shuts every actor
//! down in turn.
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers requests from an expectation queue and
//! [`memory::InMemoryRemote`] replaces the HTTP layer. See the [`mock`] module for the four
//! testing patterns.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod memory;
pub mod message;
pub mod mock;
pub mod remote;

// Re-export core types for convenience
pub use actor::{Reporter, ResourceActor};
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::{FrameworkError, RemoteError};
pub use memory::InMemoryRemote;
pub use message::{Filter, ResourceRequest, Response, StoreEvent};
pub use remote::{RemoteSource, SharedRemote};
