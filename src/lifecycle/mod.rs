//! # Console Lifecycle
//!
//! Builds the running console: creates one actor per store, injects the cross-store
//! dependencies at `run` time and shuts everything down when the work is done.
//!
//! ```rust,ignore
//! let settings = load_settings(None)?;
//! let system = ConsoleSystem::connect(&settings)?;
//! system.load_all().await?;
//! let orders = system.order_client.list().await?;
//! system.shutdown().await?;
//! ```
//!
//! Only the order and equipment actors carry context:
//!
//! | actor     | context |
//! |-----------|---------|
//! | orders    | [`OrderContext`](crate::order_actor::OrderContext): stock client and operator |
//! | equipment | [`OrderClient`](crate::clients::OrderClient), for the open-order guard |
//!
//! Tests build the system with [`Remotes`] made of
//! [`InMemoryRemote`](actor_framework::InMemoryRemote)s instead of HTTP.

pub mod console_system;
pub mod tracing;

pub use console_system::*;
pub use tracing::*;
