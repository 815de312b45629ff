//! # Elevator Maintenance Console
//!
//! Back-office core for an elevator maintenance company: customer sites, their elevator
//! units, the field technicians, the spare-parts stock and the service orders that tie them
//! together.
//!
//! ## Layers
//!
//! - **Stores** ([`customer_actor`], [`equipment_actor`], [`technician_actor`],
//!   [`stock_actor`], [`order_actor`]): one actor per entity type, built on the generic
//!   `ResourceActor` of the `actor_framework` crate. Each mirrors a REST collection and only
//!   changes its list once the server has confirmed a write.
//! - **Clients** ([`clients`]): typed handles to the stores, with per-store error types.
//! - **Remote** ([`api`]): the REST implementation of `RemoteSource`.
//! - **Read models** ([`analytics`], [`directory`]): pure functions over store snapshots for
//!   the order board, dashboards, customer history and stock summary.
//! - **Geocoding** ([`geocoding`]): cached, rate-limited address lookup for the site map.
//! - **Lifecycle** ([`lifecycle`]): wiring, startup and shutdown of a [`ConsoleSystem`].
//!
//! ## The order workflow
//!
//! ```rust,ignore
//! let system = ConsoleSystem::connect(&load_settings(None)?)?;
//! system.load_all().await?;
//!
//! let order = system.order_client.create_order(draft).await?;   // OS-2024-001, open
//! system.order_client.start_order(order.id.clone()).await?;     // in-progress
//! system.order_client.finalize_order(order.id).await?;          // completed, parts debited
//! ```
//!
//! [`ConsoleSystem`]: lifecycle::ConsoleSystem

pub mod analytics;
pub mod api;
pub mod clients;
pub mod config;
pub mod customer_actor;
pub mod directory;
pub mod equipment_actor;
pub mod error;
pub mod geocoding;
pub mod lifecycle;
pub mod model;
pub mod notify;
pub mod order_actor;
pub mod stock_actor;
pub mod technician_actor;
