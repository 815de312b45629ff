//! Typed clients, one per store. Each wraps a `ResourceClient` and maps framework errors into
//! the store's own error type; the standard operations come from [`ActorClient`].

pub mod customer_client;
pub mod equipment_client;
pub mod order_client;
pub mod stock_client;
pub mod technician_client;

pub use actor_framework::ActorClient;
pub use customer_client::CustomerClient;
pub use equipment_client::EquipmentClient;
pub use order_client::OrderClient;
pub use stock_client::StockClient;
pub use technician_client::TechnicianClient;
