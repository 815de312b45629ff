//! Domain records as the remote API sends them, plus the draft and patch payloads each
//! store accepts. Entity behaviour lives in the `*_actor` modules.

pub mod customer;
pub mod equipment;
pub mod ids;
pub mod order;
pub mod stock;
pub mod technician;
pub mod validation;

pub use customer::*;
pub use equipment::*;
pub use ids::*;
pub use order::*;
pub use stock::*;
pub use technician::*;
