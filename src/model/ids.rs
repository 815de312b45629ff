//! Type-safe identifiers.
//!
//! The API is loose about foreign keys: the same field may hold `"42"`, `42` or an embedded
//! `{ "id": "42", ... }` object. Every id newtype accepts all three on the way in and always
//! serializes back as a plain string, so the rest of the crate only ever sees one shape.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Display;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        paste::paste! {
            $(#[$meta])*
            #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
            #[serde(transparent)]
            pub struct $name(pub String);

            #[derive(Deserialize)]
            #[serde(untagged)]
            enum [<$name Wire>] {
                Text(String),
                Number(u64),
                Embedded { id: Box<[<$name Wire>]> },
            }

            impl [<$name Wire>] {
                fn into_string(self) -> String {
                    match self {
                        Self::Text(id) => id,
                        Self::Number(id) => id.to_string(),
                        Self::Embedded { id } => id.into_string(),
                    }
                }
            }

            impl<'de> Deserialize<'de> for $name {
                fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                    [<$name Wire>]::deserialize(deserializer).map(|wire| Self(wire.into_string()))
                }
            }

            impl $name {
                pub fn as_str(&self) -> &str {
                    &self.0
                }
            }

            impl From<String> for $name {
                fn from(id: String) -> Self {
                    Self(id)
                }
            }

            impl From<&str> for $name {
                fn from(id: &str) -> Self {
                    Self(id.to_string())
                }
            }

            impl Display for $name {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.write_str(&self.0)
                }
            }
        }
    };
}

entity_id!(
    /// Identifier of a customer (condominium).
    CustomerId
);
entity_id!(
    /// Identifier of an elevator unit.
    EquipmentId
);
entity_id!(TechnicianId);
entity_id!(
    /// Identifier of a spare part in the inventory.
    StockItemId
);
entity_id!(OrderId);
