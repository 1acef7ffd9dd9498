//! Core type definitions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unix time in milliseconds, as emitted by the telemetry source.
pub type Millis = i64;

/// Generates a numeric metadata ID newtype with common trait implementations.
macro_rules! define_numeric_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Creates a new ID.
            #[must_use]
            pub const fn new(id: u32) -> Self {
                Self(id)
            }

            /// Returns the raw numeric value.
            #[must_use]
            pub const fn value(self) -> u32 {
                self.0
            }
        }

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for u32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_numeric_id!(
    /// Identifies a record in the tile table (overworld screens, rooms, entrances).
    TileId
);

define_numeric_id!(
    /// Identifies a record in the check table (chests, NPCs, other world locations).
    LocationId
);

define_numeric_id!(
    /// Identifies a record in the item table.
    ItemId
);

define_numeric_id!(
    /// Identifies a record in the generic game event table.
    EventId
);

define_numeric_id!(
    /// Identifies a raw action marker. Never looked up.
    ActionId
);

define_numeric_id!(
    /// Identifies a raw command marker. Never looked up.
    CommandId
);
