//! Metadata table enum as the single source of truth for table names.

use serde::Serialize;
use std::fmt;

/// The four metadata tables an event can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Tile,
    Item,
    Event,
    Check,
}

impl Table {
    /// All tables, in classification priority order.
    pub const ALL: [Self; 4] = [Self::Tile, Self::Item, Self::Event, Self::Check];

    /// Canonical table name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tile => "tile",
            Self::Item => "item",
            Self::Event => "event",
            Self::Check => "check",
        }
    }

    /// File name the table is stored under in a metadata directory.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Tile => "tiles.json",
            Self::Item => "items.json",
            Self::Event => "events.json",
            Self::Check => "checks.json",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Table {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}
