//! Raw telemetry events and runs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::table::Table;
use crate::types::{ActionId, CommandId, EventId, ItemId, LocationId, Millis, TileId};

/// One telemetry sample emitted by the instrumented game session.
///
/// At most one of `tile_id`, `location_id`, `item_id` and `event_id` is
/// expected to be set. `action_id` and `command_id` are raw markers that are
/// carried through but never classified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RawEvent {
    /// Milliseconds since the Unix epoch. Non-decreasing within a run.
    pub timestamp: Millis,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tile_id: Option<TileId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_id: Option<LocationId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<ItemId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<EventId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_id: Option<ActionId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command_id: Option<CommandId>,
}

/// The metadata reference carried by a [`RawEvent`].
///
/// Each variant holds exactly one id, so an event resolves against exactly
/// one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reference {
    Tile(TileId),
    Item(ItemId),
    Event(EventId),
    Check(LocationId),
}

impl Reference {
    /// The table this reference points into.
    #[must_use]
    pub const fn table(self) -> Table {
        match self {
            Self::Tile(_) => Table::Tile,
            Self::Item(_) => Table::Item,
            Self::Event(_) => Table::Event,
            Self::Check(_) => Table::Check,
        }
    }

    /// The raw numeric id.
    #[must_use]
    pub const fn id(self) -> u32 {
        match self {
            Self::Tile(id) => id.value(),
            Self::Item(id) => id.value(),
            Self::Event(id) => id.value(),
            Self::Check(id) => id.value(),
        }
    }
}

impl RawEvent {
    /// A tile transition at `timestamp`.
    #[must_use]
    pub fn tile(timestamp: Millis, id: u32) -> Self {
        Self {
            timestamp,
            tile_id: Some(TileId::new(id)),
            ..Self::default()
        }
    }

    /// A location check at `timestamp`.
    #[must_use]
    pub fn check(timestamp: Millis, id: u32) -> Self {
        Self {
            timestamp,
            location_id: Some(LocationId::new(id)),
            ..Self::default()
        }
    }

    /// An item pickup at `timestamp`.
    #[must_use]
    pub fn item(timestamp: Millis, id: u32) -> Self {
        Self {
            timestamp,
            item_id: Some(ItemId::new(id)),
            ..Self::default()
        }
    }

    /// A generic game event at `timestamp`.
    #[must_use]
    pub fn event(timestamp: Millis, id: u32) -> Self {
        Self {
            timestamp,
            event_id: Some(EventId::new(id)),
            ..Self::default()
        }
    }

    /// A raw action marker at `timestamp`.
    #[must_use]
    pub fn action(timestamp: Millis, id: u32) -> Self {
        Self {
            timestamp,
            action_id: Some(ActionId::new(id)),
            ..Self::default()
        }
    }

    /// A raw command marker at `timestamp`.
    #[must_use]
    pub fn command(timestamp: Millis, id: u32) -> Self {
        Self {
            timestamp,
            command_id: Some(CommandId::new(id)),
            ..Self::default()
        }
    }

    /// Picks the metadata reference in fixed priority order: tile, item,
    /// event, then location.
    ///
    /// The source is expected to set at most one id; the order only breaks
    /// ties when it does not.
    pub fn reference(&self) -> Option<Reference> {
        self.tile_id
            .map(Reference::Tile)
            .or_else(|| self.item_id.map(Reference::Item))
            .or_else(|| self.event_id.map(Reference::Event))
            .or_else(|| self.location_id.map(Reference::Check))
    }

    /// Whether this event marks progress in the run, as opposed to a raw
    /// action or command marker.
    pub fn is_objective(&self) -> bool {
        self.reference().is_some()
    }

    /// Wall-clock time of the event, if the timestamp is representable.
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }
}

/// Anything positioned on the run timeline.
pub trait Timestamped {
    /// Milliseconds since the Unix epoch.
    fn timestamp(&self) -> Millis;
}

impl Timestamped for RawEvent {
    fn timestamp(&self) -> Millis {
        self.timestamp
    }
}

impl Timestamped for Millis {
    fn timestamp(&self) -> Millis {
        *self
    }
}

impl<T: Timestamped + ?Sized> Timestamped for &T {
    fn timestamp(&self) -> Millis {
        (**self).timestamp()
    }
}

/// One full attempt: where it started and everything recorded since.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    /// Set once the run has been completed.
    #[serde(default)]
    pub finalized: bool,
    /// Tile the run started on.
    pub start_tile: TileId,
    /// Recorded events in arrival order, markers included.
    #[serde(default)]
    pub objectives: Vec<RawEvent>,
}

impl Run {
    /// Creates an empty, unfinished run.
    pub const fn new(start_tile: TileId) -> Self {
        Self {
            finalized: false,
            start_tile,
            objectives: Vec::new(),
        }
    }

    /// Appends an event to the run.
    pub fn push(&mut self, event: RawEvent) {
        self.objectives.push(event);
    }

    /// Events that reference metadata, skipping action and command markers.
    pub fn objectives(&self) -> impl Iterator<Item = &RawEvent> {
        self.objectives.iter().filter(|e| e.is_objective())
    }

    /// The most recent objective, if any.
    pub fn latest_objective(&self) -> Option<&RawEvent> {
        self.objectives.iter().rev().find(|e| e.is_objective())
    }

    /// Elapsed time between the first and last objective.
    pub fn elapsed(&self) -> Option<Millis> {
        let objectives: Vec<&RawEvent> = self.objectives().collect();
        crate::stats::elapsed_time(&objectives)
    }
}
