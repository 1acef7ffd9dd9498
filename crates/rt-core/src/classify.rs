//! Event classification against the metadata index.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::event::{RawEvent, Reference};
use crate::metadata::{MetadataIndex, Record, TileRecord};
use crate::table::Table;

/// Label shown in place of a name when an id has no metadata record.
pub const PLACEHOLDER_LABEL: &str = "I am Error";

/// Label shown for events that reference no metadata (raw markers).
pub const UNRESOLVED_LABEL: &str = "-";

/// A classification id has no record in its table.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("no {table} record with id {id}")]
pub struct UnknownReference {
    pub table: Table,
    pub id: u32,
}

/// The kind of a classified event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Tile,
    Item,
    Event,
    Check,
    Unresolved,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Tile => "tile",
            Self::Item => "item",
            Self::Event => "event",
            Self::Check => "check",
            Self::Unresolved => "unresolved",
        };
        f.write_str(s)
    }
}

impl From<Table> for EventKind {
    fn from(table: Table) -> Self {
        match table {
            Table::Tile => Self::Tile,
            Table::Item => Self::Item,
            Table::Event => Self::Event,
            Table::Check => Self::Check,
        }
    }
}

/// A raw event paired with the metadata record it references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "record", rename_all = "lowercase")]
pub enum ResolvedEvent {
    Tile(TileRecord),
    Item(Record),
    Event(Record),
    Check(Record),
    /// No classification id was set.
    Unresolved,
}

impl ResolvedEvent {
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::Tile(_) => EventKind::Tile,
            Self::Item(_) => EventKind::Item,
            Self::Event(_) => EventKind::Event,
            Self::Check(_) => EventKind::Check,
            Self::Unresolved => EventKind::Unresolved,
        }
    }

    /// Name of the referenced record.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Tile(t) => Some(&t.name),
            Self::Item(r) | Self::Event(r) | Self::Check(r) => Some(&r.name),
            Self::Unresolved => None,
        }
    }
}

/// Classifies a raw event by looking up its reference in `index`.
///
/// Events without a classification id resolve to
/// [`ResolvedEvent::Unresolved`]; an id missing from its table is an
/// [`UnknownReference`].
pub fn classify<M>(index: &M, event: &RawEvent) -> Result<ResolvedEvent, UnknownReference>
where
    M: MetadataIndex + ?Sized,
{
    let Some(reference) = event.reference() else {
        return Ok(ResolvedEvent::Unresolved);
    };

    let resolved = match reference {
        Reference::Tile(id) => index.tile(id).cloned().map(ResolvedEvent::Tile),
        Reference::Item(id) => index.item(id).cloned().map(ResolvedEvent::Item),
        Reference::Event(id) => index.event(id).cloned().map(ResolvedEvent::Event),
        Reference::Check(id) => index.check(id).cloned().map(ResolvedEvent::Check),
    };

    resolved.ok_or(UnknownReference {
        table: reference.table(),
        id: reference.id(),
    })
}

/// Display label for a classification result.
///
/// Unknown references degrade to [`PLACEHOLDER_LABEL`] instead of failing.
pub fn label_of(classification: &Result<ResolvedEvent, UnknownReference>) -> &str {
    match classification {
        Ok(resolved) => resolved.name().unwrap_or(UNRESOLVED_LABEL),
        Err(_) => PLACEHOLDER_LABEL,
    }
}

/// Classifies `event` and returns its display label, logging unknown ids.
pub fn display_name<M>(index: &M, event: &RawEvent) -> String
where
    M: MetadataIndex + ?Sized,
{
    let classification = classify(index, event);
    if let Err(err) = &classification {
        tracing::warn!(timestamp = event.timestamp, %err, "falling back to placeholder label");
    }
    label_of(&classification).to_string()
}
