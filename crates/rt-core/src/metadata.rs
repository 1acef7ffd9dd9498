//! Read-only metadata index over the tile, check, item and event tables.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::table::Table;
use crate::types::{EventId, ItemId, LocationId, TileId};

/// A named metadata record (check, item or game event).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: u32,
    pub name: String,
}

/// A tile record: a named screen or room in a region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileRecord {
    pub id: u32,
    pub name: String,
    pub region: String,
    #[serde(default, alias = "indoors")]
    pub is_indoor: bool,
}

/// Two records in the same table share an id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("duplicate id {id} in {table} table")]
pub struct DuplicateRecord {
    pub table: Table,
    pub id: u32,
}

/// Lookup-by-id over the four metadata tables.
///
/// This trait lets classification run against the JSON-backed tables from
/// `rt-meta` or against synthetic fixtures in tests.
pub trait MetadataIndex {
    /// Looks up a tile.
    fn tile(&self, id: TileId) -> Option<&TileRecord>;

    /// Looks up an item.
    fn item(&self, id: ItemId) -> Option<&Record>;

    /// Looks up a generic game event.
    fn event(&self, id: EventId) -> Option<&Record>;

    /// Looks up a location check.
    fn check(&self, id: LocationId) -> Option<&Record>;
}

/// In-memory metadata tables, immutable once built.
#[derive(Debug, Clone, Default)]
pub struct MetadataTables {
    tiles: HashMap<u32, TileRecord>,
    items: HashMap<u32, Record>,
    events: HashMap<u32, Record>,
    checks: HashMap<u32, Record>,
}

fn index_by_id<R>(
    table: Table,
    records: Vec<R>,
    id_of: impl Fn(&R) -> u32,
) -> Result<HashMap<u32, R>, DuplicateRecord> {
    let mut map = HashMap::with_capacity(records.len());
    for record in records {
        let id = id_of(&record);
        match map.entry(id) {
            Entry::Occupied(_) => return Err(DuplicateRecord { table, id }),
            Entry::Vacant(slot) => {
                slot.insert(record);
            }
        }
    }
    Ok(map)
}

impl MetadataTables {
    /// Builds the index from the four record collections.
    pub fn new(
        tiles: Vec<TileRecord>,
        checks: Vec<Record>,
        items: Vec<Record>,
        events: Vec<Record>,
    ) -> Result<Self, DuplicateRecord> {
        Ok(Self {
            tiles: index_by_id(Table::Tile, tiles, |r| r.id)?,
            items: index_by_id(Table::Item, items, |r| r.id)?,
            events: index_by_id(Table::Event, events, |r| r.id)?,
            checks: index_by_id(Table::Check, checks, |r| r.id)?,
        })
    }

    /// Number of records in the given table.
    pub fn len(&self, table: Table) -> usize {
        match table {
            Table::Tile => self.tiles.len(),
            Table::Item => self.items.len(),
            Table::Event => self.events.len(),
            Table::Check => self.checks.len(),
        }
    }

    /// Whether every table is empty.
    pub fn is_empty(&self) -> bool {
        Table::ALL.iter().all(|&t| self.len(t) == 0)
    }
}

impl MetadataIndex for MetadataTables {
    fn tile(&self, id: TileId) -> Option<&TileRecord> {
        self.tiles.get(&id.value())
    }

    fn item(&self, id: ItemId) -> Option<&Record> {
        self.items.get(&id.value())
    }

    fn event(&self, id: EventId) -> Option<&Record> {
        self.events.get(&id.value())
    }

    fn check(&self, id: LocationId) -> Option<&Record> {
        self.checks.get(&id.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u32, name: &str) -> Record {
        Record {
            id,
            name: name.to_string(),
        }
    }

    #[test]
    fn lookups_hit_the_right_table() {
        let tables = MetadataTables::new(
            vec![TileRecord {
                id: 1,
                name: "Links House".to_string(),
                region: "Light World".to_string(),
                is_indoor: true,
            }],
            vec![record(1, "Mushroom")],
            vec![record(1, "Bow")],
            vec![record(1, "Agahnim")],
        )
        .unwrap();

        assert_eq!(tables.tile(TileId::new(1)).unwrap().name, "Links House");
        assert_eq!(tables.check(LocationId::new(1)).unwrap().name, "Mushroom");
        assert_eq!(tables.item(ItemId::new(1)).unwrap().name, "Bow");
        assert_eq!(tables.event(EventId::new(1)).unwrap().name, "Agahnim");
        assert!(tables.item(ItemId::new(2)).is_none());
        assert_eq!(tables.len(Table::Check), 1);
        assert!(!tables.is_empty());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = MetadataTables::new(
            vec![],
            vec![],
            vec![record(4, "Hookshot"), record(4, "Hookshot again")],
            vec![],
        )
        .unwrap_err();
        assert_eq!(
            err,
            DuplicateRecord {
                table: Table::Item,
                id: 4
            }
        );
        assert_eq!(err.to_string(), "duplicate id 4 in item table");
    }

    #[test]
    fn tile_accepts_legacy_indoors_field() {
        let json = r#"{"id": 3, "name": "Sanctuary", "region": "Light World", "indoors": true, "address_value": [18]}"#;
        let tile: TileRecord = serde_json::from_str(json).unwrap();
        assert!(tile.is_indoor);
    }

    #[test]
    fn default_tables_are_empty() {
        assert!(MetadataTables::default().is_empty());
    }
}
