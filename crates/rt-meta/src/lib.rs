//! Metadata loading for the run timer.
//!
//! Builds an [`rt_core::MetadataTables`] index from JSON files on disk.
//!
//! # File Layout
//!
//! A metadata directory holds one JSON array per table:
//!
//! | File          | Record shape                                 |
//! |---------------|----------------------------------------------|
//! | `tiles.json`  | `{id, name, region, is_indoor}`              |
//! | `checks.json` | `{id, name}`                                 |
//! | `items.json`  | `{id, name}`                                 |
//! | `events.json` | `{id, name}`                                 |
//!
//! Unknown fields (memory offsets, masks, conditions) are ignored, so the
//! tracker's own definition files can be used unchanged. Tiles written with
//! the older `indoors` key are accepted.
//!
//! The tables are immutable after loading and may be shared freely.

use std::fs;
use std::path::{Path, PathBuf};

use rt_core::{DuplicateRecord, MetadataTables, Record, Table, TileRecord};
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Metadata loading errors.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// A table file could not be read.
    #[error("failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A table file is not a JSON array of records.
    #[error("invalid {table} records in {}", .path.display())]
    Json {
        table: Table,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// Two records in one table share an id.
    #[error(transparent)]
    Duplicate(#[from] DuplicateRecord),
}

fn parse_table<T: DeserializeOwned>(
    table: Table,
    path: &Path,
    json: &str,
) -> Result<Vec<T>, MetadataError> {
    serde_json::from_str(json).map_err(|source| MetadataError::Json {
        table,
        path: path.to_path_buf(),
        source,
    })
}

fn read_table<T: DeserializeOwned>(dir: &Path, table: Table) -> Result<Vec<T>, MetadataError> {
    let path = dir.join(table.file_name());
    let json = fs::read_to_string(&path).map_err(|source| MetadataError::Io {
        path: path.clone(),
        source,
    })?;
    let records: Vec<T> = parse_table(table, &path, &json)?;
    tracing::debug!(%table, count = records.len(), path = %path.display(), "loaded metadata table");
    Ok(records)
}

/// Loads all four tables from `dir`.
pub fn load_dir(dir: &Path) -> Result<MetadataTables, MetadataError> {
    let tiles: Vec<TileRecord> = read_table(dir, Table::Tile)?;
    let checks: Vec<Record> = read_table(dir, Table::Check)?;
    let items: Vec<Record> = read_table(dir, Table::Item)?;
    let events: Vec<Record> = read_table(dir, Table::Event)?;
    Ok(MetadataTables::new(tiles, checks, items, events)?)
}

/// Builds the tables from in-memory JSON arrays.
///
/// Errors report the table's file name as their path.
pub fn from_json_strs(
    tiles: &str,
    checks: &str,
    items: &str,
    events: &str,
) -> Result<MetadataTables, MetadataError> {
    let path = |table: Table| PathBuf::from(table.file_name());
    let tiles = parse_table(Table::Tile, &path(Table::Tile), tiles)?;
    let checks = parse_table(Table::Check, &path(Table::Check), checks)?;
    let items = parse_table(Table::Item, &path(Table::Item), items)?;
    let events = parse_table(Table::Event, &path(Table::Event), events)?;
    Ok(MetadataTables::new(tiles, checks, items, events)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    use rt_core::{ItemId, LocationId, MetadataIndex, RawEvent, TileId, classify};

    const TILES: &str = r#"[
        {"id": 0, "name": "Links House", "region": "Light World", "indoors": true, "address_value": ["104"]},
        {"id": 1, "name": "Kakariko Village", "region": "Light World", "is_indoor": false}
    ]"#;
    const CHECKS: &str = r#"[
        {"id": 0, "name": "Mushroom", "sram_offset": "f411", "sram_mask": "10"}
    ]"#;
    const ITEMS: &str = r#"[
        {"id": 0, "name": "Bow", "sram_offset": "f38e", "sram_mask": "80"},
        {"id": 4, "name": "Hookshot"}
    ]"#;
    const EVENTS: &str = r#"[
        {"id": 2, "name": "Overworld Mirror", "is_progressive": true}
    ]"#;

    fn write_dir(dir: &Path, tiles: &str, checks: &str, items: &str, events: &str) {
        fs::write(dir.join("tiles.json"), tiles).unwrap();
        fs::write(dir.join("checks.json"), checks).unwrap();
        fs::write(dir.join("items.json"), items).unwrap();
        fs::write(dir.join("events.json"), events).unwrap();
    }

    #[test]
    fn load_dir_reads_all_tables() {
        let temp = tempfile::tempdir().unwrap();
        write_dir(temp.path(), TILES, CHECKS, ITEMS, EVENTS);

        let tables = load_dir(temp.path()).unwrap();

        assert_eq!(tables.len(Table::Tile), 2);
        assert!(tables.tile(TileId::new(0)).unwrap().is_indoor);
        assert_eq!(tables.check(LocationId::new(0)).unwrap().name, "Mushroom");
        assert_eq!(tables.item(ItemId::new(4)).unwrap().name, "Hookshot");

        let resolved = classify(&tables, &RawEvent::event(10, 2)).unwrap();
        assert_eq!(resolved.name(), Some("Overworld Mirror"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("tiles.json"), TILES).unwrap();

        let err = load_dir(temp.path()).unwrap_err();
        match err {
            MetadataError::Io { path, .. } => assert!(path.ends_with("checks.json")),
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn malformed_json_names_the_table() {
        let temp = tempfile::tempdir().unwrap();
        write_dir(temp.path(), TILES, CHECKS, r#"{"id": 0}"#, EVENTS);

        let err = load_dir(temp.path()).unwrap_err();
        assert!(matches!(err, MetadataError::Json { table: Table::Item, .. }));
        assert!(err.to_string().starts_with("invalid item records in "));
    }

    #[test]
    fn tile_without_region_is_rejected() {
        let err = from_json_strs(r#"[{"id": 1, "name": "Nowhere"}]"#, "[]", "[]", "[]").unwrap_err();
        assert!(matches!(err, MetadataError::Json { table: Table::Tile, .. }));
    }

    #[test]
    fn duplicate_ids_fail_the_load() {
        let err = from_json_strs(
            TILES,
            r#"[{"id": 3, "name": "A"}, {"id": 3, "name": "B"}]"#,
            ITEMS,
            EVENTS,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "duplicate id 3 in check table");
    }

    #[test]
    fn from_json_strs_builds_index() {
        let tables = from_json_strs(TILES, CHECKS, ITEMS, EVENTS).unwrap();
        assert_eq!(tables.len(Table::Event), 1);
        assert!(!tables.is_empty());
    }
}
