//! Core domain logic for the run timer.
//!
//! This crate contains the fundamental types and logic for:
//! - Classification: resolving raw telemetry events against metadata tables
//! - Relations: detecting duplicate samples and combined check + item objectives
//! - Segments: folding repeated samples of one objective into run segments
//! - Statistics: elapsed times, splits, best-run selection and time formatting

pub mod classify;
pub mod event;
pub mod format;
pub mod metadata;
pub mod relation;
pub mod segment;
pub mod stats;
pub mod table;
pub mod types;

pub use classify::{
    EventKind, PLACEHOLDER_LABEL, ResolvedEvent, UNRESOLVED_LABEL, UnknownReference, classify,
    display_name, label_of,
};
pub use event::{RawEvent, Reference, Run, Timestamped};
pub use format::{
    ParseTimeError, format_absolute, format_absolute_ms, format_delta, format_delta_ms,
    parse_seconds,
};
pub use metadata::{DuplicateRecord, MetadataIndex, MetadataTables, Record, TileRecord};
pub use relation::{is_combined, is_duplicate};
pub use segment::{RunSegment, SegmentFold, aggregate, combined_label};
pub use stats::{
    AttemptMatrix, StatsError, TimeVerdict, average, best_run, elapsed_time, rolling_average,
    split_times, sum, verdict,
};
pub use table::Table;
pub use types::{ActionId, CommandId, EventId, ItemId, LocationId, Millis, TileId};
