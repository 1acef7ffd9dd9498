//! Shared utilities for CLI commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rt_core::{
    MetadataIndex, Millis, RawEvent, Run, RunSegment, aggregate, combined_label, split_times,
};

/// Reads an event file.
///
/// `*.json` files hold a single run object; anything else is JSONL with one
/// raw event per line. Blank lines are skipped.
pub fn read_events(path: &Path) -> Result<Vec<RawEvent>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    if path.extension().is_some_and(|ext| ext == "json") {
        let run: Run = serde_json::from_str(&content)
            .with_context(|| format!("invalid run file {}", path.display()))?;
        return Ok(run.objectives);
    }

    let mut events = Vec::new();
    for (n, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let event: RawEvent = serde_json::from_str(line)
            .with_context(|| format!("invalid event on line {} of {}", n + 1, path.display()))?;
        events.push(event);
    }
    tracing::debug!(count = events.len(), path = %path.display(), "read events");
    Ok(events)
}

/// Aggregates the objectives of `events`, dropping action and command markers.
pub fn objective_segments<M>(index: &M, events: &[RawEvent]) -> Vec<RunSegment>
where
    M: MetadataIndex + ?Sized,
{
    aggregate(index, events.iter().filter(|e| e.is_objective()))
}

/// A segment as displayed: combined pairs collapse into their later half.
#[derive(Debug, Clone)]
pub struct DisplayRow<'a> {
    pub index: usize,
    pub segment: &'a RunSegment,
    pub label: String,
}

/// Collapses combined check + item pairs into single rows.
pub fn display_rows(segments: &[RunSegment]) -> Vec<DisplayRow<'_>> {
    let partners: Vec<usize> = segments.iter().filter_map(RunSegment::paired_with).collect();

    segments
        .iter()
        .enumerate()
        .filter(|(i, _)| !partners.contains(i))
        .map(|(index, segment)| DisplayRow {
            index,
            segment,
            label: combined_label(segments, index).unwrap_or_default(),
        })
        .collect()
}

/// Split times between consecutive display rows, or `None` if one overflows.
pub fn row_splits(rows: &[DisplayRow<'_>]) -> Option<Vec<Millis>> {
    let anchors: Vec<&RunSegment> = rows.iter().map(|row| row.segment).collect();
    split_times(&anchors)
}

/// Formats the wall-clock time of a segment anchor as `HH:MM:SS` (UTC).
pub fn wall_clock(event: &RawEvent) -> String {
    event
        .datetime()
        .map_or_else(|| "--:--:--".to_string(), |dt| dt.format("%H:%M:%S").to_string())
}
