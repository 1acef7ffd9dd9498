//! Segments command: the folded run, one row per displayed segment.

use std::io::Write;

use anyhow::Result;
use rt_core::{
    ResolvedEvent, RunSegment, UnknownReference, format_absolute_ms, format_delta_ms,
};
use serde::Serialize;

use super::util::{display_rows, wall_clock};

#[derive(Debug, Serialize)]
struct SegmentView<'a> {
    index: usize,
    label: &'a str,
    resolved: Option<&'a ResolvedEvent>,
    unknown: Option<&'a UnknownReference>,
    paired_with: Option<usize>,
    samples: usize,
    min_ms: i64,
    max_ms: i64,
    average_ms: f64,
}

/// Formats segments as a JSON array.
///
/// Each entry carries either the metadata record its anchor resolved to or
/// the reference that could not be found.
pub fn format_segments_json(segments: &[RunSegment]) -> Result<String> {
    let rows = display_rows(segments);
    let views: Vec<SegmentView<'_>> = rows
        .iter()
        .map(|row| SegmentView {
            index: row.index,
            label: &row.label,
            resolved: row.segment.classification().as_ref().ok(),
            unknown: row.segment.classification().as_ref().err(),
            paired_with: row.segment.paired_with(),
            samples: row.segment.observed_times().len(),
            min_ms: row.segment.min(),
            max_ms: row.segment.max(),
            average_ms: row.segment.average(),
        })
        .collect();
    Ok(serde_json::to_string_pretty(&views)?)
}

/// Writes the segment table: split since the previous row, time since the
/// first row, wall clock, sample count and label.
pub fn write_segments<W: Write>(writer: &mut W, segments: &[RunSegment]) -> Result<()> {
    let rows = display_rows(segments);
    if rows.is_empty() {
        writeln!(writer, "No segments.")?;
        return Ok(());
    }

    writeln!(
        writer,
        "{:<4}  {:>8}  {:>8}  {:<8}  {:>3}  {}",
        "seg", "split", "time", "clock", "n", "label"
    )?;

    let first = rows[0].segment.min();
    let mut previous = None;
    for row in &rows {
        let at = row.segment.min();
        writeln!(
            writer,
            "{:<4}  {:>8}  {:>8}  {:<8}  {:>3}  {}",
            format!("#{}", row.index),
            format_delta_ms(at, previous),
            at.checked_sub(first)
                .map_or_else(|| "n/a".to_string(), format_absolute_ms),
            wall_clock(row.segment.anchor()),
            row.segment.observed_times().len(),
            row.label
        )?;
        previous = Some(at);
    }

    Ok(())
}

pub fn run<W: Write>(writer: &mut W, segments: &[RunSegment], json: bool) -> Result<()> {
    if json {
        writeln!(writer, "{}", format_segments_json(segments)?)?;
    } else {
        write_segments(writer, segments)?;
    }
    Ok(())
}
