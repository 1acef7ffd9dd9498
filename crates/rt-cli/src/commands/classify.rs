//! Classify command: one display name per raw event.

use std::io::Write;

use anyhow::Result;
use rt_core::{MetadataIndex, RawEvent, display_name, format_delta_ms};

/// Label for an event, naming raw markers by their id.
fn event_label<M>(index: &M, event: &RawEvent) -> String
where
    M: MetadataIndex + ?Sized,
{
    if event.is_objective() {
        return display_name(index, event);
    }
    match (event.action_id, event.command_id) {
        (Some(id), _) => format!("action {id}"),
        (None, Some(id)) => format!("command {id}"),
        (None, None) => display_name(index, event),
    }
}

/// Writes one line per event: table, seconds since the first event, label.
pub fn run<W, M>(writer: &mut W, index: &M, events: &[RawEvent]) -> Result<()>
where
    W: Write,
    M: MetadataIndex + ?Sized,
{
    let start = events.first().map(|e| e.timestamp);

    for event in events {
        let table = event.reference().map_or("-", |r| r.table().as_str());
        writeln!(
            writer,
            "{:<5}  {:>8}  {}",
            table,
            format_delta_ms(event.timestamp, start),
            event_label(index, event)
        )?;
    }

    Ok(())
}
