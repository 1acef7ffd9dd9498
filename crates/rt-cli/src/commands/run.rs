//! Run command: elapsed time and splits of one attempt.

use std::io::Write;

use anyhow::Result;
use rt_core::{Millis, RunSegment, elapsed_time, format_absolute_ms};
use serde::Serialize;

use super::util::{DisplayRow, display_rows, row_splits};

#[derive(Debug, Serialize)]
struct SplitView<'a> {
    label: &'a str,
    split_ms: Millis,
}

#[derive(Debug, Serialize)]
struct RunView<'a> {
    start: Option<&'a str>,
    elapsed_ms: Option<Millis>,
    /// `None` when a split does not fit in milliseconds.
    splits: Option<Vec<SplitView<'a>>>,
}

fn run_view<'a>(rows: &'a [DisplayRow<'a>]) -> RunView<'a> {
    let anchors: Vec<&RunSegment> = rows.iter().map(|row| row.segment).collect();
    let splits = row_splits(rows).map(|splits| {
        splits
            .into_iter()
            .zip(rows.iter().skip(1))
            .map(|(split_ms, row)| SplitView {
                label: &row.label,
                split_ms,
            })
            .collect()
    });

    RunView {
        start: rows.first().map(|row| row.label.as_str()),
        elapsed_ms: elapsed_time(&anchors),
        splits,
    }
}

/// Formats a run as JSON.
pub fn format_run_json(segments: &[RunSegment]) -> Result<String> {
    let rows = display_rows(segments);
    Ok(serde_json::to_string_pretty(&run_view(&rows))?)
}

/// Writes the elapsed time followed by one split per segment after the first.
pub fn write_run<W: Write>(writer: &mut W, segments: &[RunSegment]) -> Result<()> {
    let rows = display_rows(segments);
    let view = run_view(&rows);

    let elapsed = view
        .elapsed_ms
        .map_or_else(|| "n/a".to_string(), format_absolute_ms);
    writeln!(writer, "Elapsed: {elapsed}")?;

    let Some(start) = view.start else {
        return Ok(());
    };
    writeln!(writer, "Start: {start}")?;

    let Some(splits) = view.splits else {
        writeln!(writer, "Splits: n/a")?;
        return Ok(());
    };
    if splits.is_empty() {
        return Ok(());
    }
    writeln!(writer, "{:>8}  {}", "split", "label")?;
    for split in &splits {
        writeln!(
            writer,
            "{:>8}  {}",
            format_absolute_ms(split.split_ms),
            split.label
        )?;
    }

    Ok(())
}

pub fn run<W: Write>(writer: &mut W, segments: &[RunSegment], json: bool) -> Result<()> {
    if json {
        writeln!(writer, "{}", format_run_json(segments)?)?;
    } else {
        write_run(writer, segments)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;
    use rt_core::{MetadataTables, RawEvent, Record, TileRecord};

    use crate::commands::util::objective_segments;

    fn tables() -> MetadataTables {
        MetadataTables::new(
            vec![TileRecord {
                id: 0,
                name: "Links House".to_string(),
                region: "Light World".to_string(),
                is_indoor: true,
            }],
            vec![Record {
                id: 1,
                name: "Mushroom".to_string(),
            }],
            vec![Record {
                id: 2,
                name: "Bow".to_string(),
            }],
            vec![],
        )
        .unwrap()
    }

    fn sample_segments() -> Vec<RunSegment> {
        let events = [
            RawEvent::tile(1_000, 0),
            RawEvent::tile(1_000, 0),
            RawEvent::command(2_000, 1),
            RawEvent::check(5_000, 1),
            RawEvent::item(5_000, 2),
            RawEvent::check(9_010, 1),
        ];
        objective_segments(&tables(), &events)
    }

    #[test]
    fn run_command_prints_splits() {
        let mut output = Vec::new();
        run(&mut output, &sample_segments(), false).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_snapshot!(output, @r"
        Elapsed: 8.01
        Start: Links House
           split  label
            4.00  Mushroom & Bow
            4.01  Mushroom
        ");
    }

    #[test]
    fn run_command_single_segment_has_no_elapsed() {
        let segments = objective_segments(&tables(), &[RawEvent::tile(1_000, 0)]);

        let mut output = Vec::new();
        run(&mut output, &segments, false).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_eq!(output, "Elapsed: n/a\nStart: Links House\n");
    }

    #[test]
    fn run_command_survives_extreme_timestamps() {
        let events = [
            RawEvent::tile(i64::MIN, 0),
            RawEvent::check(i64::MAX, 1),
        ];
        let segments = objective_segments(&tables(), &events);

        let mut output = Vec::new();
        run(&mut output, &segments, false).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_eq!(output, "Elapsed: n/a\nStart: Links House\nSplits: n/a\n");

        let value: serde_json::Value =
            serde_json::from_str(&format_run_json(&segments).unwrap()).unwrap();
        assert_eq!(value["elapsed_ms"], serde_json::Value::Null);
        assert_eq!(value["splits"], serde_json::Value::Null);
    }

    #[test]
    fn run_command_empty_run() {
        let mut output = Vec::new();
        run(&mut output, &[], false).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "Elapsed: n/a\n");
    }

    #[test]
    fn run_json_output() {
        let output = format_run_json(&sample_segments()).unwrap();
        assert_snapshot!(output, @r#"
        {
          "start": "Links House",
          "elapsed_ms": 8010,
          "splits": [
            {
              "label": "Mushroom & Bow",
              "split_ms": 4000
            },
            {
              "label": "Mushroom",
              "split_ms": 4010
            }
          ]
        }
        "#);
    }
}
