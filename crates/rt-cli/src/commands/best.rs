//! Best command: compares attempts and selects the best run.

use std::io::Write;

use anyhow::{Result, anyhow};
use rt_core::{
    AttemptMatrix, Millis, RunSegment, StatsError, TimeVerdict, average, format_absolute_ms,
    rolling_average, sum, verdict,
};
use serde::Serialize;

use super::util::{display_rows, row_splits};

/// One attempt: its display name and folded segments.
#[derive(Debug, Clone)]
pub struct Attempt {
    pub name: String,
    pub segments: Vec<RunSegment>,
}

#[derive(Debug, Serialize)]
struct AttemptView<'a> {
    name: &'a str,
    total_ms: Millis,
    splits_ms: &'a [Millis],
    verdict: Option<TimeVerdict>,
}

#[derive(Debug, Serialize)]
struct BestView<'a> {
    attempts: Vec<AttemptView<'a>>,
    average_ms: Option<Millis>,
    rolling_window: usize,
    rolling_average_ms: Option<Millis>,
    best_run_ms: Option<&'a [Millis]>,
    best_run_total_ms: Option<Millis>,
}

/// Attempt comparison, computed once for both output formats.
#[derive(Debug)]
pub struct Comparison<'a> {
    attempts: &'a [Attempt],
    matrix: AttemptMatrix,
    totals: Vec<Millis>,
    rolling_window: usize,
    best_run: Option<Vec<Millis>>,
}

impl<'a> Comparison<'a> {
    /// Builds the attempt matrix from the splits of each attempt.
    ///
    /// Fails when attempts have different numbers of splits, or when a
    /// split or total does not fit in milliseconds.
    pub fn new(attempts: &'a [Attempt], rolling_window: usize) -> Result<Self> {
        let rows: Vec<Vec<Millis>> = attempts
            .iter()
            .map(|attempt| {
                row_splits(&display_rows(&attempt.segments))
                    .ok_or_else(|| anyhow!("run {} has a split out of range", attempt.name))
            })
            .collect::<Result<_>>()?;

        let matrix = AttemptMatrix::new(rows).map_err(|err| match &err {
            StatsError::ShapeMismatch { row, .. } => {
                anyhow!("run {} cannot be compared: {err}", attempts[*row].name)
            }
        })?;
        tracing::debug!(
            attempts = matrix.attempts(),
            segments = matrix.segments(),
            "built attempt matrix"
        );

        let totals: Vec<Millis> = matrix
            .rows()
            .iter()
            .zip(attempts)
            .map(|(row, attempt)| {
                sum(row.iter().copied())
                    .ok_or_else(|| anyhow!("run {} has a total out of range", attempt.name))
            })
            .collect::<Result<_>>()?;
        let best_run = matrix.best_run();

        Ok(Self {
            attempts,
            matrix,
            totals,
            rolling_window,
            best_run,
        })
    }

    /// Verdict of attempt `i` against every earlier attempt.
    fn verdict_at(&self, i: usize) -> Option<TimeVerdict> {
        verdict(&self.totals[..i], self.totals[i])
    }

    fn view(&self) -> BestView<'_> {
        let attempts = self
            .attempts
            .iter()
            .zip(self.matrix.rows())
            .enumerate()
            .map(|(i, (attempt, splits))| AttemptView {
                name: &attempt.name,
                total_ms: self.totals[i],
                splits_ms: splits,
                verdict: self.verdict_at(i),
            })
            .collect();

        BestView {
            attempts,
            average_ms: average(&self.totals),
            rolling_window: self.rolling_window,
            rolling_average_ms: rolling_average(&self.totals, self.rolling_window),
            best_run_ms: self.best_run.as_deref(),
            best_run_total_ms: self
                .best_run
                .as_ref()
                .and_then(|run| sum(run.iter().copied())),
        }
    }
}

fn verdict_text(verdict: Option<TimeVerdict>) -> String {
    match verdict {
        None => "-".to_string(),
        Some(TimeVerdict::Best(diff)) => format!("best {}", format_absolute_ms(diff)),
        Some(TimeVerdict::Ok(diff)) => format!("ok {}", format_absolute_ms(diff)),
        Some(TimeVerdict::Bad(diff)) => format!("bad {}", format_absolute_ms(diff)),
    }
}

fn optional_time(time: Option<Millis>) -> String {
    time.map_or_else(|| "n/a".to_string(), format_absolute_ms)
}

/// Formats the comparison as JSON.
pub fn format_best_json(comparison: &Comparison<'_>) -> Result<String> {
    Ok(serde_json::to_string_pretty(&comparison.view())?)
}

/// Writes one line per attempt, the averages and the selected best run.
pub fn write_best<W: Write>(writer: &mut W, comparison: &Comparison<'_>) -> Result<()> {
    let view = comparison.view();

    writeln!(writer, "Attempts: {}", view.attempts.len())?;
    writeln!(writer, "{:>8}  {:<10}  {}", "total", "verdict", "run")?;
    for attempt in &view.attempts {
        writeln!(
            writer,
            "{:>8}  {:<10}  {}",
            format_absolute_ms(attempt.total_ms),
            verdict_text(attempt.verdict),
            attempt.name
        )?;
    }

    writeln!(writer, "Average: {}", optional_time(view.average_ms))?;
    writeln!(
        writer,
        "Rolling average ({}): {}",
        view.rolling_window,
        optional_time(view.rolling_average_ms)
    )?;

    match view.best_run_ms {
        Some(best) => {
            writeln!(writer, "Best run: {}", optional_time(view.best_run_total_ms))?;
            for (time, attempt) in best.iter().zip(&view.attempts) {
                writeln!(writer, "{:>8}  {}", format_absolute_ms(*time), attempt.name)?;
            }
        }
        None => writeln!(writer, "Best run: n/a")?,
    }

    Ok(())
}

pub fn run<W: Write>(
    writer: &mut W,
    attempts: &[Attempt],
    rolling_window: usize,
    json: bool,
) -> Result<()> {
    let comparison = Comparison::new(attempts, rolling_window)?;
    if json {
        writeln!(writer, "{}", format_best_json(&comparison)?)?;
    } else {
        write_best(writer, &comparison)?;
    }
    Ok(())
}
