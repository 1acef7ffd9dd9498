//! Run statistics: elapsed time, splits, best-run selection and attempt history.

use serde::Serialize;
use thiserror::Error;

use crate::event::Timestamped;
use crate::types::Millis;

/// Statistics errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatsError {
    /// Attempt matrix rows have different segment counts.
    #[error("attempt {row} has {found} segments, expected {expected}")]
    ShapeMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Time between the first and last entry of `run`, as stored.
///
/// Returns `None` for runs with fewer than two entries, or when the
/// difference does not fit in [`Millis`].
pub fn elapsed_time<T: Timestamped>(run: &[T]) -> Option<Millis> {
    if run.len() < 2 {
        return None;
    }
    let start = run.first()?.timestamp();
    let end = run.last()?.timestamp();
    end.checked_sub(start)
}

/// Differences between consecutive timestamps.
///
/// The splits of a run sum to its [`elapsed_time`]. Returns `None` if any
/// difference overflows.
pub fn split_times<T: Timestamped>(run: &[T]) -> Option<Vec<Millis>> {
    run.windows(2)
        .map(|pair| pair[1].timestamp().checked_sub(pair[0].timestamp()))
        .collect()
}

/// Sum starting at zero, or `None` on overflow.
pub fn sum<I: IntoIterator<Item = Millis>>(values: I) -> Option<Millis> {
    values.into_iter().try_fold(0, Millis::checked_add)
}

/// Per-segment times, one row per attempt.
///
/// All rows have the same number of segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptMatrix {
    rows: Vec<Vec<Millis>>,
}

impl AttemptMatrix {
    /// Validates that every row has as many segments as the first.
    pub fn new(rows: Vec<Vec<Millis>>) -> Result<Self, StatsError> {
        if let Some(expected) = rows.first().map(Vec::len) {
            if let Some((row, found)) = rows
                .iter()
                .map(Vec::len)
                .enumerate()
                .find(|&(_, len)| len != expected)
            {
                return Err(StatsError::ShapeMismatch {
                    row,
                    expected,
                    found,
                });
            }
        }
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[Vec<Millis>] {
        &self.rows
    }

    /// Number of attempts (rows).
    pub fn attempts(&self) -> usize {
        self.rows.len()
    }

    /// Number of segments per attempt (columns).
    pub fn segments(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Cross-sectional best-run selection.
    ///
    /// For each segment index `i`, the candidate is column `i` taken across
    /// every attempt. The candidate with the strictly smallest sum wins;
    /// ties keep the earliest column. Note that this selects the fastest
    /// column, not the fastest single attempt. A column whose sum overflows
    /// is never selected.
    ///
    /// Returns `None` with no attempts or no segments.
    pub fn best_run(&self) -> Option<Vec<Millis>> {
        let mut best: Option<(Millis, Vec<Millis>)> = None;

        for i in 0..self.segments() {
            let candidate: Vec<Millis> = self.rows.iter().map(|row| row[i]).collect();
            let Some(total) = sum(candidate.iter().copied()) else {
                tracing::debug!(column = i, "column sum overflows, skipped");
                continue;
            };
            if best.as_ref().is_none_or(|(best_total, _)| total < *best_total) {
                best = Some((total, candidate));
            }
        }

        best.map(|(_, candidate)| candidate)
    }
}

/// Validates `rows` and runs [`AttemptMatrix::best_run`].
pub fn best_run(rows: &[Vec<Millis>]) -> Result<Option<Vec<Millis>>, StatsError> {
    AttemptMatrix::new(rows.to_vec()).map(|matrix| matrix.best_run())
}

/// Integer mean of `times`, truncated toward zero.
///
/// Accumulates in `i128`, so any slice of [`Millis`] has a mean.
pub fn average(times: &[Millis]) -> Option<Millis> {
    if times.is_empty() {
        return None;
    }
    let total: i128 = times.iter().copied().map(i128::from).sum();
    let count = i128::try_from(times.len()).ok()?;
    Millis::try_from(total / count).ok()
}

/// Mean of the last `n` times.
pub fn rolling_average(times: &[Millis], n: usize) -> Option<Millis> {
    let start = times.len().saturating_sub(n);
    average(&times[start..])
}

/// How a new attempt compares to earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", content = "diff_ms", rename_all = "lowercase")]
pub enum TimeVerdict {
    /// Faster than every earlier attempt, by this much.
    Best(Millis),
    /// Within the average; distance from it.
    Ok(Millis),
    /// Slower than the average, by this much.
    Bad(Millis),
}

/// Compares `new` against `previous` attempt times.
///
/// Returns `None` when there is nothing to compare against, or when the
/// difference does not fit in [`Millis`].
pub fn verdict(previous: &[Millis], new: Millis) -> Option<TimeVerdict> {
    let best = previous.iter().copied().min()?;
    let avg = average(previous)?;

    let verdict = if new < best {
        TimeVerdict::Best(best.checked_sub(new)?)
    } else if new > avg {
        TimeVerdict::Bad(new.checked_sub(avg)?)
    } else {
        TimeVerdict::Ok(avg.checked_sub(new)?)
    };
    Some(verdict)
}
