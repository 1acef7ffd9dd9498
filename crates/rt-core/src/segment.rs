//! Folding repeated samples of one objective into run segments.
//!
//! # Algorithm Summary
//!
//! 1. With no open segment, the incoming event anchors a new one
//! 2. An event duplicating the open segment's anchor only adds a timestamp
//! 3. Anything else seals the open segment and anchors the next one
//!
//! The last segment is sealed by [`SegmentFold::finish`]. Combined
//! objectives (check + item at one instant) never merge; the later segment
//! records which sealed segment it pairs with.

use crate::classify::{EventKind, ResolvedEvent, UnknownReference, classify, label_of};
use crate::event::{RawEvent, Timestamped};
use crate::metadata::MetadataIndex;
use crate::relation::{is_combined, is_duplicate};
use crate::types::Millis;

/// One objective as observed in the stream, possibly sampled several times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSegment {
    anchor: RawEvent,
    observed_times: Vec<Millis>,
    classification: Result<ResolvedEvent, UnknownReference>,
    paired_with: Option<usize>,
}

impl RunSegment {
    fn start<M>(index: &M, anchor: RawEvent, paired_with: Option<usize>) -> Self
    where
        M: MetadataIndex + ?Sized,
    {
        let classification = classify(index, &anchor);
        if let Err(err) = &classification {
            tracing::warn!(timestamp = anchor.timestamp, %err, "segment anchor has no metadata");
        }
        Self {
            anchor,
            observed_times: vec![anchor.timestamp],
            classification,
            paired_with,
        }
    }

    /// The event that opened this segment.
    pub const fn anchor(&self) -> &RawEvent {
        &self.anchor
    }

    /// Every timestamp folded into this segment, anchor first.
    pub fn observed_times(&self) -> &[Millis] {
        &self.observed_times
    }

    /// Classification of the anchor.
    pub const fn classification(&self) -> &Result<ResolvedEvent, UnknownReference> {
        &self.classification
    }

    /// Kind of the anchor, or `None` when its id is unknown.
    pub fn kind(&self) -> Option<EventKind> {
        self.classification.as_ref().ok().map(ResolvedEvent::kind)
    }

    /// Display label, degrading to a placeholder for unknown ids.
    pub fn label(&self) -> &str {
        label_of(&self.classification)
    }

    /// Index of the earlier segment this one forms a combined objective with.
    pub const fn paired_with(&self) -> Option<usize> {
        self.paired_with
    }

    pub fn min(&self) -> Millis {
        self.observed_times
            .iter()
            .copied()
            .min()
            .unwrap_or(self.anchor.timestamp)
    }

    pub fn max(&self) -> Millis {
        self.observed_times
            .iter()
            .copied()
            .max()
            .unwrap_or(self.anchor.timestamp)
    }

    /// Mean of the observed times, accumulated in floating point.
    #[allow(clippy::cast_precision_loss)]
    pub fn average(&self) -> f64 {
        let sum: f64 = self.observed_times.iter().map(|&t| t as f64).sum();
        sum / self.observed_times.len() as f64
    }
}

impl Timestamped for RunSegment {
    fn timestamp(&self) -> Millis {
        self.anchor.timestamp
    }
}

/// Accumulator for the segment fold: sealed segments plus the open one.
#[derive(Debug, Clone, Default)]
pub struct SegmentFold {
    sealed: Vec<RunSegment>,
    open: Option<RunSegment>,
}

impl SegmentFold {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one event; returns the segment it sealed, if any.
    pub fn push<M>(&mut self, index: &M, event: &RawEvent) -> Option<&RunSegment>
    where
        M: MetadataIndex + ?Sized,
    {
        if let Some(open) = self.open.as_mut() {
            if is_duplicate(Some(&open.anchor), Some(event)) {
                open.observed_times.push(event.timestamp);
                return None;
            }
        }

        let paired_with = self
            .open
            .as_ref()
            .filter(|open| is_combined(Some(&open.anchor), Some(event)))
            .map(|_| self.sealed.len());
        if let Some(partner) = paired_with {
            tracing::debug!(partner, timestamp = event.timestamp, "combined objective");
        }

        let previous = self
            .open
            .replace(RunSegment::start(index, *event, paired_with))?;
        tracing::debug!(
            label = previous.label(),
            samples = previous.observed_times.len(),
            "segment sealed"
        );
        self.sealed.push(previous);
        self.sealed.last()
    }

    /// By-value form of [`push`](Self::push) for use with `Iterator::fold`.
    #[must_use]
    pub fn step<M>(mut self, index: &M, event: &RawEvent) -> Self
    where
        M: MetadataIndex + ?Sized,
    {
        self.push(index, event);
        self
    }

    /// Segments sealed so far.
    pub fn sealed(&self) -> &[RunSegment] {
        &self.sealed
    }

    /// The segment still accepting duplicates.
    pub const fn open(&self) -> Option<&RunSegment> {
        self.open.as_ref()
    }

    /// Seals the open segment at end of stream and returns every segment.
    pub fn finish(self) -> Vec<RunSegment> {
        let mut sealed = self.sealed;
        sealed.extend(self.open);
        sealed
    }
}

/// Folds a whole event sequence into sealed segments.
pub fn aggregate<'a, M, I>(index: &M, events: I) -> Vec<RunSegment>
where
    M: MetadataIndex + ?Sized,
    I: IntoIterator<Item = &'a RawEvent>,
{
    events
        .into_iter()
        .fold(SegmentFold::new(), |fold, event| fold.step(index, event))
        .finish()
}

/// Label for segment `i`, joined with its partner as `"A & B"` when paired.
pub fn combined_label(segments: &[RunSegment], i: usize) -> Option<String> {
    let segment = segments.get(i)?;
    let label = match segment.paired_with.and_then(|j| segments.get(j)) {
        Some(partner) => format!("{} & {}", partner.label(), segment.label()),
        None => segment.label().to_string(),
    };
    Some(label)
}
