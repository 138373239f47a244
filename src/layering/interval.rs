//! Layering input intervals.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::WorkItem;

/// A keyed interval to be laid out.
///
/// `end_ms = None` marks an open interval; layering clamps it to the
/// visibility horizon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    /// Key carried onto the produced segment.
    pub key: String,
    /// Start (ms, inclusive).
    pub start_ms: i64,
    /// Effective end (ms, exclusive). `None` = open.
    pub end_ms: Option<i64>,
}

impl Interval {
    /// Creates a closed interval.
    pub fn new(key: impl Into<String>, start_ms: i64, end_ms: i64) -> Self {
        Self {
            key: key.into(),
            start_ms,
            end_ms: Some(end_ms),
        }
    }

    /// Creates an open interval.
    pub fn open(key: impl Into<String>, start_ms: i64) -> Self {
        Self {
            key: key.into(),
            start_ms,
            end_ms: None,
        }
    }

    /// Clamps to `[start, min(end, horizon))`.
    ///
    /// Returns `None` if the interval starts at or after the horizon or
    /// has no positive duration once clamped.
    pub fn clamp_to(&self, horizon_ms: i64) -> Option<(i64, i64)> {
        if self.start_ms >= horizon_ms {
            return None;
        }
        let end = self.end_ms.map_or(horizon_ms, |end| end.min(horizon_ms));
        (end > self.start_ms).then_some((self.start_ms, end))
    }
}

impl From<&WorkItem> for Interval {
    fn from(item: &WorkItem) -> Self {
        Self {
            key: item.id().to_string(),
            start_ms: item.start_ms(),
            end_ms: item.effective_end_ms(),
        }
    }
}

/// Merges items sharing a label into one "project" interval each.
///
/// A project spans its earliest start to its latest effective end. If any
/// member is open the whole project is open. Output is ordered by project
/// start, ties by label, so layering receives a deterministic sequence.
pub fn project_spans<'a>(items: impl IntoIterator<Item = &'a WorkItem>) -> Vec<Interval> {
    let mut spans: BTreeMap<&str, Interval> = BTreeMap::new();

    for item in items {
        let end = item.effective_end_ms();
        spans
            .entry(item.label())
            .and_modify(|span| {
                span.start_ms = span.start_ms.min(item.start_ms());
                span.end_ms = match (span.end_ms, end) {
                    (Some(a), Some(b)) => Some(a.max(b)),
                    _ => None,
                };
            })
            .or_insert_with(|| Interval {
                key: item.label().to_string(),
                start_ms: item.start_ms(),
                end_ms: end,
            });
    }

    let mut out: Vec<Interval> = spans.into_values().collect();
    out.sort_by(|a, b| a.start_ms.cmp(&b.start_ms).then_with(|| a.key.cmp(&b.key)));
    out
}

/// Peak number of simultaneously active clamped intervals.
///
/// Expanded layering opens exactly this many lanes. Touching intervals
/// (`a.end == b.start`) are not simultaneous.
pub fn max_concurrency(intervals: &[Interval], horizon_ms: i64) -> usize {
    let mut events: Vec<(i64, i32)> = Vec::with_capacity(intervals.len() * 2);
    for (start, end) in intervals.iter().filter_map(|i| i.clamp_to(horizon_ms)) {
        events.push((start, 1));
        events.push((end, -1));
    }
    // Ends sort before starts at the same instant.
    events.sort_unstable();

    let mut active: i32 = 0;
    let mut peak: i32 = 0;
    for (_, delta) in events {
        active += delta;
        peak = peak.max(active);
    }
    peak as usize
}
