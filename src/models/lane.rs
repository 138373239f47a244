//! Lane (display row) model.
//!
//! A lane is a row of clipped item segments. Lanes produced by expanded
//! layering never contain two overlapping segments; a collapsed lane is a
//! deliberate summary and may.

use serde::{Deserialize, Serialize};

/// One item's visible portion on a lane: [start, end).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LaneSegment {
    /// Key of the laid-out interval (item ID, or label for project spans).
    pub item_id: String,
    /// Clipped start (ms, inclusive).
    pub start_ms: i64,
    /// Clipped end (ms, exclusive).
    pub end_ms: i64,
}

impl LaneSegment {
    /// Creates a new segment.
    pub fn new(item_id: impl Into<String>, start_ms: i64, end_ms: i64) -> Self {
        Self {
            item_id: item_id.into(),
            start_ms,
            end_ms,
        }
    }

    /// Segment duration (ms).
    #[inline]
    pub fn duration_ms(&self) -> i64 {
        self.end_ms.saturating_sub(self.start_ms)
    }
}

/// An ordered row of segments, start-ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lane {
    /// Segments in placement order.
    pub segments: Vec<LaneSegment>,
}

impl Lane {
    /// Creates an empty lane.
    pub fn new() -> Self {
        Self::default()
    }

    /// End of the last placed segment.
    pub fn last_end_ms(&self) -> Option<i64> {
        self.segments.last().map(|s| s.end_ms)
    }

    /// Whether `start_ms` can be appended without overlapping.
    #[inline]
    pub fn accepts(&self, start_ms: i64) -> bool {
        self.last_end_ms().map_or(true, |end| end <= start_ms)
    }

    /// Appends a segment.
    pub fn push(&mut self, segment: LaneSegment) {
        self.segments.push(segment);
    }

    /// Whether consecutive segments satisfy `end[i] <= start[i + 1]`.
    pub fn is_overlap_free(&self) -> bool {
        self.segments
            .windows(2)
            .all(|pair| pair[0].end_ms <= pair[1].start_ms)
    }

    /// Earliest start to latest end covered by this lane.
    pub fn span(&self) -> Option<(i64, i64)> {
        let start = self.segments.iter().map(|s| s.start_ms).min()?;
        let end = self.segments.iter().map(|s| s.end_ms).max()?;
        Some((start, end))
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the lane holds no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}
