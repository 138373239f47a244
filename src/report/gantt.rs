//! Gantt bar generation.
//!
//! Turns a lane into the bars a Gantt row draws: busy segments with
//! explicit idle bars filling the gaps, all cut off at "now".

use serde::{Deserialize, Serialize};

use crate::models::Lane;

/// What a bar represents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BarKind {
    /// Work on the given item.
    Busy(String),
    /// No work.
    Idle,
}

/// A Gantt bar: [start, end).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GanttBar {
    /// Busy or idle.
    pub kind: BarKind,
    /// Start (ms, inclusive).
    pub start_ms: i64,
    /// End (ms, exclusive).
    pub end_ms: i64,
}

impl GanttBar {
    fn busy(key: &str, start_ms: i64, end_ms: i64) -> Self {
        Self {
            kind: BarKind::Busy(key.to_string()),
            start_ms,
            end_ms,
        }
    }

    fn idle(start_ms: i64, end_ms: i64) -> Self {
        Self {
            kind: BarKind::Idle,
            start_ms,
            end_ms,
        }
    }

    /// Whether this is an idle bar.
    pub fn is_idle(&self) -> bool {
        self.kind == BarKind::Idle
    }
}

/// Bars for `lane` over `[from, until)`.
///
/// Segments are expected start-ascending (as layering emits them).
/// Overlapping segments of a collapsed lane produce overlapping busy bars;
/// idle bars only cover time no segment reaches.
pub fn gantt_bars(lane: &Lane, from_ms: i64, until_ms: i64) -> Vec<GanttBar> {
    let mut bars = Vec::new();
    if until_ms <= from_ms {
        return bars;
    }

    let mut cursor = from_ms;
    for segment in &lane.segments {
        if segment.start_ms >= until_ms {
            break;
        }
        if segment.start_ms > cursor {
            bars.push(GanttBar::idle(cursor, segment.start_ms));
            cursor = segment.start_ms;
        }

        let start = segment.start_ms.max(from_ms);
        let end = segment.end_ms.min(until_ms);
        if end > start {
            bars.push(GanttBar::busy(&segment.item_id, start, end));
            cursor = cursor.max(end);
        }
    }

    if cursor < until_ms {
        bars.push(GanttBar::idle(cursor, until_ms));
    }
    bars
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LaneSegment;

    fn lane(segments: &[(&str, i64, i64)]) -> Lane {
        Lane {
            segments: segments
                .iter()
                .map(|&(k, s, e)| LaneSegment::new(k, s, e))
                .collect(),
        }
    }

    #[test]
    fn test_bars_with_gaps() {
        let bars = gantt_bars(&lane(&[("A", 2, 5), ("B", 7, 9)]), 0, 12);
        assert_eq!(
            bars,
            vec![
                GanttBar::idle(0, 2),
                GanttBar::busy("A", 2, 5),
                GanttBar::idle(5, 7),
                GanttBar::busy("B", 7, 9),
                GanttBar::idle(9, 12),
            ]
        );
    }

    #[test]
    fn test_bars_cut_at_until() {
        let bars = gantt_bars(&lane(&[("A", 0, 5), ("B", 7, 9)]), 0, 4);
        assert_eq!(bars, vec![GanttBar::busy("A", 0, 4)]);
    }

    #[test]
    fn test_bars_empty_lane() {
        let bars = gantt_bars(&Lane::new(), 0, 10);
        assert_eq!(bars, vec![GanttBar::idle(0, 10)]);
        assert!(bars[0].is_idle());
        assert!(gantt_bars(&Lane::new(), 10, 10).is_empty());
    }

    #[test]
    fn test_bars_collapsed_overlap() {
        let bars = gantt_bars(&lane(&[("A", 0, 6), ("B", 4, 8)]), 0, 10);
        assert_eq!(
            bars,
            vec![
                GanttBar::busy("A", 0, 6),
                GanttBar::busy("B", 4, 8),
                GanttBar::idle(8, 10),
            ]
        );
    }
}
