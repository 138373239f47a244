//! Greedy first-fit lane layering.
//!
//! # Algorithm
//!
//! 1. Drop intervals starting at or after `visible_until`.
//! 2. Clamp each end to `min(end, visible_until)`; drop empty results.
//! 3. Sort by (start, end, key).
//! 4. Place each interval in the first lane whose last end ≤ its start,
//!    opening a new lane when none fits.
//!
//! Processing intervals in start order makes first-fit optimal: the lane
//! count equals the peak number of simultaneously active intervals.
//!
//! # Complexity
//! O(n log n + n * L) where L = lanes produced.
//!
//! # Reference
//! Golumbic (2004), "Algorithmic Graph Theory and Perfect Graphs", Ch. 8

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Interval;
use crate::models::{Lane, LaneSegment};

/// How a group is laid out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayeringMode {
    /// Minimum number of overlap-free lanes.
    #[default]
    Expanded,
    /// One summary lane holding every interval, overlaps unresolved.
    Collapsed,
}

/// Result of laying out one group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaneLayout {
    /// Mode that produced this layout.
    pub mode: LayeringMode,
    /// Lanes in creation order.
    pub lanes: Vec<Lane>,
    /// Segments that did not fit within `max_lanes` (start-ascending).
    pub overflow: Vec<LaneSegment>,
}

impl LaneLayout {
    /// Number of lanes produced.
    pub fn lane_count(&self) -> usize {
        self.lanes.len()
    }

    /// Total placed segments, overflow excluded.
    pub fn segment_count(&self) -> usize {
        self.lanes.iter().map(Lane::len).sum()
    }

    /// Lane index holding `key`, if placed.
    pub fn lane_of(&self, key: &str) -> Option<usize> {
        self.lanes
            .iter()
            .position(|lane| lane.segments.iter().any(|s| s.item_id == key))
    }

    /// Whether any segment was pushed to overflow.
    pub fn has_overflow(&self) -> bool {
        !self.overflow.is_empty()
    }
}

/// Interval layering engine.
///
/// Stateless: each call lays out its input from scratch.
///
/// # Example
///
/// ```
/// use u_timeline::layering::{Interval, LaneLayerer};
///
/// let intervals = vec![
///     Interval::new("A", 0, 10),
///     Interval::new("B", 5, 15),
///     Interval::new("C", 12, 20),
/// ];
/// let layout = LaneLayerer::new().layer(&intervals, 100);
/// assert_eq!(layout.lane_count(), 2);
/// assert_eq!(layout.lane_of("C"), Some(0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct LaneLayerer {
    mode: LayeringMode,
    max_lanes: Option<usize>,
}

impl LaneLayerer {
    /// Creates an expanded, unbounded layerer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the layering mode.
    pub fn with_mode(mut self, mode: LayeringMode) -> Self {
        self.mode = mode;
        self
    }

    /// Bounds expanded layering to `max_lanes` lanes.
    ///
    /// Intervals that fit none of the first `max_lanes` lanes go to
    /// [`LaneLayout::overflow`]. A bound of zero is treated as one.
    pub fn with_max_lanes(mut self, max_lanes: usize) -> Self {
        self.max_lanes = Some(max_lanes.max(1));
        self
    }

    /// Sets or clears the lane bound.
    pub fn with_lane_bound(mut self, max_lanes: Option<usize>) -> Self {
        self.max_lanes = max_lanes.map(|n| n.max(1));
        self
    }

    /// Lays out `intervals`, hiding anything not started by `visible_until`.
    pub fn layer(&self, intervals: &[Interval], visible_until_ms: i64) -> LaneLayout {
        let segments = clamp_and_sort(intervals, visible_until_ms);

        let layout = match self.mode {
            LayeringMode::Expanded => self.first_fit(segments),
            LayeringMode::Collapsed => collapse(segments),
        };

        debug!(
            mode = ?self.mode,
            input = intervals.len(),
            lanes = layout.lane_count(),
            overflow = layout.overflow.len(),
            "layered intervals"
        );
        layout
    }

    fn first_fit(&self, segments: Vec<LaneSegment>) -> LaneLayout {
        let mut lanes: Vec<Lane> = Vec::new();
        let mut overflow = Vec::new();

        for segment in segments {
            match lanes.iter().position(|lane| lane.accepts(segment.start_ms)) {
                Some(idx) => lanes[idx].push(segment),
                None if self.max_lanes.is_some_and(|max| lanes.len() >= max) => {
                    overflow.push(segment);
                }
                None => {
                    let mut lane = Lane::new();
                    lane.push(segment);
                    lanes.push(lane);
                }
            }
        }

        LaneLayout {
            mode: LayeringMode::Expanded,
            lanes,
            overflow,
        }
    }
}

fn collapse(segments: Vec<LaneSegment>) -> LaneLayout {
    let lanes = if segments.is_empty() {
        Vec::new()
    } else {
        vec![Lane { segments }]
    };
    LaneLayout {
        mode: LayeringMode::Collapsed,
        lanes,
        overflow: Vec::new(),
    }
}

fn clamp_and_sort(intervals: &[Interval], visible_until_ms: i64) -> Vec<LaneSegment> {
    let mut segments: Vec<LaneSegment> = intervals
        .iter()
        .filter_map(|interval| {
            interval
                .clamp_to(visible_until_ms)
                .map(|(start, end)| LaneSegment::new(interval.key.clone(), start, end))
        })
        .collect();

    // Key breaks remaining ties so the order never depends on input order.
    segments.sort_by(|a, b| {
        a.start_ms
            .cmp(&b.start_ms)
            .then(a.end_ms.cmp(&b.end_ms))
            .then_with(|| a.item_id.cmp(&b.item_id))
    });
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layering::max_concurrency;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    fn abc() -> Vec<Interval> {
        vec![
            Interval::new("A", 0, 10),
            Interval::new("B", 5, 15),
            Interval::new("C", 12, 20),
        ]
    }

    #[test]
    fn test_three_item_scenario() {
        let layout = LaneLayerer::new().layer(&abc(), 100);

        assert_eq!(layout.lane_count(), 2);
        assert_ne!(layout.lane_of("A"), layout.lane_of("B"));
        assert_eq!(layout.lane_of("C"), layout.lane_of("A")); // first fit
        assert!(layout.lanes.iter().all(Lane::is_overlap_free));
    }

    #[test]
    fn test_visible_until_drops_and_clamps() {
        let layout = LaneLayerer::new().layer(&abc(), 12);

        // C starts at the horizon → dropped; B clamped to 12
        assert_eq!(layout.segment_count(), 2);
        assert_eq!(layout.lane_of("C"), None);
        let b = &layout.lanes[1].segments[0];
        assert_eq!((b.start_ms, b.end_ms), (5, 12));
    }

    #[test]
    fn test_zero_duration_dropped() {
        let intervals = vec![Interval::new("A", 5, 5), Interval::new("B", 7, 3)];
        let layout = LaneLayerer::new().layer(&intervals, 100);
        assert!(layout.lanes.is_empty());
    }

    #[test]
    fn test_open_interval_clamped_to_horizon() {
        let intervals = vec![Interval::open("A", 2)];
        let layout = LaneLayerer::new().layer(&intervals, 9);
        assert_eq!(layout.lanes[0].segments[0], LaneSegment::new("A", 2, 9));
    }

    #[test]
    fn test_empty_input() {
        let layout = LaneLayerer::new().layer(&[], 100);
        assert_eq!(layout.lane_count(), 0);
        assert!(!layout.has_overflow());

        let collapsed = LaneLayerer::new()
            .with_mode(LayeringMode::Collapsed)
            .layer(&[], 100);
        assert_eq!(collapsed.lane_count(), 0);
    }

    #[test]
    fn test_equal_start_tie_break() {
        let intervals = vec![
            Interval::new("long", 0, 20),
            Interval::new("short", 0, 5),
            Interval::new("next", 5, 8),
        ];
        let layout = LaneLayerer::new().layer(&intervals, 100);

        // short sorts first (end tie-break), so "next" follows it in lane 0
        assert_eq!(layout.lane_of("short"), Some(0));
        assert_eq!(layout.lane_of("long"), Some(1));
        assert_eq!(layout.lane_of("next"), Some(0));
    }

    #[test]
    fn test_collapsed_mode() {
        let layout = LaneLayerer::new()
            .with_mode(LayeringMode::Collapsed)
            .layer(&abc(), 100);

        assert_eq!(layout.mode, LayeringMode::Collapsed);
        assert_eq!(layout.lane_count(), 1);
        let keys: Vec<&str> = layout.lanes[0]
            .segments
            .iter()
            .map(|s| s.item_id.as_str())
            .collect();
        assert_eq!(keys, vec!["A", "B", "C"]);
        assert!(!layout.lanes[0].is_overlap_free());
    }

    #[test]
    fn test_bounded_lanes_overflow() {
        let intervals = vec![
            Interval::new("A", 0, 10),
            Interval::new("B", 0, 10),
            Interval::new("C", 0, 10),
            Interval::new("D", 0, 10),
            Interval::new("E", 10, 12),
        ];
        let layout = LaneLayerer::new().with_max_lanes(3).layer(&intervals, 100);

        assert_eq!(layout.lane_count(), 3);
        assert_eq!(layout.overflow, vec![LaneSegment::new("D", 0, 10)]);
        assert_eq!(layout.lane_of("E"), Some(0));
        assert!(layout.lanes.iter().all(Lane::is_overlap_free));
    }

    #[test]
    fn test_zero_bound_means_one() {
        let layout = LaneLayerer::new().with_max_lanes(0).layer(&abc(), 100);
        assert_eq!(layout.lane_count(), 1);
        assert_eq!(layout.overflow.len(), 1); // B
    }

    #[test]
    fn test_idempotent_and_order_independent() {
        let mut shuffled = abc();
        shuffled.reverse();
        let layerer = LaneLayerer::new();

        let first = layerer.layer(&abc(), 100);
        let second = layerer.layer(&abc(), 100);
        let reversed = layerer.layer(&shuffled, 100);
        assert_eq!(first, second);
        assert_eq!(first, reversed);
    }

    #[test]
    fn test_random_lane_count_matches_concurrency() {
        let mut rng = SmallRng::seed_from_u64(42);
        let layerer = LaneLayerer::new();

        for _ in 0..200 {
            let n = rng.random_range(0..40);
            let intervals: Vec<Interval> = (0..n)
                .map(|i| {
                    let start = rng.random_range(0..100);
                    let len = rng.random_range(0..30);
                    Interval::new(format!("I{i}"), start, start + len)
                })
                .collect();
            let horizon = rng.random_range(0..130);

            let layout = layerer.layer(&intervals, horizon);
            assert_eq!(layout.lane_count(), max_concurrency(&intervals, horizon));
            assert!(layout.lanes.iter().all(Lane::is_overlap_free));
        }
    }
}
