//! Sweep-line occupancy aggregation.
//!
//! # Algorithm
//!
//! 1. Clip every item to the window; drop empty results.
//! 2. Collect sorted, de-duplicated boundaries plus the window bounds.
//! 3. Walk consecutive boundary pairs, maintaining the active set.
//! 4. Each segment goes to idle when nothing is active, otherwise it is
//!    split equally among the active items.
//!
//! # Complexity
//! O(n log n + Σ|active|) over all segments.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::OccupancyShare;
use crate::models::{TimeWindow, WorkItem};

/// Which item attribute shares are keyed by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShareKey {
    /// One share per item ID.
    #[default]
    ItemId,
    /// Items with the same label pool into one share.
    Label,
}

impl ShareKey {
    fn of<'a>(&self, item: &'a WorkItem) -> &'a str {
        match self {
            Self::ItemId => item.id(),
            Self::Label => item.label(),
        }
    }
}

struct Clipped<'a> {
    key: &'a str,
    start_ms: i64,
    end_ms: i64,
}

/// Occupancy aggregation engine.
///
/// # Example
///
/// ```
/// use u_timeline::models::{TimeWindow, WorkItem};
/// use u_timeline::occupancy::OccupancyAggregator;
///
/// let items = vec![WorkItem::new("A", "WP1", 2, 6)];
/// let share = OccupancyAggregator::new().aggregate(&items, TimeWindow::new(0, 10));
/// assert_eq!(share.share_ms("A"), 4.0);
/// assert_eq!(share.idle_ms, 6.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct OccupancyAggregator {
    key: ShareKey,
}

impl OccupancyAggregator {
    /// Creates an aggregator keyed by item ID.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the share key.
    pub fn with_key(mut self, key: ShareKey) -> Self {
        self.key = key;
        self
    }

    /// Computes the time-share breakdown of `window`.
    ///
    /// Open items run to the window end. An inverted window is swapped.
    pub fn aggregate<'a>(
        &self,
        items: impl IntoIterator<Item = &'a WorkItem>,
        window: TimeWindow,
    ) -> OccupancyShare {
        let window = window.normalized();
        if window.is_degenerate() {
            return OccupancyShare::idle(window);
        }

        let clipped: Vec<Clipped<'a>> = items
            .into_iter()
            .filter_map(|item| {
                let end = item.resolved_end_ms(window.end_ms);
                window
                    .clip(item.start_ms(), end)
                    .map(|(start_ms, end_ms)| Clipped {
                        key: self.key.of(item),
                        start_ms,
                        end_ms,
                    })
            })
            .collect();

        if clipped.is_empty() {
            return OccupancyShare::idle(window);
        }

        let (per_item, idle_ms) = sweep(&clipped, window);

        let mut shares: BTreeMap<String, f64> = BTreeMap::new();
        for (c, ms) in clipped.iter().zip(per_item) {
            *shares.entry(c.key.to_string()).or_insert(0.0) += ms;
        }

        debug!(
            window_start = window.start_ms,
            window_end = window.end_ms,
            items = clipped.len(),
            keys = shares.len(),
            idle_ms,
            "aggregated occupancy"
        );

        OccupancyShare {
            window,
            shares,
            idle_ms,
            degenerate: false,
        }
    }
}

/// Returns per-clipped-item accumulated time and idle time.
fn sweep(clipped: &[Clipped<'_>], window: TimeWindow) -> (Vec<f64>, f64) {
    let mut ticks: Vec<i64> = Vec::with_capacity(clipped.len() * 2 + 2);
    ticks.push(window.start_ms);
    ticks.push(window.end_ms);
    for c in clipped {
        ticks.push(c.start_ms);
        ticks.push(c.end_ms);
    }
    ticks.sort_unstable();
    ticks.dedup();

    let mut by_start: Vec<usize> = (0..clipped.len()).collect();
    by_start.sort_by_key(|&i| clipped[i].start_ms);
    let mut by_end = by_start.clone();
    by_end.sort_by_key(|&i| clipped[i].end_ms);

    let mut per_item = vec![0.0; clipped.len()];
    let mut idle_ms = 0.0;
    let mut active: BTreeSet<usize> = BTreeSet::new();
    let (mut next_start, mut next_end) = (0, 0);

    for pair in ticks.windows(2) {
        let (t, t_next) = (pair[0], pair[1]);
        let seg = t_next.abs_diff(t) as f64;
        if seg <= 0.0 {
            continue;
        }

        // Insert before removing: an item ending at t has already started.
        while next_start < by_start.len() && clipped[by_start[next_start]].start_ms <= t {
            active.insert(by_start[next_start]);
            next_start += 1;
        }
        while next_end < by_end.len() && clipped[by_end[next_end]].end_ms <= t {
            active.remove(&by_end[next_end]);
            next_end += 1;
        }

        if active.is_empty() {
            idle_ms += seg;
        } else {
            let share = seg / active.len() as f64;
            for &i in &active {
                per_item[i] += share;
            }
        }
    }

    (per_item, idle_ms)
}
