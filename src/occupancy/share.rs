//! Occupancy results.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{ms_to_days, TimeWindow};

/// Time-share breakdown of one window.
///
/// `shares` plus `idle_ms` sum to the window duration. A degenerate
/// window reports a nominal `idle_ms` of 1.0 so proportions stay defined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OccupancyShare {
    /// Window the shares cover.
    pub window: TimeWindow,
    /// Accumulated occupancy per key (ms).
    pub shares: BTreeMap<String, f64>,
    /// Uncovered time (ms).
    pub idle_ms: f64,
    /// Whether the window had zero duration.
    pub degenerate: bool,
}

/// One pie slice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slice {
    /// What the slice represents.
    pub kind: SliceKind,
    /// Slice duration (ms).
    pub duration_ms: f64,
    /// Fraction of the total (0.0..=1.0).
    pub fraction: f64,
}

/// Slice subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SliceKind {
    /// Time attributed to an item (or label).
    Item(String),
    /// Uncovered time.
    Idle,
}

impl OccupancyShare {
    /// A window with nothing in it: all idle.
    pub fn idle(window: TimeWindow) -> Self {
        let degenerate = window.is_degenerate();
        let idle_ms = if degenerate {
            1.0
        } else {
            window.duration_ms() as f64
        };
        Self {
            window,
            shares: BTreeMap::new(),
            idle_ms,
            degenerate,
        }
    }

    /// Busy plus idle time (ms).
    pub fn total_ms(&self) -> f64 {
        self.busy_ms() + self.idle_ms
    }

    /// Sum of all item shares (ms).
    pub fn busy_ms(&self) -> f64 {
        self.shares.values().sum()
    }

    /// Share for `key` (ms); zero if absent.
    pub fn share_ms(&self, key: &str) -> f64 {
        self.shares.get(key).copied().unwrap_or(0.0)
    }

    /// Share for `key` in days.
    pub fn share_days(&self, key: &str) -> f64 {
        ms_to_days(self.share_ms(key))
    }

    /// Share for `key` as a fraction of the total.
    pub fn fraction(&self, key: &str) -> f64 {
        ratio(self.share_ms(key), self.total_ms())
    }

    /// Idle time as a fraction of the total.
    pub fn idle_fraction(&self) -> f64 {
        ratio(self.idle_ms, self.total_ms())
    }

    /// Pie slices: items by descending duration (ties by key), idle last.
    ///
    /// Zero-duration entries are omitted. Never empty.
    pub fn slices(&self) -> Vec<Slice> {
        let total = self.total_ms();
        let mut items: Vec<(&String, f64)> = self
            .shares
            .iter()
            .filter(|&(_, &ms)| ms > 0.0)
            .map(|(key, &ms)| (key, ms))
            .collect();
        items.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));

        let mut slices: Vec<Slice> = items
            .into_iter()
            .map(|(key, ms)| Slice {
                kind: SliceKind::Item(key.clone()),
                duration_ms: ms,
                fraction: ratio(ms, total),
            })
            .collect();

        if self.idle_ms > 0.0 || slices.is_empty() {
            slices.push(Slice {
                kind: SliceKind::Idle,
                duration_ms: self.idle_ms,
                fraction: ratio(self.idle_ms, total),
            });
        }
        slices
    }
}

fn ratio(part: f64, total: f64) -> f64 {
    if total > 0.0 {
        part / total
    } else {
        0.0
    }
}
