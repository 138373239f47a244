//! Work item model.
//!
//! A work item is one scheduled block of work on a work area: a start
//! instant plus raw end data from which the effective end is resolved.
//! Items are produced by an external loader and never mutated afterwards.

use serde::{Deserialize, Serialize};

use super::duration::days_to_ms;

/// A scheduled unit of work.
///
/// # Time Representation
/// All times are in milliseconds relative to an epoch chosen by the loader.
///
/// # Effective End
/// The end used by every computation is resolved, never stored:
/// 1. `end` if it lies after `start`
/// 2. otherwise `due` if set and after `start`
/// 3. otherwise `start + processing_days` if positive
/// 4. otherwise the item is open (no resolvable end)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkItem {
    id: String,
    label: String,
    group: String,
    start_ms: i64,
    end_ms: i64,
    due_ms: Option<i64>,
    processing_days: Option<f64>,
}

impl WorkItem {
    /// Creates a work item with the given identity, group, and raw bounds.
    pub fn new(id: impl Into<String>, group: impl Into<String>, start_ms: i64, end_ms: i64) -> Self {
        Self {
            id: id.into(),
            label: String::new(),
            group: group.into(),
            start_ms,
            end_ms,
            due_ms: None,
            processing_days: None,
        }
    }

    /// Sets the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets the due instant (ms).
    pub fn with_due(mut self, due_ms: i64) -> Self {
        self.due_ms = Some(due_ms);
        self
    }

    /// Sets the fallback processing duration in days.
    pub fn with_processing_days(mut self, days: f64) -> Self {
        self.processing_days = Some(days);
        self
    }

    /// Opaque identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display label (may be empty).
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Grouping key (work area).
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Inclusive start (ms).
    pub fn start_ms(&self) -> i64 {
        self.start_ms
    }

    /// Raw nominal end (ms). May be at or before start.
    pub fn raw_end_ms(&self) -> i64 {
        self.end_ms
    }

    /// Due instant (ms), if any.
    pub fn due_ms(&self) -> Option<i64> {
        self.due_ms
    }

    /// Raw processing duration in days, as supplied.
    pub fn processing_days(&self) -> Option<f64> {
        self.processing_days
    }

    /// Resolves the effective end (ms). `None` = open item.
    pub fn effective_end_ms(&self) -> Option<i64> {
        if self.end_ms > self.start_ms {
            return Some(self.end_ms);
        }
        if let Some(due) = self.due_ms.filter(|&due| due > self.start_ms) {
            return Some(due);
        }
        match self.processing_days {
            Some(days) if days.is_finite() && days > 0.0 => {
                Some(self.start_ms.saturating_add(days_to_ms(days)))
            }
            _ => None,
        }
    }

    /// Effective end, or `horizon_ms` for open items.
    #[inline]
    pub fn resolved_end_ms(&self, horizon_ms: i64) -> i64 {
        self.effective_end_ms().unwrap_or(horizon_ms)
    }

    /// Whether the item has no resolvable end.
    pub fn is_open(&self) -> bool {
        self.effective_end_ms().is_none()
    }

    /// Whether the item is in progress at `time_ms`.
    ///
    /// Both bounds are inclusive; an open item stays active forever once
    /// started.
    pub fn is_active_at(&self, time_ms: i64) -> bool {
        if time_ms < self.start_ms {
            return false;
        }
        self.effective_end_ms().map_or(true, |end| time_ms <= end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DAY_MS;

    #[test]
    fn test_work_item_builder() {
        let item = WorkItem::new("B1", "WP1", 0, 5 * DAY_MS)
            .with_label("Hull 7")
            .with_due(6 * DAY_MS)
            .with_processing_days(3.0);

        assert_eq!(item.id(), "B1");
        assert_eq!(item.group(), "WP1");
        assert_eq!(item.label(), "Hull 7");
        assert_eq!(item.start_ms(), 0);
        assert_eq!(item.raw_end_ms(), 5 * DAY_MS);
        assert_eq!(item.due_ms(), Some(6 * DAY_MS));
        assert_eq!(item.processing_days(), Some(3.0));
    }

    #[test]
    fn test_effective_end_prefers_end() {
        let item = WorkItem::new("B1", "WP1", 0, 4 * DAY_MS).with_due(5 * DAY_MS);
        assert_eq!(item.effective_end_ms(), Some(4 * DAY_MS));
    }

    #[test]
    fn test_effective_end_due_wins_over_processing() {
        let item = WorkItem::new("B1", "WP1", 0, 0)
            .with_due(5 * DAY_MS)
            .with_processing_days(10.0);
        assert_eq!(item.effective_end_ms(), Some(5 * DAY_MS));
    }

    #[test]
    fn test_effective_end_processing_fallback() {
        let item = WorkItem::new("B1", "WP1", DAY_MS, 0)
            .with_due(0) // due before start is ignored
            .with_processing_days(2.5);
        assert_eq!(item.effective_end_ms(), Some(DAY_MS + 2 * DAY_MS + DAY_MS / 2));
    }

    #[test]
    fn test_effective_end_open() {
        let item = WorkItem::new("B1", "WP1", DAY_MS, DAY_MS);
        assert!(item.is_open());
        assert_eq!(item.resolved_end_ms(9 * DAY_MS), 9 * DAY_MS);

        let negative = WorkItem::new("B2", "WP1", 0, 0).with_processing_days(-3.0);
        assert!(negative.is_open());

        let nan = WorkItem::new("B3", "WP1", 0, 0).with_processing_days(f64::NAN);
        assert!(nan.is_open());
    }

    #[test]
    fn test_is_active_at() {
        let item = WorkItem::new("B1", "WP1", 10, 20);
        assert!(!item.is_active_at(9));
        assert!(item.is_active_at(10));
        assert!(item.is_active_at(20)); // inclusive end
        assert!(!item.is_active_at(21));

        let open = WorkItem::new("B2", "WP1", 10, 0);
        assert!(open.is_active_at(1_000_000));
        assert!(!open.is_active_at(5));
    }

    #[test]
    fn test_work_item_serde() {
        let item = WorkItem::new("B1", "WP1", 0, 10).with_due(12);
        let json = serde_json::to_string(&item).unwrap();
        let back: WorkItem = serde_json::from_str(&json).unwrap();
        assert_eq!(item, back);
    }
}
