//! Schedule range derivation.

use crate::models::{TimeWindow, WorkItem, DAY_MS};

/// Range spanned by a loaded schedule: earliest start to latest end.
///
/// Open items contribute only their start. A single-instant result is
/// widened to one day so playback has somewhere to go. Returns `None`
/// for an empty schedule.
pub fn schedule_range(items: &[WorkItem]) -> Option<TimeWindow> {
    let start = items.iter().map(WorkItem::start_ms).min()?;
    let end = items
        .iter()
        .map(|item| item.effective_end_ms().unwrap_or(item.start_ms()))
        .max()?;

    let end = if end <= start {
        start.saturating_add(DAY_MS)
    } else {
        end
    };
    Some(TimeWindow { start_ms: start, end_ms: end })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_range() {
        let items = vec![
            WorkItem::new("A", "WP1", 2 * DAY_MS, 5 * DAY_MS),
            WorkItem::new("B", "WP2", DAY_MS, 0).with_due(9 * DAY_MS),
            WorkItem::new("C", "WP2", 3 * DAY_MS, 0), // open
        ];
        assert_eq!(
            schedule_range(&items),
            Some(TimeWindow::new(DAY_MS, 9 * DAY_MS))
        );
    }

    #[test]
    fn test_schedule_range_empty() {
        assert_eq!(schedule_range(&[]), None);
    }

    #[test]
    fn test_schedule_range_widened() {
        let items = vec![WorkItem::new("A", "WP1", 4 * DAY_MS, 4 * DAY_MS)];
        assert_eq!(
            schedule_range(&items),
            Some(TimeWindow::new(4 * DAY_MS, 5 * DAY_MS))
        );
    }
}
