//! Report façade: layout and occupancy for one instant.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::{gantt_bars, schedule_range, GanttBar};
use crate::config::EngineConfig;
use crate::layering::{Interval, LaneLayout, LayeringMode};
use crate::models::{TimeWindow, WorkItem};
use crate::occupancy::OccupancyShare;

/// Where each group's occupancy window begins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Baseline {
    /// Earliest start across the whole schedule.
    #[default]
    GlobalStart,
    /// Earliest start within the group (global start for empty groups).
    GroupFirstStart,
}

/// Ready-to-render snapshot for one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineReport {
    /// Instant the report was built for (ms), unclamped.
    pub now_ms: i64,
    /// Range spanned by the schedule. `None` for an empty schedule.
    pub range: Option<TimeWindow>,
    /// Per-group results: declared groups first, then the rest ascending.
    pub groups: Vec<GroupReport>,
}

impl TimelineReport {
    /// Report for `group`, if present.
    pub fn group(&self, group: &str) -> Option<&GroupReport> {
        self.groups.iter().find(|g| g.group == group)
    }
}

/// Layout, occupancy, and Gantt bars for one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupReport {
    /// Group key.
    pub group: String,
    /// Lane assignment for items started by `now` (clamped into the range).
    pub layout: LaneLayout,
    /// Time shares over `[baseline, now]`.
    pub occupancy: OccupancyShare,
    /// Gantt bars per lane, from range start to `now`.
    pub bars: Vec<Vec<GanttBar>>,
}

impl GroupReport {
    /// Rows to draw: the lane count, with a one-row placeholder for
    /// groups that have nothing laid out.
    pub fn row_count(&self) -> usize {
        self.layout.lane_count().max(1)
    }
}

/// Builds [`TimelineReport`]s from an item snapshot.
///
/// Each `build` recomputes everything from scratch; there is no cache to
/// invalidate between clock ticks.
///
/// # Example
///
/// ```
/// use u_timeline::models::{WorkItem, DAY_MS};
/// use u_timeline::report::ReportBuilder;
///
/// let items = vec![
///     WorkItem::new("A", "WP1", 0, 10 * DAY_MS),
///     WorkItem::new("B", "WP1", 5 * DAY_MS, 15 * DAY_MS),
/// ];
/// let report = ReportBuilder::new(&items)
///     .with_groups(["WP1", "WP2"])
///     .build(8 * DAY_MS);
///
/// let wp1 = report.group("WP1").unwrap();
/// assert_eq!(wp1.layout.lane_count(), 2);
/// assert_eq!(report.group("WP2").unwrap().row_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct ReportBuilder<'a> {
    items: &'a [WorkItem],
    groups: Vec<String>,
    config: EngineConfig,
}

impl<'a> ReportBuilder<'a> {
    /// Creates a builder over `items` with default configuration.
    pub fn new(items: &'a [WorkItem]) -> Self {
        Self {
            items,
            groups: Vec::new(),
            config: EngineConfig::default(),
        }
    }

    /// Declares groups that must appear even without items, in order.
    pub fn with_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.groups = groups.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the engine configuration.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Overrides the layering mode of one group.
    ///
    /// This is the per-group expand/collapse toggle; other groups keep
    /// the configured mode.
    pub fn with_group_mode(mut self, group: impl Into<String>, mode: LayeringMode) -> Self {
        self.config.group_modes.insert(group.into(), mode);
        self
    }

    /// Builds the report for `now_ms`.
    #[instrument(skip_all, fields(items = self.items.len(), now_ms = now_ms))]
    pub fn build(&self, now_ms: i64) -> TimelineReport {
        let range = schedule_range(self.items);
        let until = range.map_or(now_ms, |range| range.clamp(now_ms));
        let aggregator = self.config.aggregator();

        let groups: Vec<GroupReport> = self
            .group_order()
            .into_iter()
            .map(|group| {
                let members: Vec<&WorkItem> =
                    self.items.iter().filter(|i| i.group() == group).collect();
                let intervals: Vec<Interval> = members.iter().map(|&i| Interval::from(i)).collect();
                let layout = self.config.layerer_for(&group).layer(&intervals, until);

                let (occupancy, bars) = match range {
                    Some(range) => {
                        let window = self.occupancy_window(range, &members, until);
                        let occupancy = aggregator.aggregate(members.iter().copied(), window);
                        let bars = layout
                            .lanes
                            .iter()
                            .map(|lane| gantt_bars(lane, range.start_ms, until))
                            .collect();
                        (occupancy, bars)
                    }
                    None => (OccupancyShare::idle(TimeWindow::instant(now_ms)), Vec::new()),
                };

                GroupReport {
                    group,
                    layout,
                    occupancy,
                    bars,
                }
            })
            .collect();

        debug!(groups = groups.len(), "built timeline report");

        TimelineReport {
            now_ms,
            range,
            groups,
        }
    }

    fn group_order(&self) -> Vec<String> {
        let mut seen: BTreeSet<&str> = BTreeSet::new();
        let mut order: Vec<String> = Vec::new();
        for group in &self.groups {
            if seen.insert(group.as_str()) {
                order.push(group.clone());
            }
        }

        let rest: BTreeSet<&str> = self
            .items
            .iter()
            .map(WorkItem::group)
            .filter(|g| !seen.contains(g))
            .collect();
        order.extend(rest.into_iter().map(str::to_string));
        order
    }

    fn occupancy_window(&self, range: TimeWindow, members: &[&WorkItem], until_ms: i64) -> TimeWindow {
        let start = match self.config.baseline {
            Baseline::GlobalStart => range.start_ms,
            Baseline::GroupFirstStart => members
                .iter()
                .map(|i| i.start_ms())
                .min()
                .unwrap_or(range.start_ms),
        };
        // Before the baseline: an empty window, reported as all idle.
        TimeWindow {
            start_ms: start,
            end_ms: until_ms.max(start),
        }
    }
}
