//! Layout and report façade.
//!
//! Combines layering and occupancy into one snapshot per instant: the
//! schedule range, and for each group its lane layout, time shares, and
//! Gantt bars. Intended to be rebuilt on every clock change.
//!
//! | Output | Source |
//! |--------|--------|
//! | [`TimelineReport::range`] | [`schedule_range`] |
//! | [`GroupReport::layout`] | [`crate::layering::LaneLayerer`] |
//! | [`GroupReport::occupancy`] | [`crate::occupancy::OccupancyAggregator`] |
//! | [`GroupReport::bars`] | [`gantt_bars`] |

mod builder;
mod gantt;
mod range;

pub use builder::{Baseline, GroupReport, ReportBuilder, TimelineReport};
pub use gantt::{gantt_bars, BarKind, GanttBar};
pub use range::schedule_range;
