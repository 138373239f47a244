//! Interval layering: assigning work items to display lanes.
//!
//! Given the intervals of one group and a visibility horizon, produces
//! either the minimum set of overlap-free lanes (expanded) or a single
//! summary lane (collapsed). Used for both Gantt row expansion and 3D
//! track placement.
//!
//! # Guarantee
//!
//! In expanded, unbounded mode the lane count equals
//! [`max_concurrency`] of the same input. The greedy rule is the classic
//! optimal coloring of interval graphs.
//!
//! # References
//!
//! - Golumbic (2004), "Algorithmic Graph Theory and Perfect Graphs", Ch. 8
//! - Kleinberg & Tardos (2005), "Algorithm Design", §4.1 (Interval Partitioning)

mod interval;
mod layerer;

pub use interval::{max_concurrency, project_spans, Interval};
pub use layerer::{LaneLayerer, LaneLayout, LayeringMode};
