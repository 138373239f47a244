//! Time-share (occupancy) aggregation.
//!
//! Computes how much of a window each item occupies, with concurrent items
//! splitting shared time equally and uncovered time attributed to idle.
//! The result feeds per-area proportion charts.
//!
//! # Policy
//!
//! Concurrent work in one area has no priority order, so overlapping time
//! is divided equally: the share answers "what fraction of the area's
//! calendar time was spent on X".
//!
//! # Metrics
//!
//! | Quantity | Definition |
//! |----------|-----------|
//! | share(k) | Σ segment / \|active\| over segments where k is active |
//! | idle | Σ segments with no active item |
//! | total | Σ share + idle = window duration |

mod aggregator;
mod share;

pub use aggregator::{OccupancyAggregator, ShareKey};
pub use share::{OccupancyShare, Slice, SliceKind};
