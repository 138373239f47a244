//! Timeline domain models.
//!
//! Value types shared by the layering, occupancy, and report modules.
//! All are immutable snapshots: engines take them by reference and
//! return fresh results.
//!
//! # Domain Mappings
//!
//! | u-timeline | Shipyard | Factory floor | Project plan |
//! |------------|----------|---------------|--------------|
//! | WorkItem | Hull block | Work order | Task |
//! | group | Work area | Cell/line | Team |
//! | Lane | Track | Gantt row | Swimlane |

mod duration;
mod lane;
mod window;
mod work_item;

pub use duration::{days_to_ms, ms_to_days, DAY_MS};
pub use lane::{Lane, LaneSegment};
pub use window::TimeWindow;
pub use work_item::WorkItem;
