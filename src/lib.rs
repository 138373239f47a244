//! Temporal layout and occupancy engine for timeline visualizations.
//!
//! Takes a snapshot of dated work items grouped into containers (work
//! packages, machines, bays) and answers two questions for any instant:
//! which display lane each started item occupies, and how the elapsed
//! time divides among items and idle. A virtual clock drives the instant.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `WorkItem`, `TimeWindow`, `Lane`, day/ms conversion
//! - **`layering`**: Greedy first-fit lane assignment (expanded or collapsed)
//! - **`occupancy`**: Sweep-line time shares with equal split among overlaps
//! - **`clock`**: Ranged simulation clock with direction, rate, and observers
//! - **`report`**: Per-instant façade combining layout, occupancy, and Gantt bars
//! - **`config`**: Serde-loadable engine configuration
//! - **`validation`**: Input integrity checks (duplicate IDs, unresolved ends, rates)
//!
//! # Time
//!
//! All instants are `i64` milliseconds since an arbitrary epoch. Day-valued
//! inputs (processing durations, clock rates) are converted with
//! [`models::days_to_ms`].
//!
//! # References
//!
//! - Golumbic (2004), "Algorithmic Graph Theory and Perfect Graphs"
//! - de Berg et al. (2008), "Computational Geometry", Ch. 2 (plane sweep)

pub mod clock;
pub mod config;
pub mod layering;
pub mod models;
pub mod occupancy;
pub mod report;
pub mod validation;
