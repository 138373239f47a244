//! Virtual simulation clock.
//!
//! Owns the current simulated instant shared by all views, advances it
//! in discrete ticks, keeps it inside a caller-supplied range, and
//! notifies observers of every change.
//!
//! # Usage
//!
//! ```
//! use std::time::Duration;
//! use u_timeline::clock::{ClockEvent, SimulationClock};
//! use u_timeline::models::DAY_MS;
//!
//! let mut clock = SimulationClock::new();
//! clock.subscribe(|event| {
//!     if let ClockEvent::CurrentChanged { current_ms, .. } = event {
//!         // recompute layout for *current_ms
//!         let _ = current_ms;
//!     }
//! });
//! clock.start(0, 30 * DAY_MS);
//! clock.advance(Duration::from_secs(3)); // host event loop
//! assert_eq!(clock.current_ms(), Some(3 * DAY_MS));
//! ```

mod event;
mod simulation;

pub use event::{ClockEvent, ClockState, Direction, ObserverId};
pub use simulation::{ClockConfig, SimulationClock, DEFAULT_RATE};
