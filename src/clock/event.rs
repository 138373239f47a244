//! Clock state and change notifications.

use serde::{Deserialize, Serialize};

/// Playback direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Time advances.
    #[default]
    Forward,
    /// Time rewinds.
    Backward,
}

impl Direction {
    /// +1 or -1.
    #[inline]
    pub fn sign(self) -> i64 {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }
}

/// Lifecycle state of a [`SimulationClock`](super::SimulationClock).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockState {
    /// No range has been set yet.
    Unranged,
    /// Ranged, not ticking.
    Paused,
    /// Ranged and ticking.
    Running,
}

/// Notification raised to clock observers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClockEvent {
    /// A new range was set by `start`.
    RangeChanged {
        /// Range start (ms).
        start_ms: i64,
        /// Range end (ms).
        end_ms: i64,
    },
    /// The current instant moved.
    CurrentChanged {
        /// Previous instant, `None` before the first range.
        previous_ms: Option<i64>,
        /// New instant (ms).
        current_ms: i64,
    },
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(pub(crate) u64);
