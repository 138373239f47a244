//! Bounded, bidirectional, variable-rate virtual clock.
//!
//! # State Machine
//!
//! ```text
//! Unranged ──start──▶ Paused ⇄ Running
//!                      ▲  pause / boundary hit
//!                      └─ resume / set_rate (non-degenerate range only)
//! ```
//!
//! `start` may re-enter from any state. There is no terminal state.
//!
//! # Threading
//! The clock is owned by one execution context. Hosts call [`tick`] from
//! their timer, or [`advance`] with elapsed wall time from their event
//! loop; nothing here blocks or locks.
//!
//! [`tick`]: SimulationClock::tick
//! [`advance`]: SimulationClock::advance

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, trace, warn};

use super::{ClockEvent, ClockState, Direction, ObserverId};
use crate::models::{days_to_ms, ms_to_days, TimeWindow};
use crate::validation::{validate_rate, ValidationError};

/// Default playback rate (days per tick).
pub const DEFAULT_RATE: f64 = 1.0;

/// Clock configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Wall time between ticks (ms). Clamped to at least 1.
    pub tick_interval_ms: u64,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1_000,
        }
    }
}

type Observer = Box<dyn FnMut(&ClockEvent) + Send>;

/// The single authoritative "now" shared by every view.
///
/// # Example
///
/// ```
/// use u_timeline::clock::SimulationClock;
/// use u_timeline::models::DAY_MS;
///
/// let mut clock = SimulationClock::new();
/// clock.start(0, 3 * DAY_MS);
/// clock.set_rate(2.0);
/// clock.tick();
/// assert_eq!(clock.current_ms(), Some(2 * DAY_MS));
/// clock.tick(); // would pass the end: clamps and pauses
/// assert_eq!(clock.current_ms(), Some(3 * DAY_MS));
/// assert!(!clock.is_running());
/// ```
pub struct SimulationClock {
    range: Option<TimeWindow>,
    current_ms: i64,
    direction: Direction,
    rate: f64,
    running: bool,
    tick_interval: Duration,
    pending: Duration,
    observers: Vec<(ObserverId, Observer)>,
    next_observer: u64,
}

impl SimulationClock {
    /// Creates an unranged clock with a one-second tick.
    pub fn new() -> Self {
        Self::with_config(&ClockConfig::default())
    }

    /// Creates an unranged clock from configuration.
    pub fn with_config(config: &ClockConfig) -> Self {
        Self {
            range: None,
            current_ms: 0,
            direction: Direction::Forward,
            rate: DEFAULT_RATE,
            running: false,
            tick_interval: Duration::from_millis(config.tick_interval_ms.max(1)),
            pending: Duration::ZERO,
            observers: Vec::new(),
            next_observer: 0,
        }
    }

    // ------------------------------------------------------------------
    // Observers
    // ------------------------------------------------------------------

    /// Registers an observer for range and current-instant changes.
    pub fn subscribe(&mut self, observer: impl FnMut(&ClockEvent) + Send + 'static) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Removes an observer. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(oid, _)| *oid != id);
        self.observers.len() != before
    }

    fn emit(&mut self, event: &ClockEvent) {
        for (_, observer) in &mut self.observers {
            observer(event);
        }
    }

    fn set_current(&mut self, current_ms: i64) {
        let previous_ms = self.range.map(|_| self.current_ms);
        if previous_ms == Some(current_ms) {
            return;
        }
        self.current_ms = current_ms;
        self.emit(&ClockEvent::CurrentChanged {
            previous_ms,
            current_ms,
        });
    }

    // ------------------------------------------------------------------
    // Controls
    // ------------------------------------------------------------------

    /// Sets the active range and rewinds to its start.
    ///
    /// Inverted bounds are swapped. Direction resets to forward and rate to
    /// 1.0. Playback starts unless the range is a single instant.
    pub fn start(&mut self, range_start_ms: i64, range_end_ms: i64) {
        let range = TimeWindow::new(range_start_ms, range_end_ms);
        let previous = self.range.map(|_| self.current_ms);

        self.range = Some(range);
        self.direction = Direction::Forward;
        self.rate = DEFAULT_RATE;
        self.pending = Duration::ZERO;
        self.running = !range.is_degenerate();

        info!(
            start_ms = range.start_ms,
            end_ms = range.end_ms,
            running = self.running,
            "clock range set"
        );

        self.emit(&ClockEvent::RangeChanged {
            start_ms: range.start_ms,
            end_ms: range.end_ms,
        });
        if previous != Some(range.start_ms) {
            self.current_ms = range.start_ms;
            self.emit(&ClockEvent::CurrentChanged {
                previous_ms: previous,
                current_ms: range.start_ms,
            });
        }
    }

    /// Stops ticking. Idempotent.
    pub fn pause(&mut self) {
        self.running = false;
        self.pending = Duration::ZERO;
    }

    /// Continues ticking. No-op without a non-degenerate range.
    pub fn resume(&mut self) {
        if self.range.is_some_and(|r| !r.is_degenerate()) {
            self.running = true;
        }
    }

    /// Plays backward at the current rate.
    pub fn rewind(&mut self) {
        self.direction = Direction::Backward;
        self.resume();
    }

    /// Changes the direction applied on the next tick.
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Sets the rate in days per tick and resumes playback.
    ///
    /// Non-positive or non-finite rates fall back to 1.0.
    pub fn set_rate(&mut self, rate: f64) {
        let rate = if validate_rate(rate).is_ok() {
            rate
        } else {
            warn!(rate, "invalid clock rate, falling back to default");
            DEFAULT_RATE
        };
        self.rate = rate;
        if !self.running {
            self.resume();
        }
    }

    /// Strict form of [`set_rate`](Self::set_rate): rejects invalid rates.
    pub fn try_set_rate(&mut self, rate: f64) -> Result<(), ValidationError> {
        validate_rate(rate)?;
        self.set_rate(rate);
        Ok(())
    }

    /// Jumps to `time_ms`, clamped into the range. Does not change
    /// whether the clock is running. No-op while unranged.
    pub fn move_to(&mut self, time_ms: i64) {
        if let Some(range) = self.range {
            self.set_current(range.clamp(time_ms));
        }
    }

    /// Jumps to `days` after the range start (scrubber position).
    pub fn move_to_offset_days(&mut self, days: f64) {
        if let Some(range) = self.range {
            self.move_to(range.start_ms.saturating_add(days_to_ms(days)));
        }
    }

    /// Advances one step of `direction * rate` days.
    ///
    /// Reaching or passing either end of the range clamps to that end and
    /// pauses. Does nothing while paused.
    pub fn tick(&mut self) {
        let Some(range) = self.range else {
            return;
        };
        if !self.running {
            return;
        }

        let step = days_to_ms(self.rate).max(1) * self.direction.sign();
        let next = self.current_ms.saturating_add(step);
        let hit_boundary = match self.direction {
            Direction::Forward => next >= range.end_ms,
            Direction::Backward => next <= range.start_ms,
        };

        trace!(current_ms = self.current_ms, next, hit_boundary, "clock tick");

        self.set_current(range.clamp(next));
        if hit_boundary {
            info!(current_ms = self.current_ms, "clock reached range boundary");
            self.pause();
        }
    }

    /// Feeds elapsed wall time, ticking once per whole tick interval.
    ///
    /// Remainders carry over to the next call. Returns the number of ticks
    /// applied.
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        if !self.running {
            return 0;
        }
        self.pending += elapsed;

        let mut ticks = 0;
        while self.running && self.pending >= self.tick_interval {
            self.pending -= self.tick_interval;
            self.tick();
            ticks += 1;
        }
        ticks
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Current instant, `None` while unranged.
    pub fn current_ms(&self) -> Option<i64> {
        self.range.map(|_| self.current_ms)
    }

    /// Active range.
    pub fn range(&self) -> Option<TimeWindow> {
        self.range
    }

    /// Days between the range start and the current instant.
    pub fn offset_days(&self) -> Option<f64> {
        self.range
            .map(|r| ms_to_days(self.current_ms.saturating_sub(r.start_ms) as f64))
    }

    /// Playback direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Playback rate (days per tick).
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Whether the clock is ticking.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Wall time between ticks.
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Lifecycle state.
    pub fn state(&self) -> ClockState {
        match (self.range, self.running) {
            (None, _) => ClockState::Unranged,
            (Some(_), false) => ClockState::Paused,
            (Some(_), true) => ClockState::Running,
        }
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SimulationClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimulationClock")
            .field("range", &self.range)
            .field("current_ms", &self.current_ms)
            .field("direction", &self.direction)
            .field("rate", &self.rate)
            .field("running", &self.running)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}
