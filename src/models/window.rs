//! Time window model.
//!
//! A window is the query range for occupancy and report computations.
//!
//! # Time Model
//! All times are in milliseconds relative to a consumer-defined epoch,
//! matching [`WorkItem`](super::WorkItem).

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::validation::{ValidationError, ValidationErrorKind};

/// A time interval [start, end).
///
/// Half-open interval: includes start, excludes end. A degenerate window
/// (`start == end`) is legal and has zero duration.
///
/// Deserialization goes through [`TimeWindow::new`], so inverted input is
/// swapped. Windows built from the public fields may still be inverted;
/// every method treats the smaller bound as the start.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(from = "WindowBounds")]
pub struct TimeWindow {
    /// Interval start (ms, inclusive).
    pub start_ms: i64,
    /// Interval end (ms, exclusive).
    pub end_ms: i64,
}

#[derive(Deserialize)]
struct WindowBounds {
    start_ms: i64,
    end_ms: i64,
}

impl From<WindowBounds> for TimeWindow {
    fn from(bounds: WindowBounds) -> Self {
        Self::new(bounds.start_ms, bounds.end_ms)
    }
}

impl TimeWindow {
    /// Creates a new time window, swapping inverted bounds.
    pub fn new(start_ms: i64, end_ms: i64) -> Self {
        if end_ms < start_ms {
            warn!(start_ms, end_ms, "inverted time window, swapping bounds");
            return Self {
                start_ms: end_ms,
                end_ms: start_ms,
            };
        }
        Self { start_ms, end_ms }
    }

    /// Strict constructor: rejects inverted bounds instead of swapping.
    pub fn try_new(start_ms: i64, end_ms: i64) -> Result<Self, ValidationError> {
        if end_ms < start_ms {
            return Err(ValidationError::new(
                ValidationErrorKind::InvertedWindow,
                format!("window end {end_ms} precedes start {start_ms}"),
            ));
        }
        Ok(Self { start_ms, end_ms })
    }

    /// This window with its bounds in order.
    pub fn normalized(self) -> Self {
        Self::new(self.start_ms, self.end_ms)
    }

    /// Single-instant window.
    pub fn instant(at_ms: i64) -> Self {
        Self {
            start_ms: at_ms,
            end_ms: at_ms,
        }
    }

    /// Duration of this window (ms). Saturates at `i64::MAX`.
    #[inline]
    pub fn duration_ms(&self) -> i64 {
        self.end_ms.saturating_sub(self.start_ms).max(0)
    }

    /// Whether the window has zero duration.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.end_ms <= self.start_ms
    }

    /// Whether a timestamp falls within this window.
    #[inline]
    pub fn contains(&self, time_ms: i64) -> bool {
        time_ms >= self.start_ms && time_ms < self.end_ms
    }

    /// Whether two windows overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start_ms < other.end_ms && other.start_ms < self.end_ms
    }

    /// Clamps a timestamp into `[start, end]`.
    #[inline]
    pub fn clamp(&self, time_ms: i64) -> i64 {
        let (lo, hi) = if self.start_ms <= self.end_ms {
            (self.start_ms, self.end_ms)
        } else {
            (self.end_ms, self.start_ms)
        };
        time_ms.max(lo).min(hi)
    }

    /// Clips `[start, end)` to this window.
    ///
    /// Returns `None` when nothing of positive duration remains.
    pub fn clip(&self, start_ms: i64, end_ms: i64) -> Option<(i64, i64)> {
        let start = start_ms.max(self.start_ms);
        let end = end_ms.min(self.end_ms);
        (end > start).then_some((start, end))
    }

    /// Overlap duration between two windows (ms), `None` if disjoint.
    pub fn overlap_ms(&self, other: &Self) -> Option<i64> {
        self.clip(other.start_ms, other.end_ms)
            .map(|(start, end)| end.saturating_sub(start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_window() {
        let w = TimeWindow::new(100, 200);
        assert_eq!(w.duration_ms(), 100);
        assert!(w.contains(100));
        assert!(w.contains(199));
        assert!(!w.contains(200)); // exclusive end
        assert!(!w.contains(50));
    }

    #[test]
    fn test_time_window_overlap() {
        let a = TimeWindow::new(0, 100);
        let b = TimeWindow::new(50, 150);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert_eq!(a.overlap_ms(&b), Some(50));

        let c = TimeWindow::new(100, 200); // touching but not overlapping
        assert!(!a.overlaps(&c));
        assert_eq!(a.overlap_ms(&c), None);
    }

    #[test]
    fn test_inverted_window_is_swapped() {
        let w = TimeWindow::new(200, 100);
        assert_eq!(w, TimeWindow::new(100, 200));
    }

    #[test]
    fn test_try_new_rejects_inverted() {
        let err = TimeWindow::try_new(200, 100).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::InvertedWindow);
        assert!(TimeWindow::try_new(100, 100).is_ok());
    }

    #[test]
    fn test_degenerate_window() {
        let w = TimeWindow::instant(42);
        assert!(w.is_degenerate());
        assert_eq!(w.duration_ms(), 0);
        assert!(!w.contains(42));
        assert_eq!(w.clip(0, 100), None);
    }

    #[test]
    fn test_clip_and_clamp() {
        let w = TimeWindow::new(10, 20);
        assert_eq!(w.clip(0, 15), Some((10, 15)));
        assert_eq!(w.clip(12, 30), Some((12, 20)));
        assert_eq!(w.clip(20, 30), None);
        assert_eq!(w.clamp(5), 10);
        assert_eq!(w.clamp(25), 20);
        assert_eq!(w.clamp(15), 15);
    }

    #[test]
    fn test_deserialize_swaps_inverted_bounds() {
        let w: TimeWindow = serde_json::from_str(r#"{"start_ms":10,"end_ms":0}"#).unwrap();
        assert_eq!(w, TimeWindow::new(0, 10));
        assert_eq!(w.clamp(5), 5);

        let json = serde_json::to_string(&TimeWindow::new(3, 7)).unwrap();
        assert_eq!(serde_json::from_str::<TimeWindow>(&json).unwrap(), TimeWindow::new(3, 7));
    }

    #[test]
    fn test_literal_inverted_window_is_total() {
        let w = TimeWindow {
            start_ms: 10,
            end_ms: 0,
        };
        assert_eq!(w.clamp(5), 5);
        assert_eq!(w.clamp(-3), 0);
        assert_eq!(w.clamp(12), 10);
        assert_eq!(w.duration_ms(), 0);
        assert_eq!(w.normalized(), TimeWindow::new(0, 10));
    }

    #[test]
    fn test_extreme_bounds_saturate() {
        let w = TimeWindow::new(i64::MIN, i64::MAX);
        assert_eq!(w.duration_ms(), i64::MAX);
        assert_eq!(w.overlap_ms(&w), Some(i64::MAX));
        assert_eq!(w.clamp(0), 0);
    }
}
