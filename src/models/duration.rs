//! Day ↔ millisecond conversions.
//!
//! Schedules are authored in days (processing time, playback rate) while
//! every instant in this crate is an `i64` millisecond offset.

/// Milliseconds in one calendar day.
pub const DAY_MS: i64 = 86_400_000;

/// Converts a (possibly fractional) day count to milliseconds, rounded.
///
/// Non-finite input converts to zero.
#[inline]
pub fn days_to_ms(days: f64) -> i64 {
    if !days.is_finite() {
        return 0;
    }
    (days * DAY_MS as f64).round() as i64
}

/// Converts milliseconds to fractional days.
#[inline]
pub fn ms_to_days(ms: f64) -> f64 {
    ms / DAY_MS as f64
}
