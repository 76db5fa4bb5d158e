//! Half-open time intervals in a single target timezone.

use chrono::{DateTime, Duration, NaiveDate};
use chrono_tz::Tz;

use crate::error::{GapError, Result};

/// A half-open interval `[start, end)` with `start < end`.
///
/// Busy intervals (from calendar events) and free intervals (the gaps the
/// finder emits) share this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    start: DateTime<Tz>,
    end: DateTime<Tz>,
}

impl Interval {
    /// Build an interval, or `None` when it would be empty or inverted.
    pub fn new(start: DateTime<Tz>, end: DateTime<Tz>) -> Option<Self> {
        (start < end).then_some(Self { start, end })
    }

    /// Like [`Interval::new`] but reports the rejection as an error.
    pub fn try_new(start: DateTime<Tz>, end: DateTime<Tz>) -> Result<Self> {
        Self::new(start, end).ok_or(GapError::EmptyInterval)
    }

    pub fn start(&self) -> DateTime<Tz> {
        self.start
    }

    pub fn end(&self) -> DateTime<Tz> {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn duration_minutes(&self) -> i64 {
        self.duration().num_minutes()
    }

    /// Calendar date of the start instant, in the interval's timezone.
    pub fn date(&self) -> NaiveDate {
        self.start.date_naive()
    }

    /// Two intervals overlap iff `a.start < b.end && b.start < a.end`.
    /// Touching intervals do not overlap.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// The part of this interval inside `[lo, hi)`, if any.
    pub fn clip(&self, lo: DateTime<Tz>, hi: DateTime<Tz>) -> Option<Interval> {
        Self::new(self.start.max(lo), self.end.min(hi))
    }
}
