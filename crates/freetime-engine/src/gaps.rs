//! Compute free intervals from sorted busy intervals, one clamp window per day.
//!
//! A single forward pass over the busy list. [`DayCursor`] owns the day
//! rollover: the current day, that day's resolved clamp window, and the
//! position up to which the day has been accounted for. Gaps are emitted
//! through one guard that drops zero-length gaps and days outside the range.

use std::borrow::Cow;

use chrono::{DateTime, Days, NaiveDate};
use chrono_tz::Tz;
use tracing::{debug, trace};

use crate::clamp::ClampWindow;
use crate::error::{GapError, Result};
use crate::interval::Interval;
use crate::query::AvailabilityQuery;

/// Position of the gap finder within the current day's clamp window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCursor {
    tz: Tz,
    clamp: ClampWindow,
    day: NaiveDate,
    clamp_start: DateTime<Tz>,
    clamp_end: DateTime<Tz>,
    position: DateTime<Tz>,
}

impl DayCursor {
    /// A cursor at `clamp_start` of `day`.
    pub fn new(day: NaiveDate, clamp: ClampWindow, tz: Tz) -> Result<Self> {
        let (clamp_start, clamp_end) = clamp.on(day, tz)?;
        Ok(Self {
            tz,
            clamp,
            day,
            clamp_start,
            clamp_end,
            position: clamp_start,
        })
    }

    pub fn day(&self) -> NaiveDate {
        self.day
    }

    pub fn clamp_start(&self) -> DateTime<Tz> {
        self.clamp_start
    }

    pub fn clamp_end(&self) -> DateTime<Tz> {
        self.clamp_end
    }

    pub fn position(&self) -> DateTime<Tz> {
        self.position
    }

    /// Move to the next calendar day, same clamp times, position at its start.
    pub fn advance_day(&mut self) -> Result<()> {
        let next = self
            .day
            .checked_add_days(Days::new(1))
            .ok_or(GapError::InvalidRange {
                start: self.day,
                end: self.day,
            })?;
        let (clamp_start, clamp_end) = self.clamp.on(next, self.tz)?;
        trace!(day = %next, "clamp window advanced");
        self.day = next;
        self.clamp_start = clamp_start;
        self.clamp_end = clamp_end;
        self.position = clamp_start;
        Ok(())
    }

    /// Move the position forward to `to`; never moves it back.
    pub fn push_to(&mut self, to: DateTime<Tz>) {
        if to > self.position {
            self.position = to.with_timezone(&self.tz);
        }
    }

    /// Roll over every day the position has exhausted, stopping at `until`.
    ///
    /// A position several days ahead (a multi-day event) skips those days
    /// entirely and stays where it is on the day it lands in.
    pub fn settle(&mut self, until: NaiveDate) -> Result<()> {
        while self.position >= self.clamp_end && self.day < until {
            let position = self.position;
            self.advance_day()?;
            self.push_to(position);
        }
        Ok(())
    }
}

/// Free intervals collected for days inside the range.
struct Gaps {
    tz: Tz,
    range_end: NaiveDate,
    free: Vec<Interval>,
}

impl Gaps {
    fn emit(&mut self, day: NaiveDate, start: DateTime<Tz>, end: DateTime<Tz>) {
        if day >= self.range_end {
            return;
        }
        if let Some(gap) = Interval::new(start.with_timezone(&self.tz), end.with_timezone(&self.tz)) {
            debug!(start = %gap.start(), end = %gap.end(), "free interval");
            self.free.push(gap);
        }
    }
}

/// Find the free intervals of every day in the query's range.
///
/// `busy` should be sorted by start (see [`crate::normalize_events`]); an
/// unsorted slice is sorted into a local copy first. Busy intervals may
/// overlap, nest, start before the range or run past it.
///
/// The result is ordered, non-overlapping, never touches a busy interval, and
/// each entry lies inside one day's clamp window. Days without events yield
/// one full-window interval.
///
/// A day whose clamp window a DST transition swallows yields nothing.
///
/// # Errors
/// Only wall-clock resolution of the clamp bounds can fail.
pub fn find_free_intervals(busy: &[Interval], query: &AvailabilityQuery) -> Result<Vec<Interval>> {
    let busy: Cow<'_, [Interval]> = if busy.is_sorted_by_key(Interval::start) {
        Cow::Borrowed(busy)
    } else {
        debug!("busy intervals not sorted, sorting a copy");
        let mut sorted = busy.to_vec();
        sorted.sort_by_key(Interval::start);
        Cow::Owned(sorted)
    };

    let range_end = query.range.end();
    let mut cursor = DayCursor::new(query.range.start(), query.clamp, query.timezone)?;
    let mut gaps = Gaps {
        tz: query.timezone,
        range_end,
        free: Vec::new(),
    };

    for evt in busy.iter() {
        if cursor.day() >= range_end {
            break;
        }

        if evt.end() <= cursor.position() {
            // Entirely behind the cursor.
            continue;
        } else if evt.start() <= cursor.position() {
            cursor.push_to(evt.end());
        } else {
            while evt.start() > cursor.clamp_end() && cursor.day() < range_end {
                gaps.emit(cursor.day(), cursor.position(), cursor.clamp_end());
                cursor.advance_day()?;
            }
            if evt.start() >= cursor.clamp_start() {
                gaps.emit(cursor.day(), cursor.position(), evt.start());
            }
            cursor.push_to(evt.end());
        }

        cursor.settle(range_end)?;
    }

    while cursor.day() < range_end {
        gaps.emit(cursor.day(), cursor.position(), cursor.clamp_end());
        cursor.advance_day()?;
    }

    debug!(
        busy = busy.len(),
        free = gaps.free.len(),
        days = query.range.num_days(),
        "gap search complete"
    );
    Ok(gaps.free)
}
