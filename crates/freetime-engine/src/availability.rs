//! End-to-end availability: raw calendar streams in, free intervals out.

use chrono::DateTime;
use chrono_tz::Tz;
use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::gaps::find_free_intervals;
use crate::interval::Interval;
use crate::normalize::{normalize_streams, EventStream};
use crate::query::AvailabilityQuery;

/// A free interval as exposed to callers that serialise results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FreeSlot {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
    pub duration_minutes: i64,
}

impl From<&Interval> for FreeSlot {
    fn from(interval: &Interval) -> Self {
        Self {
            start: interval.start(),
            end: interval.end(),
            duration_minutes: interval.duration_minutes(),
        }
    }
}

/// The result of one availability run.
#[derive(Debug, Clone)]
pub struct Availability {
    pub query: AvailabilityQuery,
    /// Busy intervals in the target timezone, sorted by start.
    pub busy: Vec<Interval>,
    /// Free intervals, ordered, each inside one day's clamp window.
    pub free: Vec<Interval>,
}

impl Availability {
    /// Compute availability from already-normalized busy intervals.
    pub fn from_busy(query: AvailabilityQuery, busy: Vec<Interval>) -> Result<Self> {
        let free = find_free_intervals(&busy, &query)?;
        Ok(Self { query, busy, free })
    }

    /// Normalize every stream, merge them and compute availability.
    pub fn compute(query: AvailabilityQuery, streams: &[EventStream]) -> Result<Self> {
        let busy = normalize_streams(streams, query.timezone)?;
        let availability = Self::from_busy(query, busy)?;
        info!(
            calendars = streams.len(),
            busy = availability.busy.len(),
            free = availability.free.len(),
            free_minutes = availability.total_free_minutes(),
            "availability computed"
        );
        Ok(availability)
    }

    pub fn total_free_minutes(&self) -> i64 {
        self.free.iter().map(Interval::duration_minutes).sum()
    }

    /// The first free interval of at least `min_minutes`.
    pub fn first_fit(&self, min_minutes: i64) -> Option<&Interval> {
        self.free.iter().find(|i| i.duration_minutes() >= min_minutes)
    }

    /// Drop free intervals shorter than `min_minutes`.
    pub fn with_min_duration(mut self, min_minutes: i64) -> Self {
        self.free.retain(|i| i.duration_minutes() >= min_minutes);
        self
    }

    pub fn slots(&self) -> Vec<FreeSlot> {
        self.free.iter().map(FreeSlot::from).collect()
    }
}
