//! Raw calendar events -> sorted busy intervals.
//!
//! Raw records follow the Google Calendar `events` resource shape: `start` and
//! `end` each carry either a `dateTime` (timed event) or a `date` (all-day
//! event). All-day and cancelled events are dropped, timed ones are converted
//! to the target timezone and sorted by start.

use chrono::{DateTime, NaiveDateTime};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::dst::resolve_local;
use crate::error::{GapError, Result};
use crate::interval::Interval;
use crate::query::parse_timezone;

/// Formats tried for a `dateTime` that carries no UTC offset.
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// One side (`start` or `end`) of a raw event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTime {
    /// RFC 3339 timestamp, present for timed events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    /// `YYYY-MM-DD`, present for all-day events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// IANA zone used when `date_time` has no offset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

impl EventTime {
    pub fn timed(date_time: impl Into<String>) -> Self {
        Self {
            date_time: Some(date_time.into()),
            ..Self::default()
        }
    }

    pub fn all_day(date: impl Into<String>) -> Self {
        Self {
            date: Some(date.into()),
            ..Self::default()
        }
    }

    pub fn is_timed(&self) -> bool {
        self.date_time.is_some()
    }
}

/// A calendar event as fetched from a calendar source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Absent on cancelled instances of a recurring series.
    #[serde(default)]
    pub start: EventTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<EventTime>,
}

impl RawEvent {
    pub fn new(start: EventTime, end: EventTime) -> Self {
        Self {
            id: None,
            summary: None,
            status: None,
            start,
            end: Some(end),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.status.as_deref() == Some("cancelled")
    }
}

/// The events of one calendar, in fetch order.
#[derive(Debug, Clone, Default)]
pub struct EventStream {
    /// Display name of the calendar (e.g. "Work", "you@example.com").
    pub calendar: String,
    pub events: Vec<RawEvent>,
}

/// The `(start, end)` instants of a timed event in `tz`, as written.
///
/// Returns `Ok(None)` for all-day and cancelled events. Unlike
/// [`busy_interval`] the pair is not validated, so an inverted event comes
/// back as is.
///
/// # Errors
/// `GapError::InvalidTimestamp` for unparseable timestamps, `GapError::MissingEnd`
/// for a timed start without a timed end.
pub fn event_span(event: &RawEvent, tz: Tz) -> Result<Option<(DateTime<Tz>, DateTime<Tz>)>> {
    if event.is_cancelled() {
        return Ok(None);
    }
    let Some(start_raw) = event.start.date_time.as_deref() else {
        return Ok(None);
    };
    let end_time = event.end.as_ref().ok_or(GapError::MissingEnd)?;
    let end_raw = end_time.date_time.as_deref().ok_or(GapError::MissingEnd)?;

    let start = parse_instant(start_raw, event.start.time_zone.as_deref(), tz)?;
    let end = parse_instant(end_raw, end_time.time_zone.as_deref(), tz)?;
    Ok(Some((start, end)))
}

/// Convert one raw event into a busy interval in `tz`.
///
/// Returns `Ok(None)` for events that carry no busy time: all-day and
/// cancelled events, and events whose end does not follow their start.
///
/// # Errors
/// See [`event_span`].
pub fn busy_interval(event: &RawEvent, tz: Tz) -> Result<Option<Interval>> {
    let Some((start, end)) = event_span(event, tz)? else {
        return Ok(None);
    };

    let interval = Interval::new(start, end);
    if interval.is_none() {
        warn!(
            event = event.id.as_deref().unwrap_or("<no id>"),
            %start,
            %end,
            "dropping event whose end does not follow its start"
        );
    }
    Ok(interval)
}

/// Normalize a flat list of raw events into busy intervals sorted by start.
///
/// The sort is stable: events sharing a start time keep their input order.
pub fn normalize_events(events: &[RawEvent], tz: Tz) -> Result<Vec<Interval>> {
    let mut busy = Vec::with_capacity(events.len());
    for event in events {
        if let Some(interval) = busy_interval(event, tz)? {
            busy.push(interval);
        }
    }
    busy.sort_by_key(Interval::start);

    debug!(
        fetched = events.len(),
        busy = busy.len(),
        "normalized calendar events"
    );
    Ok(busy)
}

/// Merge several calendars, in the order given, then normalize.
///
/// Across calendars, events with identical start times keep stream order; the
/// order in which streams are supplied is the caller's choice.
pub fn normalize_streams(streams: &[EventStream], tz: Tz) -> Result<Vec<Interval>> {
    let all_events: Vec<RawEvent> = streams
        .iter()
        .flat_map(|s| s.events.iter().cloned())
        .collect();
    normalize_events(&all_events, tz)
}

/// Parse a `dateTime` value into an instant in `target`.
///
/// Values with an offset keep their absolute time. Offset-less values are read
/// as wall-clock time in `event_tz`, or in `target` when the event names none.
pub fn parse_instant(value: &str, event_tz: Option<&str>, target: Tz) -> Result<DateTime<Tz>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&target));
    }

    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .ok_or_else(|| GapError::InvalidTimestamp {
            value: value.to_string(),
            reason: "expected an RFC 3339 date-time".to_string(),
        })?;

    let zone = match event_tz {
        Some(name) => parse_timezone(name)?,
        None => target,
    };
    Ok(resolve_local(zone, naive)?.with_timezone(&target))
}
