//! Calendar sources: where raw events come from.

use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::DateTime;
use chrono_tz::Tz;
use freetime_engine::normalize::event_span;
use freetime_engine::{EventStream, RawEvent};
use serde::Deserialize;
use tracing::{debug, info};

/// Input name that stands for stdin.
pub const STDIN: &str = "-";

/// Supplies the events of one or more calendars for a time window.
pub trait CalendarSource {
    /// Events overlapping `[time_min, time_max)`, one stream per calendar, in
    /// a stable calendar order. All-day events are passed through untouched.
    fn fetch(&self, time_min: DateTime<Tz>, time_max: DateTime<Tz>) -> Result<Vec<EventStream>>;
}

/// A calendar file: a Google Calendar `events.list` response or a bare array
/// of events.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CalendarDocument {
    List(EventList),
    Events(Vec<RawEvent>),
}

#[derive(Debug, Deserialize)]
struct EventList {
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    items: Vec<RawEvent>,
}

/// Reads calendars from JSON files, or from stdin for [`STDIN`].
#[derive(Debug, Clone)]
pub struct JsonCalendarSource {
    inputs: Vec<String>,
}

impl JsonCalendarSource {
    /// An empty input list reads a single calendar from stdin.
    pub fn new(inputs: Vec<String>) -> Self {
        let inputs = if inputs.is_empty() {
            vec![STDIN.to_string()]
        } else {
            inputs
        };
        Self { inputs }
    }

    fn load(&self, input: &str) -> Result<EventStream> {
        let text = read_input(input)?;
        let document: CalendarDocument = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse calendar JSON from {}", display_name(input)))?;

        let (summary, events) = match document {
            CalendarDocument::List(list) => (list.summary, list.items),
            CalendarDocument::Events(events) => (None, events),
        };
        Ok(EventStream {
            calendar: summary.unwrap_or_else(|| display_name(input)),
            events,
        })
    }
}

impl CalendarSource for JsonCalendarSource {
    fn fetch(&self, time_min: DateTime<Tz>, time_max: DateTime<Tz>) -> Result<Vec<EventStream>> {
        let tz = time_min.timezone();
        let mut streams = Vec::with_capacity(self.inputs.len());

        for input in &self.inputs {
            let mut stream = self.load(input)?;
            let fetched = stream.events.len();
            stream
                .events
                .retain(|event| in_window(event, tz, time_min, time_max));
            debug!(
                calendar = %stream.calendar,
                fetched,
                kept = stream.events.len(),
                "loaded calendar"
            );
            streams.push(stream);
        }

        info!(calendars = streams.len(), "calendars fetched");
        Ok(streams)
    }
}

/// Keep timed events overlapping the window. Inverted, all-day and unreadable
/// events are kept so the normalizer decides (and reports) on them once.
fn in_window(event: &RawEvent, tz: Tz, time_min: DateTime<Tz>, time_max: DateTime<Tz>) -> bool {
    match event_span(event, tz) {
        Ok(Some((start, end))) if start < end => start < time_max && end > time_min,
        Ok(_) | Err(_) => true,
    }
}

fn display_name(input: &str) -> String {
    if input == STDIN {
        return "stdin".to_string();
    }
    Path::new(input)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.to_string())
}

fn read_input(input: &str) -> Result<String> {
    if input == STDIN {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read from stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(input).with_context(|| format!("Failed to read file: {}", input))
}
