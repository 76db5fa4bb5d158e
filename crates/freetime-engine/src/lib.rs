//! # freetime-engine
//!
//! Free-time computation over busy calendar events.
//!
//! Given busy events, a range of days and a daily clamp window (working
//! hours), the engine walks the events once in chronological order and emits
//! the free intervals of every day, handling overlapping and nested events,
//! events spanning several days and days with no events at all.
//!
//! ## Modules
//!
//! - [`normalize`] — raw calendar events → sorted busy intervals
//! - [`gaps`] — busy intervals → free intervals, one clamp window per day
//! - [`availability`] — both steps over several calendars, plus summaries
//! - [`render`] — text and JSON output
//! - [`interval`], [`clamp`], [`range`], [`query`] — value types
//! - [`dst`] — wall-clock resolution across DST transitions
//! - [`error`] — Error types

pub mod availability;
pub mod clamp;
pub mod dst;
pub mod error;
pub mod gaps;
pub mod interval;
pub mod normalize;
pub mod query;
pub mod range;
pub mod render;

pub use availability::{Availability, FreeSlot};
pub use clamp::{parse_time_of_day, ClampWindow};
pub use error::GapError;
pub use gaps::{find_free_intervals, DayCursor};
pub use interval::Interval;
pub use normalize::{normalize_events, normalize_streams, EventStream, EventTime, RawEvent};
pub use query::{parse_timezone, AvailabilityQuery};
pub use range::DateRange;
