//! Daily clamp windows: the hours of each day considered available.

use chrono::{DateTime, NaiveDate, NaiveTime};
use chrono_tz::Tz;
use tracing::debug;

use crate::dst::resolve_local;
use crate::error::{GapError, Result};

/// Time-of-day formats accepted after normalisation (uppercased, spaces removed,
/// missing minutes filled in).
const TIME_FORMATS: &[&str] = &["%I:%M%p", "%I:%M:%S%p", "%H:%M", "%H:%M:%S"];

/// A daily window `[start, end)` expressed as times of day.
///
/// The same window applies to every day of a range; only the date moves when
/// the gap finder rolls over to the next day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClampWindow {
    start: NaiveTime,
    end: NaiveTime,
}

impl ClampWindow {
    /// # Errors
    /// Returns `GapError::InvalidClamp` unless `start < end`.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self> {
        if end <= start {
            return Err(GapError::InvalidClamp { start, end });
        }
        Ok(Self { start, end })
    }

    /// Parse both bounds with [`parse_time_of_day`] and validate the pair.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Self::new(parse_time_of_day(start)?, parse_time_of_day(end)?)
    }

    pub fn start_time(&self) -> NaiveTime {
        self.start
    }

    pub fn end_time(&self) -> NaiveTime {
        self.end
    }

    /// Resolve the window on `date` in `tz`, yielding `(clamp_start, clamp_end)`.
    ///
    /// A DST transition can swallow the whole window on one date (02:00-03:00
    /// on a spring-forward day). That date then gets an empty window,
    /// `clamp_start == clamp_end`, and contributes no free time.
    ///
    /// # Errors
    /// Only wall-clock resolution can fail, see [`resolve_local`].
    pub fn on(&self, date: NaiveDate, tz: Tz) -> Result<(DateTime<Tz>, DateTime<Tz>)> {
        let start = resolve_local(tz, date.and_time(self.start))?;
        let end = resolve_local(tz, date.and_time(self.end))?;
        if end <= start {
            debug!(%date, %start, %end, "clamp window collapsed by a DST transition");
            return Ok((start, start));
        }
        Ok((start, end))
    }
}

impl Default for ClampWindow {
    /// Working hours, 09:00 to 18:00.
    fn default() -> Self {
        Self {
            start: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN),
            end: NaiveTime::from_hms_opt(18, 0, 0).unwrap_or(NaiveTime::MIN),
        }
    }
}

/// Parse a human-entered time of day.
///
/// Accepts 24-hour (`17:30`, `09:00:00`) and 12-hour (`5:30 PM`, `5:30pm`,
/// `5 PM`, `5pm`) forms.
///
/// # Errors
/// Returns `GapError::InvalidTime` when none of the formats match.
pub fn parse_time_of_day(input: &str) -> Result<NaiveTime> {
    let mut normalized: String = input
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase();

    let has_meridiem = normalized.ends_with("AM") || normalized.ends_with("PM");
    if has_meridiem && !normalized.contains(':') {
        let split = normalized.len() - 2;
        normalized.insert_str(split, ":00");
    }

    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(&normalized, fmt).ok())
        .ok_or_else(|| GapError::InvalidTime(input.to_string()))
}
