//! The validated inputs of a free-time computation.

use chrono::{DateTime, NaiveTime};
use chrono_tz::Tz;

use crate::clamp::ClampWindow;
use crate::dst::resolve_local;
use crate::error::{GapError, Result};
use crate::range::DateRange;

/// Range, daily clamp and target timezone for one availability run.
///
/// Each part is validated on construction, so a query that exists is one the
/// gap finder can run. The timezone is always explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailabilityQuery {
    pub range: DateRange,
    pub clamp: ClampWindow,
    pub timezone: Tz,
}

impl AvailabilityQuery {
    pub fn new(range: DateRange, clamp: ClampWindow, timezone: Tz) -> Self {
        Self {
            range,
            clamp,
            timezone,
        }
    }

    /// The instants bounding the whole range: midnight of the first day to
    /// midnight after the last day. Calendar sources are queried with these.
    pub fn window(&self) -> Result<(DateTime<Tz>, DateTime<Tz>)> {
        let start = resolve_local(self.timezone, self.range.start().and_time(NaiveTime::MIN))?;
        let end = resolve_local(self.timezone, self.range.end().and_time(NaiveTime::MIN))?;
        Ok((start, end))
    }
}

/// Look up an IANA timezone name.
///
/// # Errors
/// Returns `GapError::InvalidTimezone` for unknown names.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.trim()
        .parse()
        .map_err(|_| GapError::InvalidTimezone(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};

    #[test]
    fn parses_iana_names() {
        assert_eq!(parse_timezone("America/New_York").unwrap(), Tz::America__New_York);
        assert_eq!(parse_timezone("UTC").unwrap(), Tz::UTC);
        assert!(matches!(
            parse_timezone("Mars/Olympus_Mons"),
            Err(GapError::InvalidTimezone(_))
        ));
    }

    #[test]
    fn window_spans_whole_days() {
        let range = DateRange::inclusive(
            NaiveDate::from_ymd_opt(2024, 3, 11).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 12).unwrap(),
        )
        .unwrap();
        let query = AvailabilityQuery::new(range, ClampWindow::default(), Tz::Asia__Tokyo);
        let (start, end) = query.window().unwrap();
        assert_eq!(start.hour(), 0);
        assert_eq!(end.date_naive(), NaiveDate::from_ymd_opt(2024, 3, 13).unwrap());
        assert_eq!((end - start).num_hours(), 48);
    }
}
