//! Human-readable and JSON rendering of free intervals.

use chrono::NaiveDate;

use crate::availability::FreeSlot;
use crate::error::Result;
use crate::interval::Interval;
use crate::query::AvailabilityQuery;

const DAY_FORMAT: &str = "%a, %m/%d";
const TIME_FORMAT: &str = "%-I:%M %p";
const HEADER_DATE_FORMAT: &str = "%a, %m/%d/%Y";

/// `"Mon, 03/11 from 9:00 AM to 12:00 PM"`.
///
/// Start and end of a free interval always share a date, so the date is
/// printed once.
pub fn format_free_interval(interval: &Interval) -> String {
    format!(
        "{} from {} to {}",
        interval.start().format(DAY_FORMAT),
        interval.start().format(TIME_FORMAT),
        interval.end().format(TIME_FORMAT)
    )
}

/// `"Free time from Mon, 03/11/2024 to Tue, 03/12/2024 (America/New_York):"`.
///
/// The end date shown is the last day included in the range.
pub fn format_header(query: &AvailabilityQuery) -> String {
    format!(
        "Free time from {} to {} ({}):",
        format_date(query.range.start()),
        format_date(query.range.last_day()),
        query.timezone.name()
    )
}

fn format_date(date: NaiveDate) -> String {
    date.format(HEADER_DATE_FORMAT).to_string()
}

/// Header plus one line per free interval.
pub fn render_text(query: &AvailabilityQuery, free: &[Interval]) -> String {
    let mut out = format_header(query);
    out.push('\n');
    if free.is_empty() {
        out.push_str("No free time in range.\n");
    }
    for interval in free {
        out.push_str(&format_free_interval(interval));
        out.push('\n');
    }
    out
}

/// Pretty-printed JSON array of `{start, end, duration_minutes}` records,
/// usually [`crate::Availability::slots`].
pub fn render_json(slots: &[FreeSlot]) -> Result<String> {
    Ok(serde_json::to_string_pretty(slots)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clamp::ClampWindow;
    use crate::range::DateRange;
    use chrono::TimeZone;
    use chrono_tz::America::New_York;

    fn query() -> AvailabilityQuery {
        let range = DateRange::inclusive(
            NaiveDate::from_ymd_opt(2024, 3, 11).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 12).unwrap(),
        )
        .unwrap();
        AvailabilityQuery::new(range, ClampWindow::default(), New_York)
    }

    fn interval(h1: u32, m1: u32, h2: u32, m2: u32) -> Interval {
        Interval::new(
            New_York.with_ymd_and_hms(2024, 3, 11, h1, m1, 0).unwrap(),
            New_York.with_ymd_and_hms(2024, 3, 11, h2, m2, 0).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn formats_twelve_hour_times_without_padding() {
        assert_eq!(
            format_free_interval(&interval(9, 0, 11, 30)),
            "Mon, 03/11 from 9:00 AM to 11:30 AM"
        );
        assert_eq!(
            format_free_interval(&interval(13, 0, 18, 0)),
            "Mon, 03/11 from 1:00 PM to 6:00 PM"
        );
    }

    #[test]
    fn header_shows_inclusive_end_and_zone() {
        assert_eq!(
            format_header(&query()),
            "Free time from Mon, 03/11/2024 to Tue, 03/12/2024 (America/New_York):"
        );
    }

    #[test]
    fn empty_result_says_so() {
        let text = render_text(&query(), &[]);
        assert!(text.ends_with("No free time in range.\n"));
    }

    #[test]
    fn json_carries_offsets_and_durations() {
        let json = render_json(&[FreeSlot::from(&interval(9, 0, 12, 0))]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["duration_minutes"], 180);
        assert_eq!(value[0]["start"], "2024-03-11T09:00:00-04:00");
    }
}
