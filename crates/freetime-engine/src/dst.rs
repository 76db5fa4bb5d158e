//! Resolution of wall-clock times across DST transitions.

use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, Offset, TimeZone};
use chrono_tz::Tz;

use crate::error::{GapError, Result};

/// Resolve a local wall-clock time to an instant in `tz`.
///
/// - A time inside a fall-back fold resolves to the earlier of the two instants.
/// - A time inside a spring-forward gap is shifted forward by the length of the
///   gap (02:30 on a 02:00 -> 03:00 transition becomes 03:30).
pub fn resolve_local(tz: Tz, local: NaiveDateTime) -> Result<DateTime<Tz>> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => Ok(dt),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest),
        LocalResult::None => {
            // Apply the offset in force just before the gap.
            let before = tz
                .offset_from_local_datetime(&(local - Duration::hours(3)))
                .earliest()
                .ok_or(GapError::NonexistentLocalTime(local))?;
            let utc = local - Duration::seconds(i64::from(before.fix().local_minus_utc()));
            Ok(tz.from_utc_datetime(&utc))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};
    use chrono_tz::America::New_York;

    fn local(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn ordinary_time_is_unchanged() {
        let dt = resolve_local(New_York, local(2024, 3, 11, 9, 0)).unwrap();
        assert_eq!(dt.naive_local(), local(2024, 3, 11, 9, 0));
    }

    #[test]
    fn spring_forward_gap_shifts_forward() {
        // 2024-03-10 02:00 EST -> 03:00 EDT
        let dt = resolve_local(New_York, local(2024, 3, 10, 2, 30)).unwrap();
        assert_eq!(dt.hour(), 3);
        assert_eq!(dt.minute(), 30);
    }

    #[test]
    fn fall_back_fold_takes_earlier_instant() {
        // 2024-11-03 01:30 happens twice; EDT (-4) comes first.
        let dt = resolve_local(New_York, local(2024, 11, 3, 1, 30)).unwrap();
        assert_eq!(dt.offset().fix().local_minus_utc(), -4 * 3600);
    }
}
