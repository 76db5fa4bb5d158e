//! The span of calendar days being analysed.

use chrono::{Days, NaiveDate};

use crate::error::{GapError, Result};

/// Half-open range of calendar days `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Build a range from an exclusive end date.
    ///
    /// # Errors
    /// Returns `GapError::InvalidRange` unless `start < end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end <= start {
            return Err(GapError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Build a range that includes `last`, as entered by a user.
    pub fn inclusive(start: NaiveDate, last: NaiveDate) -> Result<Self> {
        let end = last
            .checked_add_days(Days::new(1))
            .ok_or(GapError::InvalidRange { start, end: last })?;
        Self::new(start, end)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// First day after the range.
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Last day inside the range.
    pub fn last_day(&self) -> NaiveDate {
        self.end.pred_opt().unwrap_or(self.start)
    }

    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }

    /// Every day in the range, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d < end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn inclusive_end_adds_one_day() {
        let range = DateRange::inclusive(date(2024, 3, 11), date(2024, 3, 12)).unwrap();
        assert_eq!(range.end(), date(2024, 3, 13));
        assert_eq!(range.last_day(), date(2024, 3, 12));
        assert_eq!(range.num_days(), 2);
        assert_eq!(
            range.days().collect::<Vec<_>>(),
            vec![date(2024, 3, 11), date(2024, 3, 12)]
        );
    }

    #[test]
    fn single_day_range_is_valid() {
        let range = DateRange::inclusive(date(2024, 3, 11), date(2024, 3, 11)).unwrap();
        assert_eq!(range.num_days(), 1);
        assert!(range.contains(date(2024, 3, 11)));
        assert!(!range.contains(date(2024, 3, 12)));
    }

    #[test]
    fn empty_or_inverted_range_is_rejected() {
        assert!(matches!(
            DateRange::new(date(2024, 3, 11), date(2024, 3, 11)),
            Err(GapError::InvalidRange { .. })
        ));
        assert!(DateRange::inclusive(date(2024, 3, 11), date(2024, 3, 10)).is_err());
    }
}
