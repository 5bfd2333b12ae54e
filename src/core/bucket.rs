use chrono::{Datelike, Days, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{AgendaError, Result};

/// Calendar unit a bucket spans. Weeks start on Monday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    Week,
    Month,
    Year,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }

    /// First calendar day of the unit containing `date`. `None` when that
    /// day is before chrono's earliest date.
    pub fn start_of(&self, date: NaiveDate) -> Option<NaiveDate> {
        match self {
            Self::Day => Some(date),
            Self::Week => {
                let back = Days::new(date.weekday().num_days_from_monday() as u64);
                date.checked_sub_days(back)
            }
            Self::Month => date.with_day(1),
            Self::Year => NaiveDate::from_ymd_opt(date.year(), 1, 1),
        }
    }

    /// Move `date` by `n` units. Month and year shifts clamp to the last
    /// day of the target month. `None` when the result leaves chrono's range.
    pub fn shift(&self, date: NaiveDate, n: i64) -> Option<NaiveDate> {
        let magnitude = n.unsigned_abs();
        match self {
            Self::Day | Self::Week => {
                let per_unit = if matches!(self, Self::Week) { 7 } else { 1 };
                let days = Days::new(magnitude.checked_mul(per_unit)?);
                if n >= 0 {
                    date.checked_add_days(days)
                } else {
                    date.checked_sub_days(days)
                }
            }
            Self::Month | Self::Year => {
                let per_unit = if matches!(self, Self::Year) { 12 } else { 1 };
                let months = Months::new(u32::try_from(magnitude.checked_mul(per_unit)?).ok()?);
                if n >= 0 {
                    date.checked_add_months(months)
                } else {
                    date.checked_sub_months(months)
                }
            }
        }
    }
}

impl FromStr for Granularity {
    type Err = AgendaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            _ => Err(AgendaError::InvalidGranularity(s.to_string())),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An inclusive `[start, end]` interval covering one calendar unit.
///
/// `end` is the last representable instant before the next bucket starts,
/// so consecutive buckets leave no gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBucket {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub granularity: Granularity,
}

impl TimeBucket {
    /// The bucket of the given unit that contains `instant`.
    pub fn containing(instant: NaiveDateTime, granularity: Granularity) -> Result<Self> {
        let first_day = granularity
            .start_of(instant.date())
            .ok_or(AgendaError::DateOutOfRange)?;
        Self::starting_on(first_day, granularity)
    }

    fn starting_on(first_day: NaiveDate, granularity: Granularity) -> Result<Self> {
        let next = granularity
            .shift(first_day, 1)
            .ok_or(AgendaError::DateOutOfRange)?;
        let start = first_day.and_time(NaiveTime::MIN);
        let end = next.and_time(NaiveTime::MIN) - Duration::nanoseconds(1);
        Ok(Self {
            start,
            end,
            granularity,
        })
    }

    /// The bucket immediately after this one.
    pub fn next(&self) -> Result<Self> {
        let first_day = self
            .granularity
            .shift(self.start.date(), 1)
            .ok_or(AgendaError::DateOutOfRange)?;
        Self::starting_on(first_day, self.granularity)
    }

    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start <= instant && instant <= self.end
    }

    pub fn overlaps(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        self.start <= end && start <= self.end
    }

    pub fn is_current(&self, now: NaiveDateTime) -> bool {
        self.contains(now)
    }

    pub fn is_past(&self, now: NaiveDateTime) -> bool {
        self.end < now
    }
}

/// `count` contiguous buckets starting with the one containing `reference`.
pub fn buckets_for(
    reference: NaiveDate,
    granularity: Granularity,
    count: usize,
) -> Result<Vec<TimeBucket>> {
    let mut buckets = Vec::with_capacity(count);
    if count == 0 {
        return Ok(buckets);
    }
    let mut current = TimeBucket::containing(reference.and_time(NaiveTime::MIN), granularity)?;
    buckets.push(current);
    while buckets.len() < count {
        current = current.next()?;
        buckets.push(current);
    }
    log::debug!(
        "built {} {} buckets from {}",
        buckets.len(),
        granularity,
        reference
    );
    Ok(buckets)
}

/// Same as [`buckets_for`] with the unit given by name.
pub fn buckets_for_unit(reference: NaiveDate, unit: &str, count: usize) -> Result<Vec<TimeBucket>> {
    buckets_for(reference, unit.parse()?, count)
}

/// Every bucket of `granularity` that intersects `[start, end]`.
pub fn buckets_spanning(
    start: NaiveDateTime,
    end: NaiveDateTime,
    granularity: Granularity,
) -> Result<Vec<TimeBucket>> {
    let mut buckets = Vec::new();
    if end < start {
        return Ok(buckets);
    }
    let mut current = TimeBucket::containing(start, granularity)?;
    while current.start <= end {
        buckets.push(current);
        if current.end >= end {
            break;
        }
        current = current.next()?;
    }
    Ok(buckets)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn assert_contiguous(buckets: &[TimeBucket]) {
        for pair in buckets.windows(2) {
            assert!(pair[0].start < pair[0].end);
            assert_eq!(pair[0].end + Duration::nanoseconds(1), pair[1].start);
        }
    }

    #[test]
    fn seven_day_buckets() {
        let buckets = buckets_for(date(2024, 1, 15), Granularity::Day, 7).unwrap();
        assert_eq!(buckets.len(), 7);
        assert_eq!(buckets[0].start.date(), date(2024, 1, 15));
        assert_eq!(buckets[6].start.date(), date(2024, 1, 21));
        assert_eq!(buckets[6].end.date(), date(2024, 1, 21));
        assert_contiguous(&buckets);
    }

    #[test]
    fn week_buckets_start_monday() {
        // 2024-01-18 is a Thursday
        let buckets = buckets_for(date(2024, 1, 18), Granularity::Week, 3).unwrap();
        assert_eq!(buckets[0].start.date(), date(2024, 1, 15));
        assert_eq!(buckets[0].end.date(), date(2024, 1, 21));
        assert_eq!(buckets[2].start.date(), date(2024, 1, 29));
        assert_contiguous(&buckets);
    }

    #[test]
    fn week_of_sunday_belongs_to_previous_monday() {
        let sunday_noon = date(2024, 1, 21).and_hms_opt(12, 0, 0).unwrap();
        let bucket = TimeBucket::containing(sunday_noon, Granularity::Week).unwrap();
        assert_eq!(bucket.start.date(), date(2024, 1, 15));
    }

    #[test]
    fn month_buckets_have_variable_length() {
        let buckets = buckets_for(date(2024, 1, 31), Granularity::Month, 3).unwrap();
        assert_eq!(buckets[0].start.date(), date(2024, 1, 1));
        assert_eq!(buckets[0].end.date(), date(2024, 1, 31));
        assert_eq!(buckets[1].end.date(), date(2024, 2, 29));
        assert_eq!(buckets[2].end.date(), date(2024, 3, 31));
        assert_contiguous(&buckets);
    }

    #[test]
    fn year_buckets() {
        let buckets = buckets_for(date(2023, 7, 4), Granularity::Year, 2).unwrap();
        assert_eq!(buckets[0].start.date(), date(2023, 1, 1));
        assert_eq!(buckets[1].end.date(), date(2024, 12, 31));
        assert_contiguous(&buckets);
    }

    #[test]
    fn week_before_earliest_date_is_out_of_range() {
        // NaiveDate::MIN is not a Monday, so its week starts before it.
        assert!(matches!(
            buckets_for(NaiveDate::MIN, Granularity::Week, 1),
            Err(AgendaError::DateOutOfRange)
        ));
        assert!(matches!(
            buckets_for(NaiveDate::MAX, Granularity::Day, 1),
            Err(AgendaError::DateOutOfRange)
        ));
    }

    #[test]
    fn zero_count_is_empty() {
        assert!(buckets_for(date(2024, 1, 15), Granularity::Day, 0)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn end_is_inclusive() {
        let bucket = buckets_for(date(2024, 1, 15), Granularity::Day, 1).unwrap()[0];
        let last_instant = date(2024, 1, 15)
            .and_hms_nano_opt(23, 59, 59, 999_999_999)
            .unwrap();
        assert!(bucket.contains(last_instant));
        assert!(!bucket.contains(date(2024, 1, 16).and_hms_opt(0, 0, 0).unwrap()));
    }

    #[test]
    fn unit_names_parse() {
        assert_eq!("Week".parse::<Granularity>().unwrap(), Granularity::Week);
        assert!(matches!(
            buckets_for_unit(date(2024, 1, 15), "fortnight", 2),
            Err(AgendaError::InvalidGranularity(ref unit)) if unit == "fortnight"
        ));
    }

    #[test]
    fn spanning_a_month_by_weeks() {
        let start = date(2024, 2, 1).and_hms_opt(0, 0, 0).unwrap();
        let end = date(2024, 2, 29).and_hms_opt(23, 59, 59).unwrap();
        let weeks = buckets_spanning(start, end, Granularity::Week).unwrap();
        assert_eq!(weeks.len(), 5);
        assert_eq!(weeks[0].start.date(), date(2024, 1, 29));
        assert_eq!(weeks[4].start.date(), date(2024, 2, 26));
    }

    #[test]
    fn spanning_inverted_range_is_empty() {
        let start = date(2024, 2, 10).and_hms_opt(0, 0, 0).unwrap();
        let end = date(2024, 2, 1).and_hms_opt(0, 0, 0).unwrap();
        assert!(buckets_spanning(start, end, Granularity::Day).unwrap().is_empty());
    }

    #[test]
    fn negative_month_shift_clamps() {
        assert_eq!(Granularity::Month.shift(date(2024, 3, 31), -1), Some(date(2024, 2, 29)));
        assert_eq!(Granularity::Week.shift(date(2024, 1, 15), -2), Some(date(2024, 1, 1)));
    }

    #[test]
    fn past_and_current() {
        let bucket = buckets_for(date(2024, 1, 15), Granularity::Day, 1).unwrap()[0];
        let noon = date(2024, 1, 15).and_hms_opt(12, 0, 0).unwrap();
        let later = date(2024, 1, 17).and_hms_opt(8, 0, 0).unwrap();
        assert!(bucket.is_current(noon));
        assert!(!bucket.is_past(noon));
        assert!(bucket.is_past(later));
    }
}
