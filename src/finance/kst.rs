//! Korea Standard Time (UTC+9) calendar boundaries.
//!
//! Everything is stored as UTC instants. "Today" and "this month" always mean
//! the KST calendar day/month, so every conversion shifts the instant by the
//! fixed offset first and only then reads calendar fields.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use serde::Serialize;
use thiserror::Error;

/// KST has no daylight saving time.
pub const KST_OFFSET_HOURS: i64 = 9;
pub const KST_OFFSET_MS: i64 = KST_OFFSET_HOURS * 60 * 60 * 1000;
pub const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// `end - start` of any KST day range (end is the last included millisecond).
pub const DAY_SPAN_MS: i64 = MS_PER_DAY - 1;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DateError {
    #[error("Invalid month: {0}")]
    InvalidMonth(u32),

    #[error("Invalid date: {year}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },

    #[error("Day count must be at least 1")]
    EmptyRange,

    #[error("Timestamp out of range: {0}")]
    OutOfRange(i64),
}

/// Calendar fields of an instant as seen in KST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KstDateTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    /// 0 = Sunday
    pub weekday: u32,
    pub hour: u32,
    pub minute: u32,
}

/// Inclusive UTC range `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    pub fn start_ms(&self) -> i64 {
        self.start.timestamp_millis()
    }

    pub fn end_ms(&self) -> i64 {
        self.end.timestamp_millis()
    }

    #[cfg(test)]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }
}

fn shift(instant: DateTime<Utc>) -> NaiveDateTime {
    instant.naive_utc() + Duration::hours(KST_OFFSET_HOURS)
}

pub fn to_kst(instant: DateTime<Utc>) -> KstDateTime {
    let local = shift(instant);
    KstDateTime {
        year: local.year(),
        month: local.month(),
        day: local.day(),
        weekday: local.weekday().num_days_from_sunday(),
        hour: local.hour(),
        minute: local.minute(),
    }
}

/// KST calendar date of an instant.
pub fn kst_date(instant: DateTime<Utc>) -> NaiveDate {
    shift(instant).date()
}

/// (year, month) of the instant in KST.
pub fn kst_year_month(instant: DateTime<Utc>) -> (i32, u32) {
    let date = kst_date(instant);
    (date.year(), date.month())
}

/// Days since the epoch counted in KST. Same bucketing the SQL day grouping uses.
pub fn kst_day_number(instant: DateTime<Utc>) -> i64 {
    (instant.timestamp_millis() + KST_OFFSET_MS).div_euclid(MS_PER_DAY)
}

/// Inverse of [`kst_day_number`].
pub fn date_from_day_number(day_number: i64) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(1970, 1, 1)?.checked_add_signed(Duration::days(day_number))
}

pub fn from_millis(ms: i64) -> Result<DateTime<Utc>, DateError> {
    DateTime::from_timestamp_millis(ms).ok_or(DateError::OutOfRange(ms))
}

/// UTC range covering the KST calendar day `date`.
pub fn date_range(date: NaiveDate) -> TimeRange {
    let start = (date.and_time(NaiveTime::MIN) - Duration::hours(KST_OFFSET_HOURS)).and_utc();
    TimeRange {
        start,
        end: start + Duration::milliseconds(DAY_SPAN_MS),
    }
}

pub fn day_range(year: i32, month: u32, day: u32) -> Result<TimeRange, DateError> {
    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or(DateError::InvalidDate { year, month, day })?;
    Ok(date_range(date))
}

pub fn today_range(now: DateTime<Utc>) -> TimeRange {
    date_range(kst_date(now))
}

pub fn first_of_month(year: i32, month: u32) -> Result<NaiveDate, DateError> {
    if !(1..=12).contains(&month) {
        return Err(DateError::InvalidMonth(month));
    }
    NaiveDate::from_ymd_opt(year, month, 1).ok_or(DateError::InvalidDate { year, month, day: 1 })
}

pub fn days_in_month(year: i32, month: u32) -> Result<u32, DateError> {
    let first = first_of_month(year, month)?;
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    let next = first_of_month(next_year, next_month)?;
    Ok((next - first).num_days() as u32)
}

/// `[first-of-month 00:00:00.000 KST, last-of-month 23:59:59.999 KST]`.
pub fn month_range(year: i32, month: u32) -> Result<TimeRange, DateError> {
    let first = first_of_month(year, month)?;
    let last_day = days_in_month(year, month)?;
    let last = NaiveDate::from_ymd_opt(year, month, last_day).ok_or(DateError::InvalidDate {
        year,
        month,
        day: last_day,
    })?;

    Ok(TimeRange {
        start: date_range(first).start,
        end: date_range(last).end,
    })
}

/// The last `n` KST calendar days, oldest first, ending today.
pub fn last_n_days(now: DateTime<Utc>, n: u32) -> Result<Vec<NaiveDate>, DateError> {
    if n == 0 {
        return Err(DateError::EmptyRange);
    }
    let today = kst_date(now);
    Ok((0..n)
        .rev()
        .map(|back| today - Duration::days(i64::from(back)))
        .collect())
}

pub fn last_n_days_range(now: DateTime<Utc>, n: u32) -> Result<TimeRange, DateError> {
    let days = last_n_days(now, n)?;
    let first = days[0];
    Ok(TimeRange {
        start: date_range(first).start,
        end: today_range(now).end,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn late_utc_evening_is_next_day_in_kst() {
        // 2024-03-31 15:30 UTC is 2024-04-01 00:30 KST (a Monday)
        let kst = to_kst(utc(2024, 3, 31, 15, 30));
        assert_eq!((kst.year, kst.month, kst.day), (2024, 4, 1));
        assert_eq!((kst.hour, kst.minute), (0, 30));
        assert_eq!(kst.weekday, 1);
    }

    #[test]
    fn new_year_crossing() {
        let kst = to_kst(utc(2024, 12, 31, 20, 0));
        assert_eq!((kst.year, kst.month, kst.day), (2025, 1, 1));
        assert_eq!(kst.weekday, 3);
    }

    #[test]
    fn day_range_starts_at_kst_midnight() {
        let range = day_range(2025, 1, 15).unwrap();
        assert_eq!(range.start, utc(2025, 1, 14, 15, 0));
        assert_eq!(range.end_ms() - range.start_ms(), DAY_SPAN_MS);
        assert_eq!(range.end_ms() - range.start_ms(), 86_399_999);
    }

    #[test]
    fn today_range_contains_now_for_every_hour() {
        for hour in 0..24 {
            let now = utc(2025, 6, 10, hour, 45);
            let range = today_range(now);
            assert!(range.contains(now), "hour {hour}");
            assert_eq!(range.end_ms() - range.start_ms(), DAY_SPAN_MS);
            assert_eq!(kst_date(range.start), kst_date(now));
            assert_eq!(kst_date(range.end), kst_date(now));
        }
    }

    #[test]
    fn days_in_month_is_computed() {
        assert_eq!(days_in_month(2024, 2).unwrap(), 29);
        assert_eq!(days_in_month(2025, 2).unwrap(), 28);
        assert_eq!(days_in_month(2100, 2).unwrap(), 28);
        assert_eq!(days_in_month(2025, 4).unwrap(), 30);
        assert_eq!(days_in_month(2025, 12).unwrap(), 31);
        assert_eq!(days_in_month(2025, 13), Err(DateError::InvalidMonth(13)));
    }

    #[test]
    fn month_range_spans_whole_month() {
        for month in 1..=12 {
            let range = month_range(2024, month).unwrap();
            assert!(range.start < range.end);
            let days = i64::from(days_in_month(2024, month).unwrap());
            assert_eq!(range.end_ms() - range.start_ms() + 1, days * MS_PER_DAY);
            assert_eq!(kst_date(range.start).day(), 1);
            assert_eq!(kst_date(range.end).month(), month);
        }
    }

    #[test]
    fn invalid_calendar_input_is_rejected() {
        assert_eq!(month_range(2025, 0), Err(DateError::InvalidMonth(0)));
        assert!(matches!(
            day_range(2025, 4, 31),
            Err(DateError::InvalidDate { day: 31, .. })
        ));
    }

    #[test]
    fn last_n_days_is_chronological_and_ends_today() {
        let now = utc(2025, 3, 2, 16, 0); // 2025-03-03 01:00 KST
        let days = last_n_days(now, 7).unwrap();
        assert_eq!(days.len(), 7);
        assert_eq!(days[0], NaiveDate::from_ymd_opt(2025, 2, 25).unwrap());
        assert_eq!(days[6], NaiveDate::from_ymd_opt(2025, 3, 3).unwrap());
        assert!(days.windows(2).all(|w| w[0] < w[1]));

        let range = last_n_days_range(now, 7).unwrap();
        assert_eq!(range.end_ms() - range.start_ms() + 1, 7 * MS_PER_DAY);
        assert_eq!(last_n_days(now, 0), Err(DateError::EmptyRange));
    }

    #[test]
    fn day_number_round_trips() {
        let now = utc(2025, 8, 14, 23, 59);
        let number = kst_day_number(now);
        assert_eq!(date_from_day_number(number), Some(kst_date(now)));
        assert_eq!(kst_day_number(date_range(kst_date(now)).start), number);
        assert_eq!(kst_day_number(date_range(kst_date(now)).end), number);
    }
}
