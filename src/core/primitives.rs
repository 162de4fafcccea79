use chrono::{DateTime, Datelike, Days, Local, Months, NaiveDate, NaiveTime, TimeDelta, Utc};

use crate::error::{ChartError, ChartResult};

pub const MILLIS_PER_DAY: i64 = 86_400_000;

/// Parses a zoneless ISO date (`YYYY-MM-DD`) or an RFC 3339 timestamp.
///
/// Timestamps are reduced to their UTC calendar date.
pub fn parse_iso_date(value: &str) -> ChartResult<NaiveDate> {
    let trimmed = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|time| time.with_timezone(&Utc).date_naive())
        .map_err(|_| ChartError::InvalidDate(value.to_owned()))
}

/// UTC midnight of `date` in milliseconds since the epoch.
#[must_use]
pub fn date_to_millis(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp_millis()
}

/// UTC calendar date containing `millis`.
#[must_use]
pub fn millis_to_date(millis: f64) -> Option<NaiveDate> {
    if !millis.is_finite() {
        return None;
    }
    DateTime::<Utc>::from_timestamp_millis(millis.floor() as i64).map(|time| time.date_naive())
}

/// Millisecond position of a day offset from `t0`.
#[must_use]
pub fn day_offset_millis(t0: NaiveDate, days: i64) -> i64 {
    date_to_millis(t0) + days * MILLIS_PER_DAY
}

pub fn add_days(date: NaiveDate, days: i64) -> ChartResult<NaiveDate> {
    date.checked_add_signed(TimeDelta::days(days))
        .ok_or_else(|| ChartError::InvalidData(format!("{date} + {days} days is out of range")))
}

pub fn add_months(date: NaiveDate, months: u32) -> ChartResult<NaiveDate> {
    date.checked_add_months(Months::new(months))
        .ok_or_else(|| ChartError::InvalidData(format!("{date} + {months} months is out of range")))
}

/// First day of the month following `date`.
pub fn next_month_start(date: NaiveDate) -> ChartResult<NaiveDate> {
    let month_start = date
        .checked_sub_days(Days::new(u64::from(date.day0())))
        .ok_or_else(|| ChartError::InvalidData(format!("{date} has no month start")))?;
    add_months(month_start, 1)
}

/// The wall-calendar date of the host, reinterpreted as a zoneless UTC date.
#[must_use]
pub fn today_utc() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(value: &str) -> NaiveDate {
        parse_iso_date(value).expect("valid date")
    }

    #[test]
    fn parses_plain_and_rfc3339_dates() {
        assert_eq!(date("2020-03-01"), NaiveDate::from_ymd_opt(2020, 3, 1).unwrap());
        assert_eq!(
            date("2020-03-01T23:30:00-02:00"),
            NaiveDate::from_ymd_opt(2020, 3, 2).unwrap()
        );
        assert!(matches!(
            parse_iso_date("03/01/2020"),
            Err(ChartError::InvalidDate(_))
        ));
    }

    #[test]
    fn millis_round_trip_through_utc_midnight() {
        let t0 = date("2020-03-01");
        let millis = day_offset_millis(t0, 3);
        assert_eq!(millis - date_to_millis(t0), 3 * MILLIS_PER_DAY);
        assert_eq!(millis_to_date(millis as f64 + 5_000.0), Some(date("2020-03-04")));
        assert_eq!(millis_to_date(f64::NAN), None);
    }

    #[test]
    fn month_arithmetic_clamps_to_month_end() {
        assert_eq!(add_months(date("2020-01-31"), 1).unwrap(), date("2020-02-29"));
        assert_eq!(next_month_start(date("2020-12-15")).unwrap(), date("2021-01-01"));
        assert_eq!(add_days(date("2020-02-28"), 2).unwrap(), date("2020-03-01"));
    }

    #[test]
    fn today_is_a_start_of_day_on_the_host_calendar() {
        let today = today_utc();
        assert_eq!(today, Local::now().date_naive());
        assert_eq!(date_to_millis(today) % MILLIS_PER_DAY, 0);
        assert_eq!(millis_to_date(date_to_millis(today) as f64), Some(today));
    }
}
