// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting and the `YYYY-MM-DD` date key codec.
//!
//! Date keys use local calendar fields; no time zone conversion happens when
//! a key is built from a zoned timestamp.

use crate::error::{AppError, Result};
use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveTime, SecondsFormat, TimeZone, Utc};

const DATE_KEY_PARTS: usize = 3;

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Format a UTC timestamp as RFC3339 with millisecond precision (snapshot wire format).
pub fn format_utc_rfc3339_millis(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Build the `YYYY-MM-DD` key from the calendar fields of `date`.
///
/// For a zoned `DateTime` the fields are those of its own zone.
pub fn to_date_key<D: Datelike>(date: &D) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

/// Date key of an instant, read in the process-local time zone.
pub fn to_local_date_key(instant: DateTime<Utc>) -> String {
    to_date_key(&instant.with_timezone(&Local))
}

/// Parse a `YYYY-MM-DD` key back into a calendar date.
pub fn parse_date_key(key: &str) -> Result<NaiveDate> {
    let invalid = || AppError::InvalidDateKey(key.to_string());

    let parts: Vec<&str> = key.split('-').collect();
    if parts.len() != DATE_KEY_PARTS
        || parts
            .iter()
            .any(|p| p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit()))
    {
        return Err(invalid());
    }

    let year = parts[0].parse::<i32>().map_err(|_| invalid())?;
    let month = parts[1].parse::<u32>().map_err(|_| invalid())?;
    let day = parts[2].parse::<u32>().map_err(|_| invalid())?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

/// Start of `date` in the local time zone, as a UTC instant.
///
/// Ambiguous midnights resolve to the earliest instant; a midnight skipped by
/// a DST jump resolves to one hour later.
pub fn local_midnight(date: NaiveDate) -> DateTime<Utc> {
    let naive = date.and_time(NaiveTime::MIN);
    Local
        .from_local_datetime(&naive)
        .earliest()
        .or_else(|| {
            Local
                .from_local_datetime(&(naive + chrono::Duration::hours(1)))
                .earliest()
        })
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| naive.and_utc())
}

/// The session's "today": the current moment, but never earlier than
/// January 1st of the reference year.
pub fn reference_date(now: DateTime<Utc>, reference_year: i32) -> DateTime<Utc> {
    match NaiveDate::from_ymd_opt(reference_year, 1, 1) {
        Some(first_day) => {
            let base = local_midnight(first_day);
            if now < base {
                base
            } else {
                now
            }
        }
        None => now,
    }
}

/// Number of days in the given month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };

    match (
        NaiveDate::from_ymd_opt(year, month, 1),
        NaiveDate::from_ymd_opt(next_year, next_month, 1),
    ) {
        (Some(start), Some(end)) => (end - start).num_days() as u32,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn test_date_key_is_zero_padded() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        assert_eq!(to_date_key(&date), "2026-03-01");
    }

    #[test]
    fn test_date_key_round_trip_over_leap_years() {
        let mut date = NaiveDate::from_ymd_opt(2023, 12, 25).unwrap();
        let end = NaiveDate::from_ymd_opt(2026, 1, 10).unwrap();

        while date <= end {
            let key = to_date_key(&date);
            assert_eq!(parse_date_key(&key).unwrap(), date, "key {}", key);
            date = date.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_zoned_key_uses_own_calendar_fields() {
        let pacific = FixedOffset::west_opt(8 * 3600).unwrap();
        let instant = Utc.with_ymd_and_hms(2026, 3, 1, 2, 0, 0).unwrap();

        assert_eq!(to_date_key(&instant), "2026-03-01");
        assert_eq!(to_date_key(&instant.with_timezone(&pacific)), "2026-02-28");
    }

    #[test]
    fn test_local_midnight_round_trips_through_key() {
        let date = NaiveDate::from_ymd_opt(2026, 11, 1).unwrap();
        let midnight = local_midnight(date);

        assert_eq!(to_local_date_key(midnight), "2026-11-01");
        assert_eq!(parse_date_key(&to_local_date_key(midnight)).unwrap(), date);
    }

    #[test]
    fn test_parse_rejects_malformed_keys() {
        for key in [
            "",
            "2026",
            "2026-03",
            "2026-03-01-02",
            "2026-xx-01",
            "2026--01",
            "+2026-03-01",
            "2026-02-30",
            "2026-13-01",
        ] {
            let err = parse_date_key(key).unwrap_err();
            assert!(
                matches!(err, AppError::InvalidDateKey(ref k) if k == key),
                "expected InvalidDateKey for {:?}",
                key
            );
        }
    }

    #[test]
    fn test_parse_accepts_unpadded_segments() {
        assert_eq!(
            parse_date_key("2026-3-1").unwrap(),
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
        );
    }

    #[test]
    fn test_reference_date_is_pinned_to_reference_year() {
        let early = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let pinned = reference_date(early, 2026);
        assert_eq!(to_local_date_key(pinned), "2026-01-01");

        let later = Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap();
        assert_eq!(reference_date(later, 2026), later);
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2026, 2), 28);
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2026, 12), 31);
        assert_eq!(days_in_month(2026, 4), 30);
    }

    #[test]
    fn test_millis_format() {
        let instant = Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap();
        assert_eq!(format_utc_rfc3339_millis(instant), "2026-03-01T08:00:00.000Z");
        assert_eq!(format_utc_rfc3339(instant), "2026-03-01T08:00:00Z");
    }
}
