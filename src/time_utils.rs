// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for calendar math and date/time formatting.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone};

/// Midnight on the first day of `now`'s month, in `now`'s time zone.
///
/// Falls back to the earliest valid instant after midnight when a DST
/// transition swallows 00:00.
pub fn first_of_month<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Tz> {
    let tz = now.timezone();
    let first = NaiveDate::from_ymd_opt(now.year(), now.month(), 1)
        .unwrap_or_else(|| now.date_naive());

    let mut candidate = first.and_hms_opt(0, 0, 0).unwrap_or_default();
    for _ in 0..24 * 4 {
        if let Some(dt) = tz.from_local_datetime(&candidate).earliest() {
            return dt;
        }
        candidate += chrono::Duration::minutes(15);
    }
    now.clone()
}

/// 366 for leap years, else 365 (also outside chrono's date range).
pub fn days_in_year(year: i32) -> u32 {
    NaiveDate::from_ymd_opt(year, 12, 31).map_or(365, |d| d.ordinal())
}

/// Whether `year` is a leap year.
pub fn is_leap_year(year: i32) -> bool {
    days_in_year(year) == 366
}

/// Whole days since January 1 of `date`'s year (January 1 is 0).
pub fn days_elapsed_in_year(date: NaiveDate) -> u32 {
    date.ordinal0()
}

/// Format a timestamp for the dashboard "Last update" line.
pub fn format_last_update<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%Y-%m-%d %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Timelike, Utc};

    #[test]
    fn test_leap_years() {
        for year in [1996, 2000, 2024, 2028, 2400] {
            assert!(is_leap_year(year), "{year}");
            assert_eq!(days_in_year(year), 366);
        }
        for year in [1900, 2023, 2025, 2026, 2100] {
            assert!(!is_leap_year(year), "{year}");
            assert_eq!(days_in_year(year), 365);
        }
    }

    #[test]
    fn test_days_in_year_out_of_range() {
        assert!(!is_leap_year(i32::MAX));
        assert_eq!(days_in_year(i32::MAX), 365);
    }

    #[test]
    fn test_days_elapsed_in_year() {
        let jan1 = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        assert_eq!(days_elapsed_in_year(jan1), 0);

        let feb1 = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
        assert_eq!(days_elapsed_in_year(feb1), 31);

        let dec31_leap = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        assert_eq!(days_elapsed_in_year(dec31_leap), 365);
    }

    #[test]
    fn test_first_of_month_keeps_offset() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let now = tz.with_ymd_and_hms(2026, 10, 14, 9, 30, 15).unwrap();

        let first = first_of_month(&now);

        assert_eq!(first.day(), 1);
        assert_eq!(first.month(), 10);
        assert_eq!((first.hour(), first.minute(), first.second()), (0, 0, 0));
        // 2026-10-01T00:00:00+02:00
        assert_eq!(first.timestamp(), 1_790_805_600);
    }

    #[test]
    fn test_first_of_month_on_the_first() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();
        assert_eq!(first_of_month(&now), now);
    }

    #[test]
    fn test_format_last_update() {
        let now = Utc.with_ymd_and_hms(2026, 1, 5, 7, 3, 0).unwrap();
        assert_eq!(format_last_update(&now), "2026-01-05 07:03");
    }
}
