//! Run-time date generation for booking scenarios.
//!
//! Dates are always derived from "now" at the moment a scenario executes,
//! never at suite load: a suite parsed in the evening must still submit a
//! fresh date when it runs after midnight.

use chrono::{Datelike, Days, Local, NaiveDate};

fn target(offset_days: u64) -> NaiveDate {
    Local::now().date_naive() + Days::new(offset_days)
}

/// Today plus `offset_days`, formatted the way the date field expects it
/// (`dd.MM.yyyy`). The same string appears in the success notification.
pub fn booking_date(offset_days: u64) -> String {
    target(offset_days).format("%d.%m.%Y").to_string()
}

/// Day-of-month label of today plus `offset_days`, as rendered in the
/// calendar popup (no leading zero).
pub fn day_of_month(offset_days: u64) -> String {
    target(offset_days).day().to_string()
}

/// Whether today plus `offset_days` falls past the calendar month currently
/// shown by the popup, i.e. the month-advance arrow must be clicked once.
pub fn crosses_month(offset_days: u64) -> bool {
    let today = Local::now().date_naive();
    let target = target(offset_days);
    (target.year(), target.month()) != (today.year(), today.month())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_date_format() {
        let date = booking_date(3);
        assert_eq!(date.len(), 10);
        let bytes = date.as_bytes();
        assert_eq!(bytes[2], b'.');
        assert_eq!(bytes[5], b'.');
        assert!(date.chars().filter(|c| c.is_ascii_digit()).count() == 8);
    }

    #[test]
    fn test_booking_date_zero_offset_is_today() {
        let expected = Local::now().date_naive().format("%d.%m.%Y").to_string();
        assert_eq!(booking_date(0), expected);
    }

    #[test]
    fn test_day_of_month_has_no_leading_zero() {
        // Scan a month of offsets; single-digit days must render as one char.
        for offset in 0..31 {
            let day = day_of_month(offset);
            assert!(!day.starts_with('0'), "day '{}' has a leading zero", day);
            let n: u32 = day.parse().unwrap();
            assert!((1..=31).contains(&n));
        }
    }

    #[test]
    fn test_crosses_month_today() {
        assert!(!crosses_month(0));
    }

    #[test]
    fn test_crosses_month_within_31_days() {
        // Some offset inside a month of today must cross the boundary.
        assert!((1..=31).any(crosses_month));
    }
}
