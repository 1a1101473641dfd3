// src/services/calendar.rs
use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Fixed projection target date.
pub fn target_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2027, 12, 10).unwrap()
}

pub fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Count of Monday-to-Friday dates in `[start, end]` inclusive. Holidays are
/// deliberately ignored; this calendar only knows weekends.
pub fn business_days_between(start: NaiveDate, end: NaiveDate) -> u32 {
    if end < start {
        return 0;
    }
    let mut count = 0u32;
    let mut day = start;
    while day <= end {
        if is_business_day(day) {
            count += 1;
        }
        day += Duration::days(1);
    }
    count
}

/// The first `n` business days starting at `start` (rolled forward off a
/// weekend). Puts calendar dates under the projected series.
pub fn business_day_sequence(start: NaiveDate, n: u32) -> Vec<NaiveDate> {
    let mut out = Vec::with_capacity(n as usize);
    let mut day = start;
    while out.len() < n as usize {
        if is_business_day(day) {
            out.push(day);
        }
        day += Duration::days(1);
    }
    out
}
