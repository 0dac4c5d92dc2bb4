use chrono::{Datelike, NaiveDate, Utc, Weekday};

/// Today's date in UTC. All server-assigned dates derive from this.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Number of whole calendar months from `start` to `end`.
///
/// A partial trailing month counts as a full one, so a target three weeks
/// away is one month away. Returns 0 when `end` is not after `start`.
pub fn months_until(start: NaiveDate, end: NaiveDate) -> i64 {
    if end <= start {
        return 0;
    }
    let mut months =
        (end.year() - start.year()) as i64 * 12 + end.month() as i64 - start.month() as i64;
    if end.day() > start.day() {
        months += 1;
    }
    months.max(1)
}

/// Number of weeks from `start` to `end`, rounding partial weeks up.
pub fn weeks_until(start: NaiveDate, end: NaiveDate) -> i64 {
    let days = (end - start).num_days();
    if days <= 0 {
        return 0;
    }
    (days + 6) / 7
}

/// Signed day count from `start` to `end` (negative when `end` is in the past).
pub fn days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days()
}

pub fn is_monday(date: NaiveDate) -> bool {
    date.weekday() == Weekday::Mon
}

pub fn is_first_of_month(date: NaiveDate) -> bool {
    date.day() == 1
}

/// Rounds a money amount to cents.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
