//! Target date selection for the daily and weekly runs.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use tracing::info;

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Tomorrow, or today when running in test mode.
pub fn daily_target(today: NaiveDate, test_run: bool) -> NaiveDate {
    let target = if test_run {
        info!("TEST_RUN is set - using today's date");
        today
    } else {
        today + Days::new(1)
    };

    if is_weekend(target) {
        info!(
            "Target date {} is a weekend - expecting no menu",
            target.format("%A %m/%d")
        );
    }
    target
}

/// Weekdays covered by a weekly run.
///
/// Normal runs cover Monday through Friday of the next week. Test runs cover the
/// rest of the current week (tomorrow through Friday); on Sunday that is the whole
/// upcoming week, and on Friday or Saturday only the following Monday.
pub fn week_dates(today: NaiveDate, test_run: bool) -> Vec<NaiveDate> {
    let from_monday = u64::from(today.weekday().num_days_from_monday());
    let next_monday = today + Days::new(7 - from_monday);

    let (start, end) = if !test_run {
        (next_monday, next_monday + Days::new(4))
    } else {
        match today.weekday() {
            Weekday::Sun => (next_monday, next_monday + Days::new(4)),
            Weekday::Fri | Weekday::Sat => (next_monday, next_monday),
            _ => (today + Days::new(1), today + Days::new(4 - from_monday)),
        }
    };

    let dates: Vec<NaiveDate> = start
        .iter_days()
        .take_while(|d| *d <= end)
        .filter(|d| !is_weekend(*d))
        .collect();

    info!(
        "Generated {} weekday(s): {}",
        dates.len(),
        dates
            .iter()
            .map(|d| d.format("%A %m/%d").to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );
    dates
}

/// The weekdays of the five-day span beginning at `start`.
pub fn week_starting(start: NaiveDate) -> Vec<NaiveDate> {
    start
        .iter_days()
        .take(5)
        .filter(|d| !is_weekend(*d))
        .collect()
}
