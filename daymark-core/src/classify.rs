//! Day classification: holiday, workday, weekday.
//!
//! A date is a holiday when the feed lists it at all (named holidays and
//! compensatory adjustments alike). Workday status is governed by off-day
//! membership: an off-day is never a workday, an unlisted weekend day is
//! never a workday, and a weekend day the feed explicitly lists as working
//! (a compensatory workday) IS a workday.

use crate::calendar::DayIndex;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Fixed labels indexed by weekday (0 = Monday .. 6 = Sunday).
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Classification result for a single date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayInfo {
    pub date: NaiveDate,
    pub is_holiday: bool,
    pub is_workday: bool,
    pub weekday: u32,
    pub weekday_name: &'static str,
}

/// Classify a date against a dataset's derived index. Pure.
pub fn classify(date: NaiveDate, index: &DayIndex) -> DayInfo {
    let weekday = date.weekday().num_days_from_monday();
    let is_weekend = weekday >= 5;

    let is_holiday = index.is_listed(date);

    let is_workday = if index.is_off_day(date) {
        false
    } else if is_weekend && !index.is_listed(date) {
        false
    } else {
        true
    };

    DayInfo {
        date,
        is_holiday,
        is_workday,
        weekday,
        weekday_name: WEEKDAY_NAMES[weekday as usize],
    }
}
