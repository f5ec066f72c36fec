//! Holiday feed domain types.
//!
//! The serde shape of [`HolidayDataset`] matches the remote feed payload
//! exactly, and the on-disk cache artifact reuses the same shape — one
//! representation end to end. Unknown feed fields (holiday names, year
//! markers) are ignored on deserialization.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One published calendar day: a named holiday or a compensatory adjustment.
///
/// `is_off_day == true` means a rest day; `false` means a day that is worked
/// even though it is listed (typically a weekend shifted into the work week).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayRecord {
    pub date: NaiveDate,
    #[serde(rename = "isOffDay")]
    pub is_off_day: bool,
}

/// The authoritative feed for one calendar year, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayDataset {
    pub days: Vec<HolidayRecord>,
}

impl HolidayDataset {
    pub fn new(days: Vec<HolidayRecord>) -> Self {
        Self { days }
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Per-query lookup sets derived from a dataset.
///
/// `all_dates` holds every listed day regardless of off/working status;
/// `off_dates` only the rest days. Rebuilt per query resolution, never
/// persisted.
#[derive(Debug, Clone)]
pub struct DayIndex {
    all_dates: HashSet<NaiveDate>,
    off_dates: HashSet<NaiveDate>,
}

impl DayIndex {
    pub fn from_dataset(dataset: &HolidayDataset) -> Self {
        let mut all_dates = HashSet::with_capacity(dataset.days.len());
        let mut off_dates = HashSet::new();
        for record in &dataset.days {
            all_dates.insert(record.date);
            if record.is_off_day {
                off_dates.insert(record.date);
            }
        }
        Self {
            all_dates,
            off_dates,
        }
    }

    /// Whether the feed lists this date at all (holiday or compensatory day).
    pub fn is_listed(&self, date: NaiveDate) -> bool {
        self.all_dates.contains(&date)
    }

    /// Whether the feed marks this date as a rest day.
    pub fn is_off_day(&self, date: NaiveDate) -> bool {
        self.off_dates.contains(&date)
    }
}

impl From<&HolidayDataset> for DayIndex {
    fn from(dataset: &HolidayDataset) -> Self {
        Self::from_dataset(dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn feed_shape_roundtrip() {
        let json = r#"{"days":[{"date":"2024-01-01","isOffDay":true},{"date":"2024-02-04","isOffDay":false}]}"#;
        let dataset: HolidayDataset = serde_json::from_str(json).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.days[0].date, d("2024-01-01"));
        assert!(dataset.days[0].is_off_day);
        assert!(!dataset.days[1].is_off_day);

        let back = serde_json::to_string(&dataset).unwrap();
        let again: HolidayDataset = serde_json::from_str(&back).unwrap();
        assert_eq!(dataset, again);
    }

    #[test]
    fn unknown_feed_fields_are_ignored() {
        let json = r#"{"$schema":"x","year":2024,"days":[{"name":"元旦","date":"2024-01-01","isOffDay":true}]}"#;
        let dataset: HolidayDataset = serde_json::from_str(json).unwrap();
        assert_eq!(dataset.len(), 1);
    }

    #[test]
    fn index_splits_off_days_from_listed_days() {
        let dataset = HolidayDataset::new(vec![
            HolidayRecord {
                date: d("2024-01-01"),
                is_off_day: true,
            },
            HolidayRecord {
                date: d("2024-02-04"),
                is_off_day: false,
            },
        ]);
        let index = DayIndex::from_dataset(&dataset);

        assert!(index.is_listed(d("2024-01-01")));
        assert!(index.is_off_day(d("2024-01-01")));
        assert!(index.is_listed(d("2024-02-04")));
        assert!(!index.is_off_day(d("2024-02-04")));
        assert!(!index.is_listed(d("2024-06-06")));
    }
}
