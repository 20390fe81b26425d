use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::model::{Dataset, Observation};

// ---------------------------------------------------------------------------
// Sort key for the comparison chart
// ---------------------------------------------------------------------------

/// Column the comparison chart is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortKey {
    #[serde(rename = "region")]
    ByRegion,
    #[default]
    #[serde(rename = "mean")]
    ByMean,
}

impl SortKey {
    pub const ALL: [SortKey; 2] = [SortKey::ByRegion, SortKey::ByMean];

    /// Label shown next to the radio button.
    pub fn label(self) -> &'static str {
        match self {
            SortKey::ByRegion => "Country",
            SortKey::ByMean => "Transmission rate",
        }
    }

    /// Ascending comparator for this key.
    pub fn compare(self, a: &Observation, b: &Observation) -> Ordering {
        match self {
            SortKey::ByRegion => a.region.cmp(&b.region),
            SortKey::ByMean => a.mean.total_cmp(&b.mean),
        }
    }
}

// ---------------------------------------------------------------------------
// Row selection
// ---------------------------------------------------------------------------

/// Observations recorded on `date`, stably sorted by `key`.
pub fn rows_on_date(dataset: &Dataset, date: NaiveDate, key: SortKey) -> Vec<&Observation> {
    let mut rows: Vec<&Observation> = dataset
        .observations()
        .iter()
        .filter(|o| o.date == date)
        .collect();
    rows.sort_by(|a, b| key.compare(a, b));
    rows
}

/// Observations of `region`, ordered by date regardless of load order.
pub fn rows_for_region<'a>(dataset: &'a Dataset, region: &str) -> Vec<&'a Observation> {
    let mut rows: Vec<&Observation> = dataset
        .observations()
        .iter()
        .filter(|o| o.region == region)
        .collect();
    rows.sort_by_key(|o| o.date);
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 6, d).unwrap()
    }

    fn sample() -> Dataset {
        Dataset::new(vec![
            Observation::new(day(2), "Spain", 0.9, 0.7, 1.1),
            Observation::new(day(1), "Spain", 1.3, 1.1, 1.5),
            Observation::new(day(2), "Italy", 1.2, 1.0, 1.4),
            Observation::new(day(2), "Belgium", 0.9, 0.6, 1.0),
        ])
    }

    #[test]
    fn rows_on_date_sorted_by_region() {
        let ds = sample();
        let regions: Vec<&str> = rows_on_date(&ds, day(2), SortKey::ByRegion)
            .iter()
            .map(|o| o.region.as_str())
            .collect();
        assert_eq!(regions, vec!["Belgium", "Italy", "Spain"]);
    }

    #[test]
    fn rows_on_date_sorted_by_mean_keeps_ties_in_load_order() {
        let ds = sample();
        let regions: Vec<&str> = rows_on_date(&ds, day(2), SortKey::ByMean)
            .iter()
            .map(|o| o.region.as_str())
            .collect();
        assert_eq!(regions, vec!["Spain", "Belgium", "Italy"]);
    }

    #[test]
    fn rows_for_region_sorted_by_date() {
        let ds = sample();
        let dates: Vec<NaiveDate> = rows_for_region(&ds, "Spain").iter().map(|o| o.date).collect();
        assert_eq!(dates, vec![day(1), day(2)]);
        assert!(rows_for_region(&ds, "Atlantis").is_empty());
    }

    #[test]
    fn sort_key_parses_column_names() {
        let key: SortKey = serde_json::from_str("\"region\"").unwrap();
        assert_eq!(key, SortKey::ByRegion);
        assert_eq!(SortKey::default(), SortKey::ByMean);
    }
}
