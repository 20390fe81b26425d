use std::collections::BTreeSet;

use chrono::{Days, NaiveDate};

/// Rt value separating growing (`>= 1.0`) from shrinking epidemics.
pub const RT_THRESHOLD: f64 = 1.0;

// ---------------------------------------------------------------------------
// Observation – one row of the source table
// ---------------------------------------------------------------------------

/// One Rt estimate for a region on a given day.
///
/// Loaded observations always satisfy `lower_90 <= mean <= upper_90`; the
/// loader rejects anything else.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub date: NaiveDate,
    pub region: String,
    pub mean: f64,
    pub lower_90: f64,
    pub upper_90: f64,
}

impl Observation {
    pub fn new(
        date: NaiveDate,
        region: impl Into<String>,
        mean: f64,
        lower_90: f64,
        upper_90: f64,
    ) -> Self {
        Self {
            date,
            region: region.into(),
            mean,
            lower_90,
            upper_90,
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// All observations, in load order. Never mutated after construction.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    observations: Vec<Observation>,
}

impl Dataset {
    pub fn new(observations: Vec<Observation>) -> Self {
        Self { observations }
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Distinct region names in lexicographic order.
    pub fn regions(&self) -> Vec<String> {
        self.observations
            .iter()
            .map(|o| o.region.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Distinct dates, ascending.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.observations
            .iter()
            .map(|o| o.date)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn max_date(&self) -> Option<NaiveDate> {
        self.observations.iter().map(|o| o.date).max()
    }

    /// Dates offered by the date selector: the latest date minus each offset
    /// (in days), in offset order with duplicates dropped.
    pub fn pickable_dates(&self, offsets_days: &[u64]) -> Vec<NaiveDate> {
        let Some(max) = self.max_date() else {
            return Vec::new();
        };
        let mut dates: Vec<NaiveDate> = Vec::with_capacity(offsets_days.len());
        for &offset in offsets_days {
            if let Some(d) = max.checked_sub_days(Days::new(offset)) {
                if !dates.contains(&d) {
                    dates.push(d);
                }
            }
        }
        dates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn pickable_dates_are_latest_day_before_and_week_before() {
        let ds = Dataset::new(vec![
            Observation::new(day(2020, 5, 20), "A", 1.0, 0.8, 1.2),
            Observation::new(day(2020, 6, 1), "A", 1.1, 0.9, 1.3),
            Observation::new(day(2020, 5, 31), "B", 0.7, 0.5, 0.9),
        ]);
        assert_eq!(
            ds.pickable_dates(&[0, 1, 7]),
            vec![day(2020, 6, 1), day(2020, 5, 31), day(2020, 5, 25)]
        );
    }

    #[test]
    fn pickable_dates_of_empty_dataset_is_empty() {
        assert!(Dataset::default().pickable_dates(&[0, 1, 7]).is_empty());
        assert_eq!(Dataset::default().max_date(), None);
    }

    #[test]
    fn duplicate_offsets_collapse() {
        let ds = Dataset::new(vec![Observation::new(day(2020, 6, 1), "A", 1.0, 0.9, 1.1)]);
        assert_eq!(ds.pickable_dates(&[0, 0, 1]), vec![day(2020, 6, 1), day(2020, 5, 31)]);
    }

    #[test]
    fn regions_are_distinct_and_sorted() {
        let ds = Dataset::new(vec![
            Observation::new(day(2020, 6, 1), "Norway", 1.0, 0.9, 1.1),
            Observation::new(day(2020, 6, 1), "Austria", 1.0, 0.9, 1.1),
            Observation::new(day(2020, 6, 2), "Norway", 1.0, 0.9, 1.1),
        ]);
        assert_eq!(ds.regions(), vec!["Austria".to_string(), "Norway".to_string()]);
        assert_eq!(ds.dates(), vec![day(2020, 6, 1), day(2020, 6, 2)]);
    }
}
