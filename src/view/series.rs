use chrono::NaiveDate;
use serde::Serialize;

use crate::data::filter::rows_for_region;
use crate::data::model::{Dataset, RT_THRESHOLD};

/// `lower_90` clamped into `[1.0, upper_90]`.
///
/// The band below the split is drawn in the low color, the band above it in
/// the high color. Never leaves `[lower_90, upper_90]`.
pub fn split_value(lower_90: f64, upper_90: f64) -> f64 {
    lower_90.max(RT_THRESHOLD).min(upper_90)
}

/// Date-paired series for one region, ordered by date.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RegionSeries {
    pub region: String,
    pub lower: Vec<(NaiveDate, f64)>,
    pub split: Vec<(NaiveDate, f64)>,
    pub upper: Vec<(NaiveDate, f64)>,
    pub mean: Vec<(NaiveDate, f64)>,
}

impl RegionSeries {
    pub fn len(&self) -> usize {
        self.mean.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mean.is_empty()
    }

    /// First and last date covered.
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.mean.first()?.0;
        let last = self.mean.last()?.0;
        Some((first, last))
    }
}

pub(super) fn build(dataset: &Dataset, region: &str) -> RegionSeries {
    let rows = rows_for_region(dataset, region);
    let mut series = RegionSeries {
        region: region.to_string(),
        lower: Vec::with_capacity(rows.len()),
        split: Vec::with_capacity(rows.len()),
        upper: Vec::with_capacity(rows.len()),
        mean: Vec::with_capacity(rows.len()),
    };

    for o in rows {
        series.lower.push((o.date, o.lower_90));
        series.split.push((o.date, split_value(o.lower_90, o.upper_90)));
        series.upper.push((o.date, o.upper_90));
        series.mean.push((o.date, o.mean));
    }
    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Observation;
    use crate::view::RtViewModel;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 4, d).unwrap()
    }

    #[test]
    fn split_value_stays_inside_the_band() {
        let bands = [
            (0.5, 0.9),
            (0.5, 1.0),
            (0.8, 1.3),
            (1.0, 1.2),
            (1.1, 1.6),
            (0.0, 0.0),
            (2.0, 2.0),
        ];
        for (lo, hi) in bands {
            let s = split_value(lo, hi);
            assert!(lo <= s && s <= hi, "split {s} outside [{lo}, {hi}]");
            if hi >= 1.0 {
                assert!(s >= 1.0);
            } else {
                assert_eq!(s, hi);
            }
        }
    }

    #[test]
    fn split_collapses_to_band_edges() {
        assert_eq!(split_value(0.4, 0.8), 0.8);
        assert_eq!(split_value(1.2, 1.5), 1.2);
        assert_eq!(split_value(0.7, 1.4), 1.0);
    }

    #[test]
    fn series_sorted_by_date_even_when_loaded_out_of_order() {
        let ds = Dataset::new(vec![
            Observation::new(day(3), "Lombardy", 0.9, 0.7, 1.1),
            Observation::new(day(1), "Lombardy", 1.4, 1.2, 1.7),
            Observation::new(day(2), "Veneto", 1.0, 0.9, 1.1),
            Observation::new(day(2), "Lombardy", 1.1, 0.8, 1.3),
        ]);
        let s = RtViewModel::new(&ds).region_time_series("Lombardy");

        assert_eq!(s.len(), 3);
        let dates: Vec<NaiveDate> = s.mean.iter().map(|(d, _)| *d).collect();
        assert_eq!(dates, vec![day(1), day(2), day(3)]);
        assert_eq!(s.split, vec![(day(1), 1.2), (day(2), 1.0), (day(3), 1.0)]);
        assert_eq!(s.upper[0], (day(1), 1.7));
        assert_eq!(s.lower[2], (day(3), 0.7));
        assert_eq!(s.date_span(), Some((day(1), day(3))));
    }

    #[test]
    fn unknown_region_is_empty() {
        let ds = Dataset::new(vec![Observation::new(day(1), "Veneto", 1.0, 0.9, 1.1)]);
        let s = RtViewModel::new(&ds).region_time_series("Atlantis");
        assert!(s.is_empty());
        assert!(s.lower.is_empty() && s.split.is_empty() && s.upper.is_empty());
        assert_eq!(s.date_span(), None);
    }
}
