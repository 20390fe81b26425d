use chrono::NaiveDate;
use serde::Serialize;

use crate::data::filter::{rows_on_date, SortKey};
use crate::data::model::{Dataset, Observation, RT_THRESHOLD};

/// Bar color class. `High` means the epidemic is growing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorCategory {
    High,
    Low,
}

impl ColorCategory {
    /// Inclusive on the high side: `mean == 1.0` is `High`.
    pub fn classify(mean: f64) -> Self {
        if mean >= RT_THRESHOLD {
            ColorCategory::High
        } else {
            ColorCategory::Low
        }
    }
}

/// One bar: a region's mean with asymmetric error lengths.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonBar {
    pub region: String,
    pub mean: f64,
    pub color_category: ColorCategory,
    pub error_above: f64,
    pub error_below: f64,
}

impl ComparisonBar {
    fn from_observation(o: &Observation) -> Self {
        Self {
            region: o.region.clone(),
            mean: o.mean,
            color_category: ColorCategory::classify(o.mean),
            error_above: o.upper_90 - o.mean,
            error_below: o.mean - o.lower_90,
        }
    }

    pub fn lower(&self) -> f64 {
        self.mean - self.error_below
    }

    pub fn upper(&self) -> f64 {
        self.mean + self.error_above
    }
}

/// Per-date comparison of all regions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonChart {
    pub title: String,
    pub date: NaiveDate,
    pub sort_key: SortKey,
    pub bars: Vec<ComparisonBar>,
}

impl ComparisonChart {
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

pub fn title_for(date: NaiveDate) -> String {
    format!("Rt visualization for {}", date.format("%Y-%m-%d"))
}

pub(super) fn build(dataset: &Dataset, date: NaiveDate, sort_key: SortKey) -> ComparisonChart {
    let bars: Vec<ComparisonBar> = rows_on_date(dataset, date, sort_key)
        .into_iter()
        .map(ComparisonBar::from_observation)
        .collect();

    ComparisonChart {
        title: title_for(date),
        date,
        sort_key,
        bars,
    }
}
