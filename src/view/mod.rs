//! Chart specifications derived from the loaded [`Dataset`].
//!
//! Everything here is a pure function of the dataset and its arguments. The
//! structs are plain data (and `Serialize`) so any host can render or export
//! them; the egui host lives in `crate::ui`.

pub mod comparison;
pub mod grid;
pub mod series;

use chrono::NaiveDate;

use crate::data::filter::SortKey;
use crate::data::model::Dataset;

pub use comparison::{ColorCategory, ComparisonBar, ComparisonChart};
pub use grid::{GridCell, GridChart, GridLayout};
pub use series::RegionSeries;

/// Read-only view model bound to an immutable dataset.
#[derive(Debug, Clone, Copy)]
pub struct RtViewModel<'a> {
    dataset: &'a Dataset,
}

impl<'a> RtViewModel<'a> {
    pub fn new(dataset: &'a Dataset) -> Self {
        Self { dataset }
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    /// Bar chart comparing regions on `date`.
    pub fn comparison_chart(&self, date: NaiveDate, sort_key: SortKey) -> ComparisonChart {
        comparison::build(self.dataset, date, sort_key)
    }

    /// Band and mean series of one region over time.
    pub fn region_time_series(&self, region: &str) -> RegionSeries {
        series::build(self.dataset, region)
    }

    /// One time-series panel per region, laid out on a fixed-width grid.
    pub fn all_regions_grid(&self, layout: &GridLayout) -> GridChart {
        grid::build(self, layout)
    }
}
