use serde::Serialize;

use super::series::RegionSeries;
use super::RtViewModel;

pub const GRID_TITLE: &str = "Evolution of Rt in time per country";
pub const Y_AXIS_LABEL: &str = "reproduction rate (Rt)";
pub const X_AXIS_LABEL: &str = "date";

/// Shape of the all-regions grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub columns: usize,
    pub y_max: f64,
    /// Height per grid row, in the host's units.
    pub row_height: f32,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            columns: 3,
            y_max: 2.0,
            row_height: 400.0,
        }
    }
}

/// One sub-chart of the grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridCell {
    pub row: usize,
    pub column: usize,
    pub y_range: [f64; 2],
    pub y_label: &'static str,
    pub x_label: &'static str,
    pub series: RegionSeries,
}

/// Composite chart with one cell per region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridChart {
    pub title: &'static str,
    pub columns: usize,
    pub rows: usize,
    /// Rendering hint, `row_height * rows`.
    pub height: f32,
    pub cells: Vec<GridCell>,
}

impl GridChart {
    /// Cells of grid row `row`, left to right.
    pub fn row(&self, row: usize) -> &[GridCell] {
        let start = (row * self.columns).min(self.cells.len());
        let end = (start + self.columns).min(self.cells.len());
        &self.cells[start..end]
    }
}

/// Regions are placed in lexicographic order, row-major.
pub(super) fn build(vm: &RtViewModel<'_>, layout: &GridLayout) -> GridChart {
    let columns = layout.columns.max(1);
    let regions = vm.dataset().regions();
    let rows = regions.len().div_ceil(columns);

    let cells: Vec<GridCell> = regions
        .iter()
        .enumerate()
        .map(|(i, region)| GridCell {
            row: i / columns,
            column: i % columns,
            y_range: [0.0, layout.y_max],
            y_label: Y_AXIS_LABEL,
            x_label: X_AXIS_LABEL,
            series: vm.region_time_series(region),
        })
        .collect();

    log::debug!("grid of {} regions: {rows} x {columns}", cells.len());

    GridChart {
        title: GRID_TITLE,
        columns,
        rows,
        height: layout.row_height * rows as f32,
        cells,
    }
}
