use chrono::NaiveDate;

use crate::config::DashboardConfig;
use crate::data::filter::SortKey;
use crate::data::model::Dataset;
use crate::view::{ComparisonChart, GridChart, RtViewModel};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded once at startup, never replaced.
    dataset: Dataset,

    /// Options of the date selector, latest first.
    pub pickable_dates: Vec<NaiveDate>,

    /// Current selector values.
    pub sort_key: SortKey,
    pub selected_date: Option<NaiveDate>,

    /// Comparison chart for the current selectors (recomputed on change).
    comparison: Option<ComparisonChart>,

    /// Per-region grid, computed once.
    grid: GridChart,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
    pub status_is_error: bool,
}

impl AppState {
    pub fn new(dataset: Dataset, config: &DashboardConfig) -> Self {
        let pickable_dates = dataset.pickable_dates(&config.pickable_offsets_days);
        // Start on the first selectable option so a radio button is checked.
        let selected_date = pickable_dates.first().copied();
        let grid = RtViewModel::new(&dataset).all_regions_grid(&config.grid_layout());

        let mut state = Self {
            dataset,
            pickable_dates,
            sort_key: config.default_sort,
            selected_date,
            comparison: None,
            grid,
            status_message: None,
            status_is_error: false,
        };
        state.recompute();
        state
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn comparison(&self) -> Option<&ComparisonChart> {
        self.comparison.as_ref()
    }

    pub fn grid(&self) -> &GridChart {
        &self.grid
    }

    /// Change the sort order; recomputes only when the value differs.
    pub fn set_sort_key(&mut self, key: SortKey) {
        if self.sort_key != key {
            self.sort_key = key;
            self.recompute();
        }
    }

    /// Change the selected date; recomputes only when the value differs.
    pub fn set_selected_date(&mut self, date: NaiveDate) {
        if self.selected_date != Some(date) {
            self.selected_date = Some(date);
            self.recompute();
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>, is_error: bool) {
        self.status_message = Some(message.into());
        self.status_is_error = is_error;
    }

    fn recompute(&mut self) {
        self.comparison = self.selected_date.map(|date| {
            let chart = RtViewModel::new(&self.dataset).comparison_chart(date, self.sort_key);
            log::debug!(
                "recomputed comparison for {date} by {:?}: {} bars",
                self.sort_key,
                chart.bars.len()
            );
            chart
        });
    }
}
