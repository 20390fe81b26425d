use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::data::filter::SortKey;
use crate::view::GridLayout;

/// Settings file looked up in the working directory.
pub const CONFIG_FILE: &str = "rt_dashboard.json";

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Startup settings. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// Rt table to load at startup.
    pub data_path: PathBuf,
    /// Days before the latest date offered by the date selector.
    pub pickable_offsets_days: Vec<u64>,
    pub grid_columns: usize,
    pub grid_y_max: f64,
    pub panel_height: f32,
    pub default_sort: SortKey,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        let layout = GridLayout::default();
        Self {
            data_path: PathBuf::from("data/rt_mcmc.csv"),
            pickable_offsets_days: vec![0, 1, 7],
            grid_columns: layout.columns,
            grid_y_max: layout.y_max,
            panel_height: layout.row_height,
            default_sort: SortKey::ByMean,
        }
    }
}

impl DashboardConfig {
    /// Read `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("{} not found, using default settings", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config =
            Self::from_json(&text).with_context(|| format!("parsing {}", path.display()))?;
        log::info!("loaded settings from {}", path.display());
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        anyhow::ensure!(config.grid_columns > 0, "grid_columns must be at least 1");
        anyhow::ensure!(
            config.grid_y_max.is_finite() && config.grid_y_max > 0.0,
            "grid_y_max must be a positive number"
        );
        anyhow::ensure!(
            config.panel_height.is_finite() && config.panel_height > 0.0,
            "panel_height must be a positive number"
        );
        anyhow::ensure!(
            !config.pickable_offsets_days.is_empty(),
            "pickable_offsets_days must not be empty"
        );
        Ok(config)
    }

    pub fn grid_layout(&self) -> GridLayout {
        GridLayout {
            columns: self.grid_columns,
            y_max: self.grid_y_max,
            row_height: self.panel_height,
        }
    }
}
