mod app;
mod color;
mod config;
mod data;
mod export;
mod state;
mod ui;
mod view;

use std::path::Path;

use anyhow::{Context, Result};
use app::RtDashboardApp;
use config::{DashboardConfig, CONFIG_FILE};
use eframe::egui;
use state::AppState;

fn run() -> Result<()> {
    let config = DashboardConfig::load_or_default(Path::new(CONFIG_FILE))?;

    // The dashboard never starts without data.
    let dataset = data::loader::load_file(&config.data_path)
        .with_context(|| format!("loading Rt estimates from {}", config.data_path.display()))?;
    log::info!(
        "Loaded {} estimates for {} regions, latest date {:?}",
        dataset.len(),
        dataset.regions().len(),
        dataset.max_date()
    );

    let panel_height = config.panel_height;
    let state = AppState::new(dataset, &config);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Rt dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(RtDashboardApp::new(state, panel_height)))),
    )
    .map_err(|e| anyhow::anyhow!("running the dashboard window: {e}"))
}

fn main() -> Result<()> {
    env_logger::init();
    run().inspect_err(|e| log::error!("{e:#}"))
}
