use eframe::egui::{self, ScrollArea, Ui};

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct RtDashboardApp {
    pub state: AppState,
    /// Height of the comparison chart and of each grid row.
    panel_height: f32,
}

impl RtDashboardApp {
    pub fn new(state: AppState, panel_height: f32) -> Self {
        Self { state, panel_height }
    }
}

impl eframe::App for RtDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: selectors ----
        egui::SidePanel::left("selector_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: comparison chart, table, region grid ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    if let Some(chart) = self.state.comparison() {
                        plot::comparison_plot(ui, chart, self.panel_height);
                        egui::CollapsingHeader::new("Estimates")
                            .default_open(false)
                            .show(ui, |ui: &mut Ui| {
                                panels::estimates_table(ui, chart);
                            });
                    }
                    ui.separator();
                    plot::region_grid(ui, self.state.grid());
                });
        });
    }
}
