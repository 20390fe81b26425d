use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color;
use crate::data::filter::SortKey;
use crate::export;
use crate::state::AppState;
use crate::view::{ColorCategory, ComparisonChart};

// ---------------------------------------------------------------------------
// Left side panel – selectors
// ---------------------------------------------------------------------------

/// Render the selector panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("This is work in progress");
    ui.label("An interactive dashboard for CoVid-19 Rt estimate.");
    ui.separator();

    ui.strong("Order by");
    let mut sort_key = state.sort_key;
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for key in SortKey::ALL {
            ui.radio_value(&mut sort_key, key, key.label());
        }
    });
    state.set_sort_key(sort_key);
    ui.add_space(6.0);

    ui.strong("Date");
    if state.pickable_dates.is_empty() {
        ui.label("No dates available.");
    } else if let Some(mut selected) = state.selected_date {
        ui.horizontal_wrapped(|ui: &mut Ui| {
            for date in &state.pickable_dates {
                ui.radio_value(&mut selected, *date, date.format("%Y-%m-%d").to_string());
            }
        });
        state.set_selected_date(selected);
    }
    ui.separator();

    ui.strong("Legend");
    for (label, c) in color::legend_entries() {
        ui.label(RichText::new(format!("■ {label}")).color(c));
    }
    ui.separator();

    let ds = state.dataset();
    ui.label(format!(
        "{} estimates, {} regions, {} dates",
        ds.len(),
        ds.regions().len(),
        ds.dates().len()
    ));
}

// ---------------------------------------------------------------------------
// Estimates table under the comparison chart
// ---------------------------------------------------------------------------

/// List the bars of the comparison chart as rows.
pub fn estimates_table(ui: &mut Ui, chart: &ComparisonChart) {
    TableBuilder::new(ui)
        .id_salt("estimates_table")
        .striped(true)
        .vscroll(false)
        .column(Column::auto().at_least(140.0))
        .columns(Column::auto().at_least(80.0), 3)
        .header(20.0, |mut header| {
            for title in ["Region", "Rt (mean)", "90% interval", "Trend"] {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for bar in &chart.bars {
                body.row(18.0, |mut row| {
                    row.col(|ui: &mut Ui| {
                        ui.label(&bar.region);
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(format!("{:.2}", bar.mean));
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(format!("{:.2} – {:.2}", bar.lower(), bar.upper()));
                    });
                    row.col(|ui: &mut Ui| {
                        let text = match bar.color_category {
                            ColorCategory::High => "growing",
                            ColorCategory::Low => "shrinking",
                        };
                        let c = color::category_color(bar.color_category);
                        ui.label(RichText::new(text).color(c));
                    });
                });
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Export comparison chart…").clicked() {
                export_comparison_dialog(state);
                ui.close_menu();
            }
            if ui.button("Export region grid…").clicked() {
                export_grid_dialog(state);
                ui.close_menu();
            }
            ui.separator();
            if ui.button("Quit").clicked() {
                ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });

        if let Some(msg) = &state.status_message {
            ui.separator();
            let text = RichText::new(msg);
            if state.status_is_error {
                ui.label(text.color(Color32::RED));
            } else {
                ui.label(text);
            }
        }
    });
}

// ---------------------------------------------------------------------------
// Export dialogs
// ---------------------------------------------------------------------------

fn save_dialog(title: &str, file_name: &str) -> Option<std::path::PathBuf> {
    rfd::FileDialog::new()
        .set_title(title)
        .set_file_name(file_name)
        .add_filter("JSON", &["json"])
        .save_file()
}

pub fn export_comparison_dialog(state: &mut AppState) {
    let Some(chart) = state.comparison().cloned() else {
        state.set_status("Nothing to export: no date selected", true);
        return;
    };
    let file_name = export::comparison_file_name(&chart);
    if let Some(path) = save_dialog("Export comparison chart", &file_name) {
        report_export(state, &path, export::write_json(&path, &chart));
    }
}

pub fn export_grid_dialog(state: &mut AppState) {
    if let Some(path) = save_dialog("Export region grid", "rt_regions.json") {
        let result = export::write_json(&path, state.grid());
        report_export(state, &path, result);
    }
}

fn report_export(state: &mut AppState, path: &std::path::Path, result: anyhow::Result<()>) {
    match result {
        Ok(()) => state.set_status(format!("Exported {}", path.display()), false),
        Err(e) => {
            log::error!("Export failed: {e:#}");
            state.set_status(format!("Error: {e:#}"), true);
        }
    }
}
