use chrono::{Datelike, NaiveDate};
use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{
    Bar, BarChart, HLine, Legend, Line, LineStyle, Plot, PlotBounds, PlotPoints, Polygon,
};

use crate::color;
use crate::data::model::RT_THRESHOLD;
use crate::view::{ColorCategory, ComparisonBar, ComparisonChart, GridCell, GridChart, RegionSeries};

const BAR_WIDTH: f64 = 0.7;
const CAP_HALF_WIDTH: f64 = 0.15;
const ERROR_BAR: Color32 = Color32::from_rgb(60, 60, 60);

// ---------------------------------------------------------------------------
// Comparison bar chart
// ---------------------------------------------------------------------------

/// Render one bar per region with its 90% interval as an error bar.
pub fn comparison_plot(ui: &mut Ui, chart: &ComparisonChart, height: f32) {
    ui.heading(&chart.title);
    if chart.is_empty() {
        ui.label(RichText::new("No estimates for this date.").italics());
    }

    let regions: Vec<String> = chart.bars.iter().map(|b| b.region.clone()).collect();
    let bars: Vec<Bar> = chart
        .bars
        .iter()
        .enumerate()
        .map(|(i, b)| {
            Bar::new(i as f64, b.mean)
                .name(&b.region)
                .fill(color::category_color(b.color_category))
                .width(BAR_WIDTH)
        })
        .collect();

    Plot::new("rt_comparison")
        .height(height)
        .legend(Legend::default())
        .y_axis_label("Rt")
        .include_y(0.0)
        .allow_drag(false)
        .allow_scroll(false)
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
                return String::new();
            }
            regions.get(idx as usize).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Rt estimate"));
            for (i, bar) in chart.bars.iter().enumerate() {
                for segment in error_bar_segments(i as f64, bar) {
                    plot_ui.line(Line::new(PlotPoints::from(segment)).color(ERROR_BAR).width(1.5));
                }
            }
            plot_ui.hline(threshold_line());
        });
}

/// Vertical whisker plus two caps for the bar at `x`.
fn error_bar_segments(x: f64, bar: &ComparisonBar) -> [Vec<[f64; 2]>; 3] {
    let (lo, hi) = (bar.lower(), bar.upper());
    [
        vec![[x, lo], [x, hi]],
        vec![[x - CAP_HALF_WIDTH, lo], [x + CAP_HALF_WIDTH, lo]],
        vec![[x - CAP_HALF_WIDTH, hi], [x + CAP_HALF_WIDTH, hi]],
    ]
}

fn threshold_line() -> HLine {
    HLine::new(RT_THRESHOLD)
        .name("Rt = 1")
        .color(Color32::GRAY)
        .style(LineStyle::dashed_loose())
}

// ---------------------------------------------------------------------------
// Per-region grid
// ---------------------------------------------------------------------------

/// Render the static grid of time-series panels.
pub fn region_grid(ui: &mut Ui, grid: &GridChart) {
    ui.heading(grid.title);
    if grid.rows == 0 {
        ui.label("No regions loaded.");
        return;
    }
    let panel_height = grid.height / grid.rows as f32;

    for row in 0..grid.rows {
        ui.columns(grid.columns, |cols| {
            for (cell, col) in grid.row(row).iter().zip(cols.iter_mut()) {
                col.label(RichText::new(&cell.series.region).strong());
                region_panel(col, cell, panel_height);
            }
        });
        ui.add_space(8.0);
    }
}

fn day_number(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

fn format_day(value: f64) -> String {
    let n = value.round();
    if (value - n).abs() > 1e-6 {
        return String::new();
    }
    NaiveDate::from_num_days_from_ce_opt(n as i32)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Trapezoids between two boundary series, one per pair of consecutive dates.
///
/// egui_plot only fills convex polygons, so the band is split into segments.
fn band_segments(bottom: &[(NaiveDate, f64)], top: &[(NaiveDate, f64)]) -> Vec<Vec<[f64; 2]>> {
    bottom
        .windows(2)
        .zip(top.windows(2))
        .map(|(b, t)| {
            let (x0, x1) = (day_number(b[0].0), day_number(b[1].0));
            vec![[x0, b[0].1], [x1, b[1].1], [x1, t[1].1], [x0, t[0].1]]
        })
        .collect()
}

fn series_points(values: &[(NaiveDate, f64)]) -> PlotPoints {
    values.iter().map(|(d, v)| [day_number(*d), *v]).collect()
}

fn region_panel(ui: &mut Ui, cell: &GridCell, height: f32) {
    let series: &RegionSeries = &cell.series;
    let [y_min, y_max] = cell.y_range;
    let (x_min, x_max) = match series.date_span() {
        Some((first, last)) if first < last => (day_number(first), day_number(last)),
        Some((only, _)) => (day_number(only) - 1.0, day_number(only) + 1.0),
        None => (0.0, 1.0),
    };

    let low_fill = color::band_fill(ColorCategory::Low);
    let high_fill = color::band_fill(ColorCategory::High);

    Plot::new(("rt_region", cell.series.region.as_str()))
        .height(height)
        .x_axis_label(cell.x_label)
        .y_axis_label(cell.y_label)
        .x_axis_formatter(|mark, _range| format_day(mark.value))
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.set_plot_bounds(PlotBounds::from_min_max([x_min, y_min], [x_max, y_max]));

            for quad in band_segments(&series.lower, &series.split) {
                plot_ui.polygon(
                    Polygon::new(PlotPoints::from(quad))
                        .fill_color(low_fill)
                        .stroke(Stroke::NONE),
                );
            }
            for quad in band_segments(&series.split, &series.upper) {
                plot_ui.polygon(
                    Polygon::new(PlotPoints::from(quad))
                        .fill_color(high_fill)
                        .stroke(Stroke::NONE),
                );
            }

            plot_ui.line(
                Line::new(series_points(&series.mean))
                    .name("mean")
                    .color(color::MEAN_LINE)
                    .width(1.5),
            );
            plot_ui.hline(threshold_line());
        });
}
