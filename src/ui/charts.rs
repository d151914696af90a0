use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::state::{AppState, ChartKind};

// ---------------------------------------------------------------------------
// Central panel – comparison charts
// ---------------------------------------------------------------------------

/// Render the selected chart for the current region/year-window selection.
pub fn comparison_chart(ui: &mut Ui, state: &AppState) {
    if state.store.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a spreadsheet to compare salaries  (File → Open…)");
        });
        return;
    }
    if state.series.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Select at least one region");
        });
        return;
    }

    ui.heading(chart_title(state));
    match state.chart {
        ChartKind::Bars => bar_chart(ui, state),
        ChartKind::Points => point_chart(ui, state),
        ChartKind::Pie => pie_chart(ui, state),
    }
}

fn chart_title(state: &AppState) -> String {
    match state.chart {
        ChartKind::Bars | ChartKind::Points => format!(
            "Average salary by region, {}–{}",
            state.year_lo, state.year_hi
        ),
        ChartKind::Pie => {
            let region = state
                .series
                .first()
                .map(|s| s.region.as_str())
                .unwrap_or("–");
            format!("Salary share of {region}, {}–{}", state.year_lo, state.year_hi)
        }
    }
}

fn color_for(state: &AppState, region: &str) -> Color32 {
    state
        .colors
        .get(region)
        .copied()
        .unwrap_or(Color32::LIGHT_BLUE)
}

/// Tick formatter putting one year label at each integer position.
fn year_tick_formatter(
    labels: Vec<String>,
) -> impl Fn(egui_plot::GridMark, &std::ops::RangeInclusive<f64>) -> String + 'static {
    move |mark, _range| {
        let idx = mark.value.round();
        if (mark.value - idx).abs() > 1e-3 || idx < 0.0 {
            return String::new();
        }
        labels.get(idx as usize).cloned().unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Grouped bar chart
// ---------------------------------------------------------------------------

fn bar_chart(ui: &mut Ui, state: &AppState) {
    let n = state.series.len();
    let group_width = 0.8;
    let bar_width = group_width / n as f64;

    Plot::new("salary_bars")
        .legend(Legend::default())
        .y_axis_label("Salary")
        .x_axis_formatter(year_tick_formatter(state.year_labels()))
        .show(ui, |plot_ui| {
            for (j, series) in state.series.iter().enumerate() {
                let color = color_for(state, &series.region);
                let bars: Vec<Bar> = series
                    .values
                    .iter()
                    .enumerate()
                    .filter(|(_, v)| !v.is_nan())
                    .map(|(i, &v)| {
                        let x = i as f64 - group_width / 2.0 + bar_width * (j as f64 + 0.5);
                        Bar::new(x, v).width(bar_width * 0.9).fill(color)
                    })
                    .collect();
                plot_ui.bar_chart(BarChart::new(bars).color(color).name(&series.region));
            }
        });
}

// ---------------------------------------------------------------------------
// Point chart
// ---------------------------------------------------------------------------

fn point_chart(ui: &mut Ui, state: &AppState) {
    Plot::new("salary_points")
        .legend(Legend::default())
        .y_axis_label("Salary")
        .x_axis_formatter(year_tick_formatter(state.year_labels()))
        .show(ui, |plot_ui| {
            for series in &state.series {
                let points: PlotPoints = series
                    .values
                    .iter()
                    .enumerate()
                    .filter(|(_, v)| !v.is_nan())
                    .map(|(i, &v)| [i as f64, v])
                    .collect();
                plot_ui.points(
                    Points::new(points)
                        .name(&series.region)
                        .color(color_for(state, &series.region))
                        .radius(4.0),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

/// Proportion chart for the first selected region: one sector per window
/// year, labelled `year: value (share%)`.
fn pie_chart(ui: &mut Ui, state: &AppState) {
    let Some(series) = state.series.first() else {
        return;
    };
    let labels = state.year_labels();
    let slices: Vec<(String, f64)> = labels
        .iter()
        .zip(&series.values)
        .filter(|(_, v)| !v.is_nan())
        .map(|(l, &v)| (l.clone(), v))
        .collect();
    let total: f64 = slices.iter().map(|(_, v)| v).sum();
    if total <= 0.0 {
        ui.label("No salary data in the selected window.");
        return;
    }

    let palette = crate::color::generate_palette(slices.len());

    Plot::new("salary_pie")
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            let mut angle = std::f64::consts::FRAC_PI_2; // start at 12 o'clock
            for ((label, value), color) in slices.iter().zip(palette) {
                let share = value / total;
                let sweep = share * std::f64::consts::TAU;

                plot_ui.polygon(
                    Polygon::new(PlotPoints::from(sector_points(angle, angle - sweep)))
                        .fill_color(color)
                        .name(label),
                );

                let mid = angle - sweep / 2.0;
                plot_ui.text(Text::new(
                    PlotPoint::new(0.65 * mid.cos(), 0.65 * mid.sin()),
                    format!("{label}: {value:.0} ({:.1}%)", share * 100.0),
                ));
                angle -= sweep;
            }
        });
}

/// Unit-circle sector from `a0` to `a1` (radians) as a fan of points.
fn sector_points(a0: f64, a1: f64) -> Vec<[f64; 2]> {
    let steps = ((a0 - a1).abs() / 0.05).ceil().max(2.0) as usize;
    let mut points = Vec::with_capacity(steps + 2);
    points.push([0.0, 0.0]);
    for i in 0..=steps {
        let a = a0 + (a1 - a0) * i as f64 / steps as f64;
        points.push([a.cos(), a.sin()]);
    }
    points
}
