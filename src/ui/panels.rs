use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::loader::{SheetLayout, load_file};
use crate::state::{AppState, ChartKind};

// ---------------------------------------------------------------------------
// Left side panel – chart, window and region selection
// ---------------------------------------------------------------------------

/// Render the left selection panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Comparison");
    ui.separator();

    if state.store.is_none() {
        ui.label("No spreadsheet loaded.");
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Chart kind selector ----
            ui.strong("Chart");
            egui::ComboBox::from_id_salt("chart_kind")
                .selected_text(state.chart.label())
                .show_ui(ui, |ui: &mut Ui| {
                    for kind in ChartKind::ALL {
                        if ui
                            .selectable_label(state.chart == kind, kind.label())
                            .clicked()
                        {
                            state.chart = kind;
                        }
                    }
                });
            ui.separator();

            // ---- Year window ----
            ui.strong("Years");
            let (min_y, max_y) = state.year_bounds;
            let mut lo = state.year_lo;
            let mut hi = state.year_hi;
            let from = ui.add(egui::Slider::new(&mut lo, min_y..=max_y).text("from"));
            let to = ui.add(egui::Slider::new(&mut hi, min_y..=max_y).text("to"));
            if from.changed() || to.changed() {
                state.set_year_window(lo, hi);
            }
            ui.separator();

            // ---- Region checkboxes ----
            let n_selected = state.selected.len();
            let n_total = state.regions.len();
            ui.strong(format!("Regions  ({n_selected}/{n_total})"));
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all();
                }
                if ui.small_button("None").clicked() {
                    state.select_none();
                }
            });

            let regions = state.regions.clone();
            for region in &regions {
                let mut checked = state.selected.contains(region);
                let mut text = RichText::new(region);
                if let Some(&c) = state.colors.get(region) {
                    text = text.color(c);
                }
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_region(region);
                }
            }
            ui.separator();

            // ---- Statistics readout ----
            ui.strong("Statistics");
            for region in &regions {
                let Some(summary) = state.summaries.get(region) else {
                    continue;
                };
                egui::CollapsingHeader::new(RichText::new(region).strong())
                    .id_salt(region)
                    .default_open(false)
                    .show(ui, |ui: &mut Ui| {
                        ui.monospace(format!("min     {}", summary.min));
                        ui.monospace(format!("max     {}", summary.max));
                        ui.monospace(format!("mean    {:.1}", summary.mean));
                        ui.monospace(format!("median  {:.1}", summary.median));
                        match summary.mode {
                            Some(m) => ui.monospace(format!("mode    {m}")),
                            None => ui.monospace("mode    – (tied)"),
                        };
                        ui.monospace(format!("Δ/year  {:+.1}", summary.avg_increase));
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
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Open layout…").clicked() {
                open_layout_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(store) = &state.store {
            ui.label(format!(
                "{} entries, {} regions, {} selected",
                store.len(),
                state.regions.len(),
                state.selected.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open salary spreadsheet")
        .add_filter("Supported files", &["xlsx", "xlsm", "xls", "ods", "csv"])
        .add_filter("Excel workbook", &["xlsx", "xlsm", "xls", "ods"])
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.loading = true;
        match load_file(&path, &state.layout) {
            Ok(store) => {
                log::info!(
                    "Loaded {} entries across {} regions",
                    store.len(),
                    store.regions().len()
                );
                state.set_store(store);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
                state.loading = false;
            }
        }
    }
}

/// Pick a JSON sidecar describing where the data window sits in the sheet.
/// Takes effect on the next data file opened.
pub fn open_layout_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open sheet layout")
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        match SheetLayout::from_json_file(&path) {
            Ok(layout) => {
                log::info!("Loaded sheet layout {layout:?}");
                state.layout = layout;
                state.status_message =
                    Some("Layout loaded – reopen the data file to apply it".to_string());
            }
            Err(e) => {
                log::error!("Failed to load layout: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
