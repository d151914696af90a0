use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;

use crate::color::region_colors;
use crate::data::loader::SheetLayout;
use crate::data::model::{Field, RecordStore, Value};
use crate::data::stats::StatsError;

// ---------------------------------------------------------------------------
// Chart selection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bars,
    Points,
    Pie,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [ChartKind::Bars, ChartKind::Points, ChartKind::Pie];

    pub fn label(self) -> &'static str {
        match self {
            ChartKind::Bars => "Bar chart",
            ChartKind::Points => "Point chart",
            ChartKind::Pie => "Pie chart",
        }
    }
}

// ---------------------------------------------------------------------------
// Derived presentation data
// ---------------------------------------------------------------------------

/// One named numeric sequence handed to the charts: a region's salary per
/// year of the selected window, aligned with [`AppState::year_labels`].
/// Years without a value hold `NAN` and are skipped when drawing.
#[derive(Debug, Clone)]
pub struct Series {
    pub region: String,
    pub values: Vec<f64>,
}

/// Summary statistics for one region over the selected year window.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionSummary {
    pub min: i64,
    pub max: i64,
    pub mean: f64,
    pub median: f64,
    /// `None` when the most frequent salary is tied.
    pub mode: Option<i64>,
    pub avg_increase: f64,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded record store (None until the user opens a file).
    pub store: Option<RecordStore>,

    /// Data window used when loading spreadsheets.
    pub layout: SheetLayout,

    /// All region names present in the store.
    pub regions: Vec<String>,

    /// Regions currently selected for charting.
    pub selected: BTreeSet<String>,

    /// Inclusive year window.
    pub year_lo: i32,
    pub year_hi: i32,

    /// Year extent of the loaded store, for the sliders.
    pub year_bounds: (i32, i32),

    pub chart: ChartKind,

    /// Cached per-region series for the current selection.
    pub series: Vec<Series>,

    /// Cached per-region summaries for the current selection.
    pub summaries: BTreeMap<String, RegionSummary>,

    /// Stable region → colour assignment.
    pub colors: BTreeMap<String, Color32>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a file loading operation is in progress.
    pub loading: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            store: None,
            layout: SheetLayout::default(),
            regions: Vec::new(),
            selected: BTreeSet::new(),
            year_lo: 0,
            year_hi: 0,
            year_bounds: (0, 0),
            chart: ChartKind::Bars,
            series: Vec::new(),
            summaries: BTreeMap::new(),
            colors: BTreeMap::new(),
            status_message: None,
            loading: false,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded store: reset the selection to everything and
    /// widen the year window to the data's extent.
    pub fn set_store(&mut self, store: RecordStore) {
        self.regions = store.regions().into_iter().collect();
        self.selected = self.regions.iter().cloned().collect();
        self.colors = region_colors(&self.regions);
        self.year_bounds = store.year_bounds().unwrap_or((0, 0));
        (self.year_lo, self.year_hi) = self.year_bounds;

        self.store = Some(store);
        self.status_message = None;
        self.loading = false;
        self.rebuild();
    }

    /// The fixed category labels the charts share, one per window year.
    pub fn year_labels(&self) -> Vec<String> {
        self.window_years().iter().map(i32::to_string).collect()
    }

    pub fn window_years(&self) -> Vec<i32> {
        (self.year_lo..=self.year_hi).collect()
    }

    /// Recompute the cached series and summaries after any selection change.
    pub fn rebuild(&mut self) {
        self.series.clear();
        self.summaries.clear();
        let Some(store) = &self.store else {
            return;
        };

        let years = self.window_years();
        for region in &self.selected {
            let by_region = store.equals(Field::Region, region.as_str(), false);

            // One value per window year, NAN where the sheet had a hole,
            // so every series lines up with the shared year labels.
            let values: Vec<f64> = years
                .iter()
                .map(|&y| {
                    by_region
                        .equals(Field::Year, y, false)
                        .pluck(Field::Salary)
                        .first()
                        .and_then(Value::as_i64)
                        .map_or(f64::NAN, |s| s as f64)
                })
                .collect();
            self.series.push(Series {
                region: region.clone(),
                values,
            });

            let windowed = by_region.in_range(Field::Year, self.year_lo, self.year_hi, false);
            if let Some(summary) = summarize(&windowed) {
                self.summaries.insert(region.clone(), summary);
            }
        }
    }

    /// Toggle a region in the chart selection.
    pub fn toggle_region(&mut self, region: &str) {
        if !self.selected.remove(region) {
            self.selected.insert(region.to_string());
        }
        self.rebuild();
    }

    pub fn select_all(&mut self) {
        self.selected = self.regions.iter().cloned().collect();
        self.rebuild();
    }

    pub fn select_none(&mut self) {
        self.selected.clear();
        self.rebuild();
    }

    /// Clamp and apply a new year window.
    pub fn set_year_window(&mut self, lo: i32, hi: i32) {
        self.year_lo = lo.clamp(self.year_bounds.0, self.year_bounds.1);
        self.year_hi = hi.clamp(self.year_lo, self.year_bounds.1);
        self.rebuild();
    }
}

/// Run the statistics chain over one region's windowed store. An empty
/// window has no summary; a tied mode is shown as absent rather than
/// substituting a value.
fn summarize(store: &RecordStore) -> Option<RegionSummary> {
    let salary = Field::Salary;
    let mode = match store.mode(salary) {
        Ok(m) => Some(m),
        Err(StatsError::NoUniqueMode(_)) => None,
        Err(_) => return None,
    };
    Some(RegionSummary {
        min: store.min(salary).ok()?,
        max: store.max(salary).ok()?,
        mean: store.mean(salary).ok()?,
        median: store.median(salary).ok()?,
        mode,
        avg_increase: store.average_increase(salary).ok()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Entry;

    fn demo_store() -> RecordStore {
        RecordStore::new(vec![
            Entry::new(2011, "North", 100),
            Entry::new(2012, "North", 120),
            Entry::new(2013, "North", 135),
            Entry::new(2011, "South", 200),
            Entry::new(2012, "South", 200),
            Entry::new(2013, "South", 260),
        ])
    }

    #[test]
    fn set_store_selects_everything_and_builds_series() {
        let mut state = AppState::default();
        state.set_store(demo_store());

        assert_eq!(state.regions, vec!["North", "South"]);
        assert_eq!((state.year_lo, state.year_hi), (2011, 2013));
        assert_eq!(state.year_labels(), vec!["2011", "2012", "2013"]);
        assert_eq!(state.series.len(), 2);
        assert_eq!(state.series[0].values, vec![100.0, 120.0, 135.0]);
    }

    #[test]
    fn series_align_missing_years_as_nan() {
        let mut state = AppState::default();
        state.set_store(RecordStore::new(vec![
            Entry::new(2011, "North", 100),
            Entry::new(2013, "North", 135),
        ]));
        let values = &state.series[0].values;
        assert_eq!(values.len(), 3);
        assert!(values[1].is_nan());
    }

    #[test]
    fn summaries_run_the_statistics_chain() {
        let mut state = AppState::default();
        state.set_store(demo_store());

        let north = &state.summaries["North"];
        assert_eq!((north.min, north.max), (100, 135));
        assert_eq!(north.median, 120.0);
        // [100, 120, 135] has no repeated salary: mode is a three-way tie.
        assert_eq!(north.mode, None);
        assert_eq!(north.avg_increase, 17.5);

        let south = &state.summaries["South"];
        assert_eq!(south.mode, Some(200));
    }

    #[test]
    fn narrowing_the_window_recomputes() {
        let mut state = AppState::default();
        state.set_store(demo_store());
        state.set_year_window(2012, 2013);

        assert_eq!(state.series[0].values, vec![120.0, 135.0]);
        assert_eq!(state.summaries["North"].min, 120);
        // Window bounds clamp to the data extent.
        state.set_year_window(1990, 2050);
        assert_eq!((state.year_lo, state.year_hi), (2011, 2013));
    }

    #[test]
    fn deselecting_drops_the_series() {
        let mut state = AppState::default();
        state.set_store(demo_store());
        state.toggle_region("North");
        assert_eq!(state.series.len(), 1);
        assert_eq!(state.series[0].region, "South");
        state.select_none();
        assert!(state.series.is_empty());
        assert!(state.summaries.is_empty());
    }
}
