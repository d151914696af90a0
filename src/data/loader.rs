use std::path::Path;

use anyhow::{Context, Result, bail};
use calamine::{Data, Reader, open_workbook_auto};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::model::{Entry, RecordStore};

// ---------------------------------------------------------------------------
// Cell grid – the black-box boundary to spreadsheet parsing
// ---------------------------------------------------------------------------

/// One parsed spreadsheet cell. File readers only have to yield these by
/// row/column; everything downstream is format-agnostic.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Number(f64),
    Text(String),
}

impl Cell {
    /// Interpret the cell as an integer: numbers truncate, text is parsed.
    fn as_i64(&self) -> Option<i64> {
        match self {
            Cell::Number(f) if f.is_finite() => Some(*f as i64),
            Cell::Number(_) => None,
            Cell::Text(s) => s.trim().parse::<i64>().ok(),
        }
    }

    /// The cell rendered as a label (region names).
    fn label(&self) -> String {
        match self {
            Cell::Number(f) if f.fract() == 0.0 => format!("{}", *f as i64),
            Cell::Number(f) => format!("{f}"),
            Cell::Text(s) => s.trim().to_string(),
        }
    }
}

/// Row-major cell grid; `None` is an empty cell. Rows may be ragged.
pub type Grid = Vec<Vec<Option<Cell>>>;

fn cell_at(grid: &Grid, row: usize, col: usize) -> Option<&Cell> {
    grid.get(row)?.get(col)?.as_ref()
}

// ---------------------------------------------------------------------------
// SheetLayout – the declared data window
// ---------------------------------------------------------------------------

/// Where the data lives in the sheet, 0-based and inclusive. Anything outside
/// this window is ignored. The default mirrors the source workbook this tool
/// was written for: region labels in column A, year headers in row 4, salary
/// values in B5:S101.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetLayout {
    /// Row holding one integer year per data column.
    pub header_row: usize,
    /// Column holding one region name per data row.
    pub label_col: usize,
    pub first_data_row: usize,
    pub last_data_row: usize,
    pub first_data_col: usize,
    pub last_data_col: usize,
}

impl Default for SheetLayout {
    fn default() -> Self {
        SheetLayout {
            header_row: 3,
            label_col: 0,
            first_data_row: 4,
            last_data_row: 100,
            first_data_col: 1,
            last_data_col: 18,
        }
    }
}

impl SheetLayout {
    /// Load a layout from a JSON sidecar file. Missing keys fall back to the
    /// defaults, so a sidecar only has to name what differs.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).context("reading layout file")?;
        serde_json::from_str(&text).context("parsing layout JSON")
    }
}

// ---------------------------------------------------------------------------
// Grid → RecordStore
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoadError {
    #[error("year header at column {col} is not an integer (found {found:?})")]
    YearHeader { col: usize, found: Option<String> },
}

/// Build a [`RecordStore`] from a cell grid: one entry per non-empty salary
/// cell inside the layout's window, emitted row-major so that a single
/// region's entries come out in column (year) order.
///
/// A non-numeric salary cell is skipped, as is a row without a region label.
/// A column's year header is only consulted once that column contributes a
/// value; a header that does not parse as an integer fails construction.
pub fn from_grid(grid: &Grid, layout: &SheetLayout) -> Result<RecordStore, LoadError> {
    let mut years: Vec<Option<i32>> = vec![None; layout.last_data_col + 1];
    let mut entries = Vec::new();

    for row in layout.first_data_row..=layout.last_data_row {
        let Some(region) = cell_at(grid, row, layout.label_col).map(Cell::label) else {
            continue;
        };
        if region.is_empty() {
            continue;
        }

        for col in layout.first_data_col..=layout.last_data_col {
            let Some(salary) = cell_at(grid, row, col).and_then(Cell::as_i64) else {
                continue;
            };
            let year = match years[col] {
                Some(y) => y,
                None => {
                    let y = parse_year_header(grid, layout, col)?;
                    years[col] = Some(y);
                    y
                }
            };
            entries.push(Entry::new(year, region.clone(), salary));
        }
    }

    Ok(RecordStore::new(entries))
}

fn parse_year_header(grid: &Grid, layout: &SheetLayout, col: usize) -> Result<i32, LoadError> {
    let cell = cell_at(grid, layout.header_row, col);
    cell.and_then(Cell::as_i64)
        .and_then(|y| i32::try_from(y).ok())
        .ok_or_else(|| LoadError::YearHeader {
            col,
            found: cell.map(Cell::label),
        })
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a record store from a spreadsheet file. Dispatch by extension.
///
/// Supported formats:
/// * `.xlsx` / `.xls` / `.ods` – first worksheet of the workbook
/// * `.csv`  – the sheet exported as a plain cell grid
pub fn load_file(path: &Path, layout: &SheetLayout) -> Result<RecordStore> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let grid = match ext.as_str() {
        "xlsx" | "xlsm" | "xls" | "ods" => read_workbook_grid(path)?,
        "csv" => read_csv_grid(path)?,
        other => bail!("Unsupported file extension: .{other}"),
    };

    let store = from_grid(&grid, layout)?;
    Ok(store)
}

// ---------------------------------------------------------------------------
// Workbook reader (calamine)
// ---------------------------------------------------------------------------

fn read_workbook_grid(path: &Path) -> Result<Grid> {
    let mut workbook = open_workbook_auto(path).context("opening workbook")?;
    let range = workbook
        .worksheet_range_at(0)
        .context("workbook has no worksheets")?
        .context("reading first worksheet")?;

    let Some((end_row, end_col)) = range.end() else {
        return Ok(Grid::new());
    };
    let (start_row, start_col) = range.start().unwrap_or((0, 0));

    let mut grid: Grid = vec![vec![None; end_col as usize + 1]; end_row as usize + 1];
    for (row, col, data) in range.used_cells() {
        let cell = match data {
            Data::Empty | Data::Error(_) => None,
            Data::String(s) => {
                let t = s.trim();
                (!t.is_empty()).then(|| Cell::Text(t.to_string()))
            }
            Data::Float(f) => Some(Cell::Number(*f)),
            Data::Int(i) => Some(Cell::Number(*i as f64)),
            Data::Bool(b) => Some(Cell::Text(b.to_string())),
            Data::DateTime(dt) => Some(Cell::Number(dt.as_f64())),
            Data::DateTimeIso(s) | Data::DurationIso(s) => Some(Cell::Text(s.clone())),
        };
        grid[start_row as usize + row][start_col as usize + col] = cell;
    }
    Ok(grid)
}

// ---------------------------------------------------------------------------
// CSV reader
// ---------------------------------------------------------------------------

/// A CSV export of the sheet: no header handling, every record is one grid
/// row, blank fields are empty cells.
fn read_csv_grid(path: &Path) -> Result<Grid> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .context("opening CSV")?;

    let mut grid = Grid::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let row: Vec<Option<Cell>> = record
            .iter()
            .map(|field| {
                let t = field.trim();
                if t.is_empty() {
                    None
                } else if let Ok(f) = t.parse::<f64>() {
                    Some(Cell::Number(f))
                } else {
                    Some(Cell::Text(t.to_string()))
                }
            })
            .collect();
        grid.push(row);
    }
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Field;

    fn txt(s: &str) -> Option<Cell> {
        Some(Cell::Text(s.to_string()))
    }

    fn num(f: f64) -> Option<Cell> {
        Some(Cell::Number(f))
    }

    /// A 2-region × 2-year grid in a small window.
    fn layout() -> SheetLayout {
        SheetLayout {
            header_row: 0,
            label_col: 0,
            first_data_row: 1,
            last_data_row: 2,
            first_data_col: 1,
            last_data_col: 2,
        }
    }

    #[test]
    fn builds_one_entry_per_data_cell_row_major() {
        let grid: Grid = vec![
            vec![None, num(2011.0), txt("2012")],
            vec![txt("North"), num(100.0), num(120.0)],
            vec![txt("South"), num(200.0), num(220.0)],
        ];
        let store = from_grid(&grid, &layout()).unwrap();
        assert_eq!(store.len(), 4);
        assert_eq!(
            store.entries()[0],
            Entry::new(2011, "North", 100)
        );
        // Row-major: both North cells precede the South cells.
        assert_eq!(store.entries()[1], Entry::new(2012, "North", 120));
        assert_eq!(store.entries()[2], Entry::new(2011, "South", 200));
    }

    #[test]
    fn non_numeric_and_empty_cells_are_skipped() {
        let grid: Grid = vec![
            vec![None, num(2011.0), num(2012.0)],
            vec![txt("North"), txt("n/a"), None],
            vec![txt("South"), num(200.0), num(220.0)],
        ];
        let store = from_grid(&grid, &layout()).unwrap();
        assert_eq!(store.len(), 2);
        assert!(store.entries().iter().all(|e| e.region == "South"));
    }

    #[test]
    fn rows_without_a_label_are_skipped() {
        let grid: Grid = vec![
            vec![None, num(2011.0), num(2012.0)],
            vec![None, num(100.0), num(120.0)],
            vec![txt("South"), num(200.0), None],
        ];
        let store = from_grid(&grid, &layout()).unwrap();
        assert_eq!(store.pluck(Field::Salary).len(), 1);
    }

    #[test]
    fn bad_year_header_fails_construction() {
        let grid: Grid = vec![
            vec![None, txt("not a year"), num(2012.0)],
            vec![txt("North"), num(100.0), num(120.0)],
        ];
        let layout = SheetLayout {
            last_data_row: 1,
            ..layout()
        };
        let err = from_grid(&grid, &layout).unwrap_err();
        assert_eq!(
            err,
            LoadError::YearHeader {
                col: 1,
                found: Some("not a year".to_string()),
            }
        );
    }

    #[test]
    fn bad_header_over_an_empty_column_is_ignored() {
        // Column 1 has no data, so its unparseable header is never consulted.
        let grid: Grid = vec![
            vec![None, txt("?"), num(2012.0)],
            vec![txt("North"), None, num(120.0)],
        ];
        let layout = SheetLayout {
            last_data_row: 1,
            ..layout()
        };
        let store = from_grid(&grid, &layout).unwrap();
        assert_eq!(store.entries(), &[Entry::new(2012, "North", 120)]);
    }

    #[test]
    fn cells_outside_the_window_are_ignored() {
        let grid: Grid = vec![
            vec![txt("junk"), num(2011.0), num(2012.0), num(2013.0)],
            vec![txt("North"), num(100.0), num(120.0), num(999.0)],
            vec![txt("South"), num(200.0), num(220.0), num(999.0)],
            vec![txt("Ghost"), num(300.0), num(320.0), num(999.0)],
        ];
        let store = from_grid(&grid, &layout()).unwrap();
        assert_eq!(store.len(), 4);
        assert!(!store.regions().contains("Ghost"));
        assert!(store.entries().iter().all(|e| e.salary != 999));
    }

    #[test]
    fn empty_window_yields_empty_store() {
        let store = from_grid(&Grid::new(), &layout()).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn default_layout_matches_the_source_workbook() {
        let layout = SheetLayout::default();
        assert_eq!(layout.header_row, 3);
        assert_eq!((layout.first_data_row, layout.last_data_row), (4, 100));
        assert_eq!((layout.first_data_col, layout.last_data_col), (1, 18));
    }

    #[test]
    fn layout_sidecar_only_needs_the_overrides() {
        let layout: SheetLayout =
            serde_json::from_str(r#"{ "header_row": 0, "first_data_row": 1 }"#).unwrap();
        assert_eq!(layout.header_row, 0);
        assert_eq!(layout.first_data_row, 1);
        assert_eq!(layout.last_data_col, SheetLayout::default().last_data_col);
    }
}
