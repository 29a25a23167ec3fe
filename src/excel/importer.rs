//! Workbook importer - financial statement sheets (.xlsx/.xls/.ods) → `FinancialSheet`

use crate::config::DupontConfig;
use crate::error::{DupontError, DupontResult};
use calamine::{open_workbook_auto, Data, Range, Reader, Sheets};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Workbook reader over every sheet of an input file
pub struct WorkbookImporter {
    workbook: Sheets<BufReader<File>>,
}

impl WorkbookImporter {
    /// Open a workbook. Failing here is fatal for the whole run.
    pub fn open<P: AsRef<Path>>(path: P) -> DupontResult<Self> {
        let path = path.as_ref();
        let workbook = open_workbook_auto(path).map_err(|e| {
            DupontError::Workbook(format!("Failed to open '{}': {}", path.display(), e))
        })?;

        Ok(Self { workbook })
    }

    /// Sheet names in workbook order
    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names()
    }

    /// Load one sheet and index it by its label column
    pub fn read_sheet(
        &mut self,
        sheet_name: &str,
        config: &DupontConfig,
    ) -> DupontResult<FinancialSheet> {
        let range = self
            .workbook
            .worksheet_range(sheet_name)
            .map_err(|e| DupontError::SheetParse {
                sheet: sheet_name.to_string(),
                reason: e.to_string(),
            })?;

        FinancialSheet::from_range(sheet_name, &range, config)
    }
}

/// A statement sheet indexed by row label.
///
/// Holds the period column labels and, per row label, the raw cells under
/// those columns.
#[derive(Debug, Clone, PartialEq)]
pub struct FinancialSheet {
    pub name: String,
    pub periods: Vec<String>,
    rows: HashMap<String, Vec<Data>>,
}

impl FinancialSheet {
    /// Build from a worksheet range whose first row is the header
    pub fn from_range(
        name: &str,
        range: &Range<Data>,
        config: &DupontConfig,
    ) -> DupontResult<Self> {
        let parse_error = |reason: String| DupontError::SheetParse {
            sheet: name.to_string(),
            reason,
        };

        if range.is_empty() {
            return Err(parse_error("sheet is empty".to_string()));
        }

        let (height, width) = range.get_size();

        let header: Vec<String> = (0..width)
            .map(|col| range.get((0, col)).map(cell_text).unwrap_or_default())
            .collect();

        let label_col = header
            .iter()
            .position(|h| *h == config.label_column)
            .ok_or_else(|| parse_error(format!("no '{}' column", config.label_column)))?;

        // Columns after the label column is set aside, minus the metadata columns
        let period_cols: Vec<usize> = (0..width)
            .filter(|&col| col != label_col)
            .skip(config.metadata_columns)
            .collect();

        // Duplicate period labels: first position kept, last column's cells win
        let mut periods: Vec<String> = Vec::new();
        let mut sources: Vec<usize> = Vec::new();
        for &col in &period_cols {
            let label = header[col].clone();
            match periods.iter().position(|p| *p == label) {
                Some(idx) => sources[idx] = col,
                None => {
                    periods.push(label);
                    sources.push(col);
                }
            }
        }

        let mut rows: HashMap<String, Vec<Data>> = HashMap::new();
        for row in 1..height {
            let label = match range.get((row, label_col)) {
                Some(cell) if !matches!(cell, Data::Empty) => cell_text(cell),
                _ => continue,
            };

            // Duplicate row labels: first occurrence wins
            rows.entry(label).or_insert_with(|| {
                sources
                    .iter()
                    .map(|&col| range.get((row, col)).cloned().unwrap_or(Data::Empty))
                    .collect()
            });
        }

        Ok(Self {
            name: name.to_string(),
            periods,
            rows,
        })
    }

    /// Numeric values of a row, aligned to `periods`. `None` if the label is absent.
    pub fn row(&self, label: &str) -> Option<Vec<Option<f64>>> {
        self.rows
            .get(label)
            .map(|cells| cells.iter().map(coerce_numeric).collect())
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Text of a header or label cell, as written. Labels match exactly.
fn cell_text(cell: &Data) -> String {
    cell.to_string()
}

/// Coerce a cell to a number; anything unparseable is missing
pub fn coerce_numeric(cell: &Data) -> Option<f64> {
    let value = match cell {
        Data::Float(f) => *f,
        Data::Int(i) => *i as f64,
        Data::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Data::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };

    if value.is_nan() {
        None
    } else {
        Some(value)
    }
}
