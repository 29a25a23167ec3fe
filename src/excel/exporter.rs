//! ROE table exporter - `RoeTable` → Excel (.xlsx)

use crate::error::{DupontError, DupontResult};
use crate::types::RoeTable;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;

/// Writes a consolidated ROE table as a single worksheet
pub struct RoeExporter<'a> {
    table: &'a RoeTable,
    sheet_name: String,
}

impl<'a> RoeExporter<'a> {
    /// Create an exporter writing to the default `Sheet1` worksheet
    pub fn new(table: &'a RoeTable) -> Self {
        Self {
            table,
            sheet_name: "Sheet1".to_string(),
        }
    }

    /// Use a different worksheet name
    pub fn with_sheet_name(mut self, sheet_name: impl Into<String>) -> Self {
        self.sheet_name = sheet_name.into();
        self
    }

    /// Export the table to an .xlsx file
    pub fn export(&self, output_path: &Path) -> DupontResult<()> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(&self.sheet_name)
            .map_err(|e| DupontError::Export(format!("Failed to set worksheet name: {}", e)))?;

        self.write_header(worksheet)?;
        self.write_rows(worksheet)?;

        workbook.save(output_path).map_err(|e| {
            DupontError::Export(format!(
                "Failed to save Excel file '{}': {}",
                output_path.display(),
                e
            ))
        })?;

        Ok(())
    }

    /// Header row: equity header, then one column per period
    fn write_header(&self, worksheet: &mut Worksheet) -> DupontResult<()> {
        let header_format = Format::new().set_bold();

        for (col_idx, title) in self.table.header().iter().enumerate() {
            worksheet
                .write_string_with_format(0, col_idx as u16, *title, &header_format)
                .map_err(|e| DupontError::Export(format!("Failed to write header: {}", e)))?;
        }

        worksheet.set_column_width(0, 20).ok();
        Ok(())
    }

    /// One row per equity. Missing ROE cells stay blank.
    fn write_rows(&self, worksheet: &mut Worksheet) -> DupontResult<()> {
        for (row_idx, row) in self.table.rows.iter().enumerate() {
            let excel_row = (row_idx + 1) as u32; // row 0 is the header

            worksheet
                .write_string(excel_row, 0, &row.equity)
                .map_err(|e| DupontError::Export(format!("Failed to write equity: {}", e)))?;

            for (col_idx, value) in row.values.iter().enumerate() {
                if let Some(value) = value {
                    worksheet
                        .write_number(excel_row, (col_idx + 1) as u16, *value)
                        .map_err(|e| {
                            DupontError::Export(format!("Failed to write number: {}", e))
                        })?;
                }
            }
        }

        Ok(())
    }
}
