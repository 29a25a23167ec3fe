//! Excel import/export for the DuPont analysis
//!
//! - Import: financial statement workbook → one `FinancialSheet` per sheet
//! - Export: consolidated `RoeTable` → single-sheet .xlsx

mod exporter;
mod importer;

pub use exporter::RoeExporter;
pub use importer::{coerce_numeric, FinancialSheet, WorkbookImporter};
