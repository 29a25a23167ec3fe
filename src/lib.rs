//! DuPont - return on equity decomposition for financial statement workbooks
//!
//! Each sheet of the input workbook holds the quarterly statements of one
//! equity. For every sheet this library looks up net profit, sales, total
//! assets and shareholders' equity, computes
//!
//! ```text
//! ROE = net_profit/sales × sales/total_assets × total_assets/equity × 100
//! ```
//!
//! per quarter, and consolidates the results into one table of equities by
//! chronologically sorted periods.
//!
//! # Features
//!
//! - Reads .xlsx, .xls and .ods workbooks
//! - Sheets with a missing line item are skipped, never fatal
//! - Non-numeric cells and zero denominators become missing values
//! - Writes the ROE table to a single-sheet .xlsx
//!
//! # Example
//!
//! ```no_run
//! use dupont::core::DupontCalculator;
//! use std::path::Path;
//!
//! let calculator = DupontCalculator::default();
//! let report = calculator.analyze(
//!     Path::new("finansallar.xlsx"),
//!     Path::new("dupont_analysis_output.xlsx"),
//! )?;
//!
//! println!("Equities: {}", report.table.row_count());
//! for diagnostic in &report.diagnostics {
//!     println!("{}", diagnostic);
//! }
//! # Ok::<(), dupont::error::DupontError>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod excel;
pub mod types;

// Re-export commonly used types
pub use crate::config::DupontConfig;
pub use crate::core::{DupontCalculator, DupontReport};
pub use error::{DupontError, DupontResult};
pub use types::{Diagnostic, DupontComponents, EquityRoe, RoeTable};
