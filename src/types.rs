use crate::core::periods::chronological_order;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

//==============================================================================
// Line Items
//==============================================================================

/// The four statement rows the DuPont identity is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineItem {
    NetProfit,
    Sales,
    TotalAssets,
    Equity,
}

//==============================================================================
// Per-Sheet Results
//==============================================================================

/// DuPont components for one period. Any of them may be missing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct DupontComponents {
    pub profit_margin: Option<f64>,
    pub asset_turnover: Option<f64>,
    pub equity_multiplier: Option<f64>,
    /// Return on equity in percent
    pub roe: Option<f64>,
}

/// ROE series of one equity (one sheet), aligned to its period labels
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquityRoe {
    pub equity: String,
    pub periods: Vec<String>,
    pub components: Vec<DupontComponents>,
}

impl EquityRoe {
    /// ROE for a single period label
    pub fn roe_at(&self, period: &str) -> Option<f64> {
        self.periods
            .iter()
            .position(|p| p == period)
            .and_then(|idx| self.components[idx].roe)
    }
}

//==============================================================================
// Diagnostics
//==============================================================================

/// A non-fatal condition met during a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A sheet could not be loaded or has no label column
    SheetParse { sheet: String, reason: String },
    /// A required line item row is absent
    MissingLineItem { sheet: String, label: String },
    /// A period label is not a `YYYY/MM` date, columns were left unsorted
    ChronologicalSort { label: String },
}

impl Diagnostic {
    /// Sheet the diagnostic refers to, if any
    pub fn sheet(&self) -> Option<&str> {
        match self {
            Diagnostic::SheetParse { sheet, .. } | Diagnostic::MissingLineItem { sheet, .. } => {
                Some(sheet.as_str())
            }
            Diagnostic::ChronologicalSort { .. } => None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::SheetParse { sheet, reason } => {
                write!(f, "Sheet '{}' could not be read: {}", sheet, reason)
            }
            Diagnostic::MissingLineItem { sheet, label } => write!(
                f,
                "Line item '{}' not found in sheet '{}', skipping",
                label, sheet
            ),
            Diagnostic::ChronologicalSort { label } => write!(
                f,
                "Period '{}' is not a YYYY/MM date, columns left in original order",
                label
            ),
        }
    }
}

//==============================================================================
// Output Table
//==============================================================================

/// One output row: an equity and its ROE per table period
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoeRow {
    pub equity: String,
    pub values: Vec<Option<f64>>,
}

/// Consolidated ROE table: equities by periods
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoeTable {
    pub equity_header: String,
    pub periods: Vec<String>,
    pub rows: Vec<RoeRow>,
}

impl RoeTable {
    /// Create an empty table
    pub fn new(equity_header: impl Into<String>) -> Self {
        Self {
            equity_header: equity_header.into(),
            periods: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Assemble per-equity results into one table.
    ///
    /// Rows keep result order. Columns are the union of period labels in the
    /// order they are first seen; an equity without a period gets `None`.
    pub fn from_results(equity_header: impl Into<String>, results: &[EquityRoe]) -> Self {
        let mut table = Self::new(equity_header);

        for result in results {
            for period in &result.periods {
                if !table.periods.contains(period) {
                    table.periods.push(period.clone());
                }
            }
        }

        for result in results {
            let by_period: HashMap<&str, Option<f64>> = result
                .periods
                .iter()
                .map(String::as_str)
                .zip(result.components.iter().map(|c| c.roe))
                .collect();

            let values = table
                .periods
                .iter()
                .map(|p| by_period.get(p.as_str()).copied().flatten())
                .collect();

            table.rows.push(RoeRow {
                equity: result.equity.clone(),
                values,
            });
        }

        table
    }

    /// Reorder columns chronologically.
    ///
    /// Leaves the table untouched and returns a diagnostic when a period label
    /// is not a `YYYY/MM` date.
    pub fn sort_chronologically(&mut self) -> Option<Diagnostic> {
        let order = match chronological_order(&self.periods) {
            Ok(order) => order,
            Err(label) => return Some(Diagnostic::ChronologicalSort { label }),
        };

        self.periods = order.iter().map(|&i| self.periods[i].clone()).collect();
        for row in &mut self.rows {
            row.values = order.iter().map(|&i| row.values[i]).collect();
        }

        None
    }

    /// Header row: equity header followed by period labels
    pub fn header(&self) -> Vec<&str> {
        std::iter::once(self.equity_header.as_str())
            .chain(self.periods.iter().map(String::as_str))
            .collect()
    }

    /// ROE of an equity for a period, `None` if absent or missing
    pub fn value(&self, equity: &str, period: &str) -> Option<f64> {
        let col = self.periods.iter().position(|p| p == period)?;
        self.rows
            .iter()
            .find(|row| row.equity == equity)
            .and_then(|row| row.values[col])
    }

    /// Equity names in row order
    pub fn equities(&self) -> Vec<&str> {
        self.rows.iter().map(|row| row.equity.as_str()).collect()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
