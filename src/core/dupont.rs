//! DuPont decomposition: ROE = profit margin × asset turnover × equity multiplier

use crate::config::DupontConfig;
use crate::error::{DupontError, DupontResult};
use crate::excel::{FinancialSheet, RoeExporter, WorkbookImporter};
use crate::types::{Diagnostic, DupontComponents, EquityRoe, LineItem, RoeTable};
use std::path::Path;
use tracing::{debug, info};

impl DupontComponents {
    /// Compute the components for one period.
    ///
    /// A missing operand, a zero denominator or a non-finite quotient makes the
    /// affected ratio missing, and ROE with it.
    pub fn compute(
        net_profit: Option<f64>,
        sales: Option<f64>,
        total_assets: Option<f64>,
        equity: Option<f64>,
    ) -> Self {
        let profit_margin = ratio(net_profit, sales);
        let asset_turnover = ratio(sales, total_assets);
        let equity_multiplier = ratio(total_assets, equity);

        let roe = match (profit_margin, asset_turnover, equity_multiplier) {
            (Some(pm), Some(at), Some(em)) => {
                Some(pm * at * em * 100.0).filter(|v| v.is_finite())
            }
            _ => None,
        };

        Self {
            profit_margin,
            asset_turnover,
            equity_multiplier,
            roe,
        }
    }
}

fn ratio(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
    let (n, d) = (numerator?, denominator?);
    if d == 0.0 {
        return None;
    }
    Some(n / d).filter(|v| v.is_finite())
}

/// Outcome of a full run
#[derive(Debug, Clone, PartialEq)]
pub struct DupontReport {
    pub table: RoeTable,
    pub diagnostics: Vec<Diagnostic>,
    /// Per-equity results, in sheet order
    pub results: Vec<EquityRoe>,
    pub sheets_seen: usize,
}

impl DupontReport {
    /// Sheets that contributed a row
    pub fn sheets_processed(&self) -> usize {
        self.results.len()
    }

    pub fn sheets_skipped(&self) -> usize {
        self.sheets_seen - self.results.len()
    }
}

/// Runs the DuPont analysis over every sheet of a workbook
#[derive(Debug, Clone, Default)]
pub struct DupontCalculator {
    config: DupontConfig,
}

impl DupontCalculator {
    pub fn new(config: DupontConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DupontConfig {
        &self.config
    }

    /// Compute ROE per period for one parsed sheet
    pub fn analyze_sheet(&self, sheet: &FinancialSheet) -> DupontResult<EquityRoe> {
        debug!(sheet = %sheet.name, rows = sheet.row_count(), "looking up line items");
        let lookup = |item: LineItem| {
            let label = self.config.line_items.label(item);
            sheet.row(label).ok_or_else(|| DupontError::MissingLineItem {
                sheet: sheet.name.clone(),
                label: label.to_string(),
            })
        };

        let net_profit = lookup(LineItem::NetProfit)?;
        let sales = lookup(LineItem::Sales)?;
        let total_assets = lookup(LineItem::TotalAssets)?;
        let equity = lookup(LineItem::Equity)?;

        let components = (0..sheet.periods.len())
            .map(|i| {
                DupontComponents::compute(net_profit[i], sales[i], total_assets[i], equity[i])
            })
            .collect();

        Ok(EquityRoe {
            equity: sheet.name.clone(),
            periods: sheet.periods.clone(),
            components,
        })
    }

    /// Read a workbook and build the ROE table.
    ///
    /// Sheet level problems become diagnostics; only failing to open the
    /// workbook is an error.
    pub fn run(&self, input: &Path) -> DupontResult<DupontReport> {
        let mut importer = WorkbookImporter::open(input)?;
        let sheet_names = importer.sheet_names();
        info!(path = %input.display(), sheets = sheet_names.len(), "analyzing workbook");

        let mut results = Vec::new();
        let mut diagnostics = Vec::new();

        for sheet_name in &sheet_names {
            let outcome = importer
                .read_sheet(sheet_name, &self.config)
                .and_then(|sheet| self.analyze_sheet(&sheet));

            match outcome {
                Ok(result) => {
                    debug!(sheet = %sheet_name, periods = result.periods.len(), "sheet analyzed");
                    results.push(result);
                }
                Err(err) => {
                    debug!(sheet = %sheet_name, error = %err, "sheet skipped");
                    diagnostics.push(sheet_diagnostic(err)?);
                }
            }
        }

        let mut table = RoeTable::from_results(self.config.equity_header.clone(), &results);
        if let Some(diagnostic) = table.sort_chronologically() {
            diagnostics.push(diagnostic);
        }

        Ok(DupontReport {
            table,
            diagnostics,
            results,
            sheets_seen: sheet_names.len(),
        })
    }

    /// Run the analysis and write the table to `output`
    pub fn analyze(&self, input: &Path, output: &Path) -> DupontResult<DupontReport> {
        let report = self.run(input)?;
        self.export(&report, output)?;
        Ok(report)
    }

    /// Write a report's table to an .xlsx file
    pub fn export(&self, report: &DupontReport, output: &Path) -> DupontResult<()> {
        RoeExporter::new(&report.table)
            .with_sheet_name(self.config.output_sheet.clone())
            .export(output)?;
        info!(path = %output.display(), rows = report.table.row_count(), "results written");
        Ok(())
    }
}

/// Turn a per-sheet error into a diagnostic; anything else stays fatal
fn sheet_diagnostic(err: DupontError) -> DupontResult<Diagnostic> {
    match err {
        DupontError::SheetParse { sheet, reason } => Ok(Diagnostic::SheetParse { sheet, reason }),
        DupontError::MissingLineItem { sheet, label } => {
            Ok(Diagnostic::MissingLineItem { sheet, label })
        }
        other => Err(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{Data, Range};

    fn text(s: &str) -> Data {
        Data::String(s.to_string())
    }

    /// Sheet with the standard header and one row per (label, values)
    fn sheet(name: &str, periods: &[&str], rows: &[(&str, Vec<Data>)]) -> FinancialSheet {
        let width = (3 + periods.len()) as u32;
        let height = (1 + rows.len()) as u32;
        let mut range = Range::new((0, 0), (height - 1, width - 1));

        for (c, h) in ["itemCode", "itemDescTr", "itemDescEng"]
            .iter()
            .chain(periods.iter())
            .enumerate()
        {
            range.set_value((0, c as u32), text(h));
        }
        for (r, (label, values)) in rows.iter().enumerate() {
            let r = (r + 1) as u32;
            range.set_value((r, 0), text("code"));
            range.set_value((r, 1), text(label));
            range.set_value((r, 2), text("desc"));
            for (c, v) in values.iter().enumerate() {
                range.set_value((r, (c + 3) as u32), v.clone());
            }
        }

        FinancialSheet::from_range(name, &range, &DupontConfig::default()).unwrap()
    }

    fn full_sheet(
        name: &str,
        periods: &[&str],
        np: &[f64],
        s: &[f64],
        ta: &[f64],
        e: &[f64],
    ) -> FinancialSheet {
        let floats = |v: &[f64]| v.iter().map(|&x| Data::Float(x)).collect::<Vec<_>>();
        sheet(
            name,
            periods,
            &[
                ("Dönem Net Kar/Zararı", floats(np)),
                ("Satış Gelirleri", floats(s)),
                ("TOPLAM VARLIKLAR", floats(ta)),
                ("Özkaynaklar", floats(e)),
            ],
        )
    }

    #[test]
    fn test_compute_basic() {
        let c = DupontComponents::compute(Some(10.0), Some(100.0), Some(200.0), Some(50.0));
        assert_eq!(c.profit_margin, Some(0.1));
        assert_eq!(c.asset_turnover, Some(0.5));
        assert_eq!(c.equity_multiplier, Some(4.0));
        assert_eq!(c.roe, Some(0.1 * 0.5 * 4.0 * 100.0));
        assert!((c.roe.unwrap() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_compute_identity() {
        let (np, s, ta, e) = (1_234.5, 98_765.0, 456_789.0, 123_456.0);
        let c = DupontComponents::compute(Some(np), Some(s), Some(ta), Some(e));
        let expected = (np / s) * (s / ta) * (ta / e) * 100.0;
        assert_eq!(c.roe, Some(expected));
        // Collapses to net profit over equity
        assert!((c.roe.unwrap() - np / e * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_compute_zero_sales_is_missing() {
        let c = DupontComponents::compute(Some(10.0), Some(0.0), Some(200.0), Some(50.0));
        assert_eq!(c.profit_margin, None);
        assert_eq!(c.asset_turnover, Some(0.0));
        assert_eq!(c.roe, None);
    }

    #[test]
    fn test_compute_zero_equity_is_missing() {
        let c = DupontComponents::compute(Some(10.0), Some(100.0), Some(200.0), Some(0.0));
        assert_eq!(c.equity_multiplier, None);
        assert_eq!(c.roe, None);
    }

    #[test]
    fn test_compute_missing_operand() {
        let c = DupontComponents::compute(None, Some(100.0), Some(200.0), Some(50.0));
        assert_eq!(c.profit_margin, None);
        assert_eq!(c.asset_turnover, Some(0.5));
        assert_eq!(c.roe, None);
    }

    #[test]
    fn test_compute_negative_profit() {
        let c = DupontComponents::compute(Some(-10.0), Some(100.0), Some(200.0), Some(50.0));
        assert!((c.roe.unwrap() + 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_analyze_sheet() {
        let calculator = DupontCalculator::default();
        let s = full_sheet(
            "A",
            &["2023/01", "2023/04"],
            &[10.0, 30.0],
            &[100.0, 300.0],
            &[200.0, 400.0],
            &[50.0, 150.0],
        );

        let result = calculator.analyze_sheet(&s).unwrap();
        assert_eq!(result.equity, "A");
        assert_eq!(result.periods, vec!["2023/01", "2023/04"]);
        assert!((result.roe_at("2023/01").unwrap() - 20.0).abs() < 1e-9);
        assert!((result.roe_at("2023/04").unwrap() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_analyze_sheet_missing_equity_row() {
        let calculator = DupontCalculator::default();
        let floats = |v: f64| vec![Data::Float(v)];
        let s = sheet(
            "B",
            &["2023/01"],
            &[
                ("Dönem Net Kar/Zararı", floats(10.0)),
                ("Satış Gelirleri", floats(100.0)),
                ("TOPLAM VARLIKLAR", floats(200.0)),
            ],
        );

        match calculator.analyze_sheet(&s) {
            Err(DupontError::MissingLineItem { sheet, label }) => {
                assert_eq!(sheet, "B");
                assert_eq!(label, "Özkaynaklar");
            }
            other => panic!("Expected MissingLineItem, got {:?}", other),
        }
    }

    #[test]
    fn test_analyze_sheet_padded_label_is_missing() {
        let calculator = DupontCalculator::default();
        let floats = |v: f64| vec![Data::Float(v)];
        let s = sheet(
            "C",
            &["2023/01"],
            &[
                ("Dönem Net Kar/Zararı", floats(10.0)),
                ("Satış Gelirleri", floats(100.0)),
                ("TOPLAM VARLIKLAR", floats(200.0)),
                ("Özkaynaklar  ", floats(50.0)),
            ],
        );

        match calculator.analyze_sheet(&s) {
            Err(DupontError::MissingLineItem { sheet, label }) => {
                assert_eq!(sheet, "C");
                assert_eq!(label, "Özkaynaklar");
            }
            other => panic!("Expected MissingLineItem, got {:?}", other),
        }
    }

    #[test]
    fn test_analyze_sheet_reports_first_missing_label() {
        let calculator = DupontCalculator::default();
        let s = sheet("C", &["2023/01"], &[("Özkaynaklar", vec![Data::Float(1.0)])]);

        match calculator.analyze_sheet(&s) {
            Err(DupontError::MissingLineItem { label, .. }) => {
                assert_eq!(label, "Dönem Net Kar/Zararı");
            }
            other => panic!("Expected MissingLineItem, got {:?}", other),
        }
    }

    #[test]
    fn test_analyze_sheet_non_numeric_cell() {
        let calculator = DupontCalculator::default();
        let s = sheet(
            "D",
            &["2023/01", "2023/04"],
            &[
                ("Dönem Net Kar/Zararı", vec![text("-"), Data::Float(10.0)]),
                ("Satış Gelirleri", vec![Data::Float(100.0), Data::Float(100.0)]),
                ("TOPLAM VARLIKLAR", vec![Data::Float(200.0), Data::Float(200.0)]),
                ("Özkaynaklar", vec![Data::Float(50.0), text("50")]),
            ],
        );

        let result = calculator.analyze_sheet(&s).unwrap();
        assert_eq!(result.roe_at("2023/01"), None);
        assert!((result.roe_at("2023/04").unwrap() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_analyze_sheet_custom_labels() {
        let mut config = DupontConfig::default();
        config.line_items.equity = "Satış Gelirleri".to_string();
        let calculator = DupontCalculator::new(config);
        let floats = |v: f64| vec![Data::Float(v)];
        let s = sheet(
            "E",
            &["2023/01"],
            &[
                ("Dönem Net Kar/Zararı", floats(10.0)),
                ("Satış Gelirleri", floats(100.0)),
                ("TOPLAM VARLIKLAR", floats(200.0)),
            ],
        );

        // Equity row replaced by sales: ROE = 10 / 100 * 100
        let result = calculator.analyze_sheet(&s).unwrap();
        assert!((result.roe_at("2023/01").unwrap() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_sheet_diagnostic_conversion() {
        let d = sheet_diagnostic(DupontError::MissingLineItem {
            sheet: "B".to_string(),
            label: "Özkaynaklar".to_string(),
        })
        .unwrap();
        assert_eq!(
            d,
            Diagnostic::MissingLineItem {
                sheet: "B".to_string(),
                label: "Özkaynaklar".to_string()
            }
        );

        let fatal = sheet_diagnostic(DupontError::Workbook("gone".to_string()));
        assert!(fatal.is_err());
    }

    #[test]
    fn test_run_missing_input_is_fatal() {
        let calculator = DupontCalculator::default();
        let result = calculator.run(Path::new("no-such-workbook.xlsx"));
        assert!(matches!(result, Err(DupontError::Workbook(_))));
    }
}
