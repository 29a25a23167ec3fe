//! Run configuration
//!
//! Every field has a default matching the layout of the financial statement
//! workbooks this tool was written for: a Turkish `itemDescTr` label column,
//! two metadata columns, then one column per quarter.

use crate::types::LineItem;

/// Input file used when none is given on the command line
pub const DEFAULT_INPUT: &str = "finansallar.xlsx";

/// Output file used when none is given on the command line
pub const DEFAULT_OUTPUT: &str = "dupont_analysis_output.xlsx";

/// Row labels of the four line items a sheet must carry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItemLabels {
    pub net_profit: String,
    pub sales: String,
    pub total_assets: String,
    pub equity: String,
}

impl Default for LineItemLabels {
    fn default() -> Self {
        Self {
            net_profit: "Dönem Net Kar/Zararı".to_string(),
            sales: "Satış Gelirleri".to_string(),
            total_assets: "TOPLAM VARLIKLAR".to_string(),
            equity: "Özkaynaklar".to_string(),
        }
    }
}

impl LineItemLabels {
    /// Label configured for a line item
    pub fn label(&self, item: LineItem) -> &str {
        match item {
            LineItem::NetProfit => &self.net_profit,
            LineItem::Sales => &self.sales,
            LineItem::TotalAssets => &self.total_assets,
            LineItem::Equity => &self.equity,
        }
    }
}

/// Settings for one analysis run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DupontConfig {
    /// Header of the column holding row labels
    pub label_column: String,
    /// Non-label columns preceding the first period column
    pub metadata_columns: usize,
    pub line_items: LineItemLabels,
    /// Header of the first output column
    pub equity_header: String,
    /// Name of the single output worksheet
    pub output_sheet: String,
}

impl Default for DupontConfig {
    fn default() -> Self {
        Self {
            label_column: "itemDescTr".to_string(),
            metadata_columns: 2,
            line_items: LineItemLabels::default(),
            equity_header: "Equity Name".to_string(),
            output_sheet: "Sheet1".to_string(),
        }
    }
}

impl DupontConfig {
    /// Override the label column header
    pub fn with_label_column(mut self, label_column: impl Into<String>) -> Self {
        self.label_column = label_column.into();
        self
    }
}
