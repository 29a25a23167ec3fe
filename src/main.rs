use clap::Parser;
use dupont::cli::{self, AnalyzeOptions};
use dupont::config::{DEFAULT_INPUT, DEFAULT_OUTPUT};
use dupont::error::DupontResult;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dupont")]
#[command(about = "DuPont ROE analysis for multi-sheet financial statement workbooks")]
#[command(long_about = "DuPont - Return on equity decomposition

Reads a workbook where every sheet holds the quarterly statements of one
equity, and computes per quarter:

  ROE = net profit / sales            (profit margin)
      × sales / total assets          (asset turnover)
      × total assets / equity         (equity multiplier)
      × 100

REQUIRED ROWS (matched on the itemDescTr column):
  Dönem Net Kar/Zararı   Satış Gelirleri   TOPLAM VARLIKLAR   Özkaynaklar

Sheets missing a row are skipped with a warning. Non-numeric cells and
zero denominators give empty ROE cells. Period columns (YYYY/MM) are
sorted chronologically in the output.

EXAMPLES:
  dupont                                   # finansallar.xlsx → dupont_analysis_output.xlsx
  dupont statements.xlsx roe.xlsx
  dupont statements.xlsx --dry-run         # print the table, write nothing
  dupont statements.xlsx roe.xlsx --json   # also print JSON to stdout

Set RUST_LOG=debug for per-sheet tracing.")]
#[command(version)]
struct Cli {
    /// Input workbook (.xlsx, .xls, .ods)
    #[arg(default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Output Excel file path (.xlsx)
    #[arg(default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Show verbose analysis steps
    #[arg(short, long)]
    verbose: bool,

    /// Compute and print results without writing the output file
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Print the result table as JSON to stdout
    #[arg(long)]
    json: bool,

    /// Header of the row label column
    #[arg(long, value_name = "NAME")]
    label_column: Option<String>,
}

fn main() -> DupontResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    cli::analyze(AnalyzeOptions {
        input: cli.input,
        output: cli.output,
        verbose: cli.verbose,
        dry_run: cli.dry_run,
        json: cli.json,
        label_column: cli.label_column,
    })
}
