use crate::config::DupontConfig;
use crate::core::{DupontCalculator, DupontReport};
use crate::error::DupontResult;
use crate::types::{Diagnostic, RoeTable};
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;

/// Options of the analyze command
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub verbose: bool,
    pub dry_run: bool,
    pub json: bool,
    pub label_column: Option<String>,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    table: &'a RoeTable,
    diagnostics: &'a [Diagnostic],
}

/// Format an ROE percentage for display, `-` when missing
fn format_roe(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}%", v),
        None => "-".to_string(),
    }
}

/// Execute the analyze command
pub fn analyze(options: AnalyzeOptions) -> DupontResult<()> {
    let AnalyzeOptions {
        input,
        output,
        verbose,
        dry_run,
        json,
        label_column,
    } = options;

    let mut config = DupontConfig::default();
    if let Some(label_column) = label_column {
        config = config.with_label_column(label_column);
    }
    let calculator = DupontCalculator::new(config);

    // JSON goes to stdout alone, everything human-readable to stderr
    let say = |line: String| {
        if json {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    };

    say(format!("{}", "📊 DuPont - ROE Analysis".bold().green()));
    say(format!("   Input:  {}", input.display()));
    say(format!("   Output: {}\n", output.display()));

    if dry_run {
        say(format!(
            "{}",
            "📋 DRY RUN MODE - No file will be written\n".yellow()
        ));
    }

    if verbose {
        say(format!("{}", "📖 Reading workbook...".cyan()));
    }

    let report = calculator.run(&input)?;

    if verbose {
        say(format!("   Found {} sheets", report.sheets_seen));
        for result in &report.results {
            let latest = result.periods.last().and_then(|p| result.roe_at(p));
            say(format!(
                "   📈 {}: {} periods, latest ROE {}",
                result.equity.bright_blue(),
                result.periods.len(),
                format_roe(latest)
            ));
        }
        say(String::new());
    }

    for diagnostic in &report.diagnostics {
        eprintln!("{}", format!("⚠️  {}", diagnostic).yellow());
    }

    if dry_run || verbose {
        say(render_table(&report.table));
    }

    if json {
        let payload = JsonOutput {
            table: &report.table,
            diagnostics: &report.diagnostics,
        };
        println!("{}", serde_json::to_string_pretty(&payload)?);
    }

    say(summary(&report));

    if dry_run {
        say(format!(
            "{}",
            "📋 Dry run complete - no file written".yellow()
        ));
        return Ok(());
    }

    calculator.export(&report, &output)?;
    say(format!(
        "{}",
        format!("✅ DuPont analysis results saved to {}", output.display())
            .bold()
            .green()
    ));

    Ok(())
}

/// One-line count of processed and skipped sheets
fn summary(report: &DupontReport) -> String {
    format!(
        "   {} equities analyzed, {} sheets skipped",
        report.sheets_processed(),
        report.sheets_skipped()
    )
}

/// Plain-text rendering of the ROE table
fn render_table(table: &RoeTable) -> String {
    let name_width = table
        .rows
        .iter()
        .map(|row| row.equity.chars().count())
        .chain(std::iter::once(table.equity_header.chars().count()))
        .max()
        .unwrap_or(0);
    let col_width = table
        .periods
        .iter()
        .map(|p| p.chars().count())
        .max()
        .unwrap_or(0)
        .max(10);

    let mut out = String::new();
    out.push_str(&format!("{:<name_width$}", table.equity_header));
    for period in &table.periods {
        out.push_str(&format!("  {:>col_width$}", period));
    }
    out.push('\n');

    for row in &table.rows {
        out.push_str(&format!("{:<name_width$}", row.equity));
        for value in &row.values {
            out.push_str(&format!("  {:>col_width$}", format_roe(*value)));
        }
        out.push('\n');
    }

    out
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
