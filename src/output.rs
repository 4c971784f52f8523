//! Output formatting and persistence for transcript reports.
//!
//! Supports a logged summary table, JSON, and CSV append.

use anyhow::Result;
use tracing::{debug, info};

use crate::report::{NodeReport, ReportRow, TranscriptReport};
use csv::WriterBuilder;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Logs the report using Rust's debug pretty-print format.
pub fn print_pretty(report: &TranscriptReport) {
    debug!("{:#?}", report);
}

/// Writes the report as pretty-printed JSON followed by a newline.
pub fn write_json<W: Write>(mut writer: W, report: &TranscriptReport) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, report)?;
    writeln!(writer)?;
    Ok(())
}

/// Logs the totals and, when anything was registered, one line per
/// subcategory and category.
pub fn print_summary(report: &TranscriptReport) {
    info!(
        registered = report.registered_credits,
        passed = report.passed_credits,
        gpa = report.gpa,
        "Transcript totals"
    );

    if report.registered_credits == 0.0 {
        return;
    }

    info!("{}", header_line());
    for category in &report.categories {
        for sub in &category.subcategories {
            info!("{}", table_line("", &sub.name, sub));
        }
        info!("{}", table_line(&category.summary.name, "", &category.summary));
    }
}

fn header_line() -> String {
    format!(
        "{:<12} {:<16} {:>5} {:>5} {:>5} {:>5} {:>5} {:>5} {:>7} {:>5}",
        "category", "subcategory", "AA", "A", "B", "C", "D", "E", "passed", "GPA"
    )
}

fn table_line(category: &str, subcategory: &str, node: &NodeReport) -> String {
    let gpa = node
        .gpa
        .map(|g| g.to_string())
        .unwrap_or_else(|| "-".to_string());
    format!(
        "{:<12} {:<16} {:>5} {:>5} {:>5} {:>5} {:>5} {:>5} {:>7} {:>5}",
        category,
        subcategory,
        node.credits.aa,
        node.credits.a,
        node.credits.b,
        node.credits.c,
        node.credits.d,
        node.credits.e,
        node.passed_credits,
        gpa
    )
}

/// Appends one CSV row per subcategory and category of `report`.
///
/// Creates the file with headers if it does not already exist.
pub fn append_rows(path: &str, report: &TranscriptReport) -> Result<()> {
    let file_exists = Path::new(path).exists();
    let rows = ReportRow::rows(report);
    debug!(path, file_exists, rows = rows.len(), "Appending CSV rows");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists)
        .from_writer(file);

    for row in &rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}
