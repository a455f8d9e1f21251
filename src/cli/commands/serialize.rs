//! serialize commands - Write the bundled sample report to disk
//!
//! The report model is deliberately small: a title, ordered column names,
//! and rows of cells. Formats share the model and differ only in the
//! writer.

use std::fs;
use std::path::Path;

use anyhow::{Context as _, Result};
use serde::Serialize;

use crate::cli::Context;
use crate::engine::Streams;

/// One tabular report.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Report title; becomes the section heading in flat formats.
    pub title: String,
    /// Ordered column names.
    pub columns: Vec<String>,
    /// Rows of cells, one cell per column.
    pub rows: Vec<Vec<String>>,
}

/// The reports bundled with the application.
pub fn sample_reports() -> Vec<Report> {
    vec![Report {
        title: "Sample Report".to_string(),
        columns: ["Name", "Age", "City"].map(String::from).to_vec(),
        rows: vec![
            ["Alice", "30", "New York"].map(String::from).to_vec(),
            ["Bob", "25", "Los Angeles"].map(String::from).to_vec(),
            ["Charlie", "35", "Chicago"].map(String::from).to_vec(),
        ],
    }]
}

/// Serialize the sample reports to a JSON file.
pub fn json(ctx: &Context, file_name: &Path, streams: &mut Streams) -> Result<()> {
    let reports = sample_reports();

    let contents =
        serde_json::to_string_pretty(&reports).context("Failed to encode reports as JSON")?;
    fs::write(file_name, contents)
        .with_context(|| format!("Failed to write '{}'", file_name.display()))?;

    if !ctx.quiet {
        streams.outln(format!(
            "Serialized report to JSON file: {}",
            file_name.display()
        ));
    }

    Ok(())
}

/// Serialize the sample reports to a CSV file.
///
/// Each report is written as its title line, a header row, and data rows;
/// multiple reports are separated by a blank line.
pub fn csv(ctx: &Context, file_name: &Path, streams: &mut Streams) -> Result<()> {
    let reports = sample_reports();

    let mut contents = String::new();
    for (index, report) in reports.iter().enumerate() {
        if index > 0 {
            contents.push('\n');
        }
        contents.push_str(&csv_row(std::slice::from_ref(&report.title)));
        contents.push_str(&csv_row(&report.columns));
        for row in &report.rows {
            contents.push_str(&csv_row(row));
        }
    }

    fs::write(file_name, contents)
        .with_context(|| format!("Failed to write '{}'", file_name.display()))?;

    if !ctx.quiet {
        streams.outln(format!(
            "Serialized report to CSV file: {}",
            file_name.display()
        ));
    }

    Ok(())
}

/// One CSV row with a trailing newline.
fn csv_row(cells: &[String]) -> String {
    let escaped: Vec<String> = cells.iter().map(|cell| csv_field(cell)).collect();
    let mut row = escaped.join(",");
    row.push('\n');
    row
}

/// Quote a field only when it needs quoting.
fn csv_field(cell: &str) -> String {
    if cell.contains([',', '"', '\n']) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}
