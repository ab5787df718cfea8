use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::error::{CheckerError, Result};
use crate::models::{Category, Report};
use crate::settings::OutputFormat;

fn category_cell(category: Category, label: &str) -> Cell {
    match category {
        Category::BothDatesOutOfBounds
        | Category::InvalidStartDate
        | Category::InvalidEndDate
        | Category::InvalidCost => Cell::new(label.red()),
        Category::NoLedgerMatch => Cell::new(label.yellow()),
        Category::LedgerCodeMatch => Cell::new(label.cyan()),
        Category::Summary => Cell::new(label.bold()),
        Category::Error => Cell::new(label.red().bold()),
    }
}

pub fn table(report: &Report) -> String {
    let mut table = Table::new();
    table.set_header(vec!["Activity", "Category", "Details"]);
    for f in &report.findings {
        table.add_row(vec![
            Cell::new(&f.activity),
            category_cell(f.category, &f.label),
            Cell::new(&f.detail),
        ]);
    }
    table.to_string()
}

pub fn json(report: &Report) -> Result<String> {
    Ok(serde_json::to_string_pretty(&report.findings)?)
}

pub fn csv(report: &Report) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(["Activity", "Category", "Details"])?;
    for (activity, label, detail) in report.entries() {
        wtr.write_record([activity, label, detail])?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| CheckerError::Other(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| CheckerError::Other(e.to_string()))
}

pub fn render(report: &Report, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(table(report)),
        OutputFormat::Json => json(report),
        OutputFormat::Csv => csv(report),
    }
}
