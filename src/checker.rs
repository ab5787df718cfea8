use std::path::{Path, PathBuf};

use log::info;

use crate::error::{CheckerError, Result};
use crate::loader::{is_csv, read_table};
use crate::models::{CheckRequest, Report, ValidationCriteria};
use crate::settings::Settings;
use crate::validator::validate;

fn require_file(file: Option<&Path>) -> Result<PathBuf> {
    let path = file
        .filter(|p| !p.as_os_str().is_empty())
        .ok_or(CheckerError::NoFileSelected)?;
    if !path.exists() {
        return Err(CheckerError::FileError(format!("File not found: {}", path.display())));
    }
    Ok(path.to_path_buf())
}

/// The sheet to read: the requested one, else the configured default.
/// CSV files have no sheets and skip the check.
fn resolve_sheet(path: &Path, requested: Option<&str>, settings: &Settings) -> Result<Option<String>> {
    if is_csv(path) {
        return Ok(None);
    }
    let named = |s: Option<&str>| s.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string);
    named(requested)
        .or_else(|| named(settings.default_sheet.as_deref()))
        .map(Some)
        .ok_or(CheckerError::MissingSheetName)
}

/// Run one check: build criteria, load the sheet, validate every row.
/// The file is read fresh on every call.
pub fn run(request: &CheckRequest, settings: &Settings) -> Result<Report> {
    let criteria = ValidationCriteria::from_request(request, settings.date_format)?;
    let path = require_file(request.file.as_deref())?;
    let sheet = resolve_sheet(&path, request.sheet.as_deref(), settings)?;

    let table = read_table(&path, sheet.as_deref())?;
    let rows = table.activities(criteria.ledger_code_filter.is_some(), settings.date_format)?;
    info!("validating {} rows from {}", rows.len(), path.display());
    Ok(validate(&rows, &criteria))
}

/// Ledger codes present in a sheet, optionally narrowed to those that
/// contain `filter` (case-insensitive).
pub fn ledger_codes(
    file: &Path,
    sheet: Option<&str>,
    settings: &Settings,
    filter: Option<&str>,
) -> Result<Vec<String>> {
    let path = require_file(Some(file))?;
    let sheet = resolve_sheet(&path, sheet, settings)?;
    let codes = read_table(&path, sheet.as_deref())?.ledger_codes()?;
    let Some(needle) = filter.map(|f| f.trim().to_lowercase()).filter(|f| !f.is_empty()) else {
        return Ok(codes);
    };
    Ok(codes
        .into_iter()
        .filter(|code| code.to_lowercase().contains(&needle))
        .collect())
}
